// PlateMerge - Source plate coalescing for editorial timelines
// Copyright (C) 2025 PlateMerge Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! SMPTE timecode engine for PlateMerge
//!
//! This crate provides:
//! - [`FrameRate`] values with drop-frame validation
//! - [`Timecode`] parsing and formatting
//! - Frame count ⇄ timecode conversion, drop-frame aware
//!
//! # Example
//!
//! ```rust
//! use platemerge_timecode::{frames_from_timecode, timecode_from_frames, FrameRate};
//!
//! # fn main() -> Result<(), platemerge_timecode::TimecodeError> {
//! let rate = FrameRate::drop_frame(29.97)?;
//! assert_eq!(timecode_from_frames(1800, rate).to_string(), "00:01:00;02");
//! assert_eq!(frames_from_timecode(Some("00:01:00;02"), rate)?, Some(1800));
//! assert_eq!(frames_from_timecode(Some(""), rate)?, None);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rate;
pub mod timecode;

pub use error::{Result, TimecodeError};
pub use rate::{FrameCount, FrameRate};
pub use timecode::Timecode;

/// Convert a timecode string to a frame count.
///
/// A missing or blank timecode yields `Ok(None)`, which callers must keep
/// distinct from frame 0.
pub fn frames_from_timecode(tc: Option<&str>, rate: FrameRate) -> Result<Option<FrameCount>> {
    let Some(tc) = tc.map(str::trim).filter(|tc| !tc.is_empty()) else {
        return Ok(None);
    };

    let timecode: Timecode = tc.parse()?;
    timecode.to_frames(rate).map(Some)
}

/// Convert a frame count to a timecode.
///
/// Negative counts are formatted by magnitude.
pub fn timecode_from_frames(frames: i64, rate: FrameRate) -> Timecode {
    Timecode::from_frames(frames.unsigned_abs(), rate)
}
