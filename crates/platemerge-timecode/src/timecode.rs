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

//! SMPTE timecode values
//!
//! A [`Timecode`] is only ever a serialisation of a frame count. Parsing and
//! formatting go through `FromStr` and `Display`; converting to and from
//! frames always takes a [`FrameRate`].
//!
//! Drop-frame conversion follows the Duncan/Heidelberger method: the frame
//! labels `00` and `01` (at 29.97) are skipped at the start of every minute
//! except each tenth minute, so the label keeps pace with wall-clock time.

use crate::error::{Result, TimecodeError};
use crate::rate::{FrameCount, FrameRate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An `HH:MM:SS:FF` (or `HH:MM:SS;FF` drop-frame) timecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timecode {
    /// Hours, not wrapped for non-drop rates
    pub hours: u64,
    /// Minutes, 0..60
    pub minutes: u32,
    /// Seconds, 0..60
    pub seconds: u32,
    /// Frame within the second, below the rate's timebase
    pub frames: u32,
    /// Whether the frame field is written with the `;` marker
    pub drop_frame: bool,
}

impl Timecode {
    /// Create a timecode from its fields
    pub fn new(hours: u64, minutes: u32, seconds: u32, frames: u32, drop_frame: bool) -> Self {
        Timecode {
            hours,
            minutes,
            seconds,
            frames,
            drop_frame,
        }
    }

    /// Convert to a frame count at `rate`.
    ///
    /// The rate's drop-frame flag decides the arithmetic; the separator the
    /// timecode was written with does not.
    pub fn to_frames(&self, rate: FrameRate) -> Result<FrameCount> {
        let timebase = rate.timebase();
        if u64::from(self.frames) >= timebase {
            return Err(TimecodeError::invalid_timecode(
                self.to_string(),
                format!(
                    "frame field {} exceeds frame rate {}",
                    self.frames, rate
                ),
            ));
        }

        let hours = self.hours;
        let minutes = u64::from(self.minutes);
        let seconds = u64::from(self.seconds);
        let frames = u64::from(self.frames);
        let total_minutes = hours * 60 + minutes;

        if rate.is_drop_frame() {
            let nominal =
                timebase * 3600 * hours + timebase * 60 * minutes + timebase * seconds + frames;
            let dropped = rate.drop_frames() * (total_minutes - total_minutes / 10);
            Ok(nominal.saturating_sub(dropped))
        } else {
            Ok((total_minutes * 60 + seconds) * timebase + frames)
        }
    }

    /// Format a frame count at `rate`.
    ///
    /// Drop-frame counts wrap at 24 hours; non-drop counts do not.
    pub fn from_frames(frames: FrameCount, rate: FrameRate) -> Self {
        let timebase = rate.timebase();
        let labelled = if rate.is_drop_frame() {
            reinsert_dropped_labels(frames, rate)
        } else {
            frames
        };

        let total_seconds = labelled / timebase;
        Timecode {
            hours: total_seconds / 3600,
            minutes: ((total_seconds / 60) % 60) as u32,
            seconds: (total_seconds % 60) as u32,
            frames: (labelled % timebase) as u32,
            drop_frame: rate.is_drop_frame(),
        }
    }
}

/// Turn a real frame count into its label count by adding back the labels
/// skipped in every elapsed ten-minute block and minute.
fn reinsert_dropped_labels(frames: FrameCount, rate: FrameRate) -> FrameCount {
    let drop = rate.drop_frames();
    let frames = frames % rate.frames_per_day();

    let blocks = frames / rate.frames_per_ten_minutes();
    let remainder = frames % rate.frames_per_ten_minutes();

    if remainder > drop {
        frames + drop * 9 * blocks + drop * ((remainder - drop) / rate.frames_per_minute())
    } else {
        frames + drop * 9 * blocks
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, marker, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || TimecodeError::invalid_timecode(s, "expected HH:MM:SS:FF or HH:MM:SS;FF");

        let bytes = s.as_bytes();
        if !s.is_ascii() || bytes.len() != 11 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(malformed());
        }

        let drop_frame = match bytes[8] {
            b':' => false,
            b';' => true,
            _ => return Err(malformed()),
        };

        let field = |start: usize| -> Result<u32> {
            let digits = &s[start..start + 2];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            digits.parse().map_err(|_| malformed())
        };

        let hours = field(0)?;
        let minutes = field(3)?;
        let seconds = field(6)?;
        let frames = field(9)?;

        if minutes >= 60 || seconds >= 60 {
            return Err(TimecodeError::invalid_timecode(
                s,
                "minutes and seconds must be below 60",
            ));
        }

        Ok(Timecode::new(
            u64::from(hours),
            minutes,
            seconds,
            frames,
            drop_frame,
        ))
    }
}
