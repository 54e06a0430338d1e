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

//! Frame rates and the block sizes derived from them
//!
//! A [`FrameRate`] is a plain `Copy` value. Every conversion takes one
//! explicitly, so clips with different rates never share converter state.

use crate::error::{Result, TimecodeError};
use crate::timecode::Timecode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Frame count since media start
pub type FrameCount = u64;

/// Duncan/Heidelberger factor for the number of frame labels dropped per minute
const DROP_FRAME_FACTOR: f64 = 0.066666;

/// A frame rate together with its drop-frame flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameRateRepr", into = "FrameRateRepr")]
pub struct FrameRate {
    fps: f64,
    drop_frame: bool,
}

#[derive(Serialize, Deserialize)]
struct FrameRateRepr {
    fps: f64,
    #[serde(default)]
    drop_frame: bool,
}

impl TryFrom<FrameRateRepr> for FrameRate {
    type Error = TimecodeError;

    fn try_from(repr: FrameRateRepr) -> Result<Self> {
        FrameRate::new(repr.fps, repr.drop_frame)
    }
}

impl From<FrameRate> for FrameRateRepr {
    fn from(rate: FrameRate) -> Self {
        FrameRateRepr {
            fps: rate.fps,
            drop_frame: rate.drop_frame,
        }
    }
}

impl FrameRate {
    /// 23.976 non-drop
    pub const FPS_23_976: Self = Self::unchecked(23.976, false);
    /// 24 non-drop
    pub const FPS_24: Self = Self::unchecked(24.0, false);
    /// 25 non-drop
    pub const FPS_25: Self = Self::unchecked(25.0, false);
    /// 29.97 non-drop
    pub const FPS_29_97: Self = Self::unchecked(29.97, false);
    /// 29.97 drop-frame
    pub const FPS_29_97_DF: Self = Self::unchecked(29.97, true);
    /// 30 non-drop
    pub const FPS_30: Self = Self::unchecked(30.0, false);
    /// 50 non-drop
    pub const FPS_50: Self = Self::unchecked(50.0, false);
    /// 59.94 drop-frame
    pub const FPS_59_94_DF: Self = Self::unchecked(59.94, true);
    /// 60 non-drop
    pub const FPS_60: Self = Self::unchecked(60.0, false);

    const fn unchecked(fps: f64, drop_frame: bool) -> Self {
        Self { fps, drop_frame }
    }

    /// Create a frame rate.
    ///
    /// Drop-frame is only accepted where the ten-minute block size derived
    /// from `fps` agrees with the one implied by the dropped labels, which
    /// holds for the NTSC family (29.97, 59.94, 119.88). Anywhere else the
    /// conversion would not round-trip.
    pub fn new(fps: f64, drop_frame: bool) -> Result<Self> {
        if !fps.is_finite() || fps < 0.5 {
            return Err(TimecodeError::InvalidFrameRate(format!(
                "frame rate must be a positive number, got {}",
                fps
            )));
        }

        let rate = Self { fps, drop_frame };
        if drop_frame {
            let implied = rate.timebase() * 600 - 9 * rate.drop_frames();
            if implied != rate.frames_per_ten_minutes() {
                return Err(TimecodeError::InvalidFrameRate(format!(
                    "drop-frame timecode is not defined at {} fps",
                    fps
                )));
            }
        }

        Ok(rate)
    }

    /// Non-drop-frame rate
    pub fn non_drop(fps: f64) -> Result<Self> {
        Self::new(fps, false)
    }

    /// Drop-frame rate
    pub fn drop_frame(fps: f64) -> Result<Self> {
        Self::new(fps, true)
    }

    /// Map a host timeline frame-rate setting to a frame rate.
    ///
    /// Hosts report NTSC rates truncated (`"23"`, `"29"`, `"59"`, ...);
    /// anything else is parsed as a number.
    pub fn from_setting(setting: &str, drop_frame: bool) -> Result<Self> {
        let setting = setting.trim();
        let fps = match setting {
            "23" => 23.976,
            "29" => 29.97,
            "47" => 47.952,
            "59" => 59.94,
            "95" => 95.904,
            "119" => 119.88,
            other => other.parse::<f64>().map_err(|_| {
                TimecodeError::InvalidFrameRate(format!(
                    "unrecognised frame rate setting '{}'",
                    other
                ))
            })?,
        };

        debug!(setting, fps, drop_frame, "Resolved frame rate setting");
        Self::new(fps, drop_frame)
    }

    /// Frames per second as given
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Whether timecodes at this rate use drop-frame labels
    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Integral frames per timecode second, `round(fps)`
    pub fn timebase(&self) -> u64 {
        self.fps.round() as u64
    }

    /// Frame labels skipped at the start of each non-tenth minute
    pub fn drop_frames(&self) -> u64 {
        (self.fps * DROP_FRAME_FACTOR).round() as u64
    }

    pub(crate) fn frames_per_ten_minutes(&self) -> u64 {
        (self.fps * 600.0).round() as u64
    }

    pub(crate) fn frames_per_minute(&self) -> u64 {
        self.timebase() * 60 - self.drop_frames()
    }

    pub(crate) fn frames_per_day(&self) -> u64 {
        (self.fps * 3600.0).round() as u64 * 24
    }

    /// Format a frame count at this rate
    pub fn timecode(&self, frames: FrameCount) -> Timecode {
        Timecode::from_frames(frames, *self)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.drop_frame {
            write!(f, "{} fps DF", self.fps)
        } else {
            write!(f, "{} fps", self.fps)
        }
    }
}
