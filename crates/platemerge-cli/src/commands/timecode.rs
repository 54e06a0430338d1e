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


use anyhow::{Context, Result};
use clap::Parser;
use platemerge_timecode::{frames_from_timecode, timecode_from_frames, FrameRate};

/// Convert between frame counts and SMPTE timecode
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    # Frame count to drop-frame timecode
    platemerge timecode --fps 29.97 --drop 1800

    # Timecode to frame count
    platemerge timecode --fps 29.97 --drop --to-frames '00:01:00;02'")]
pub struct TimecodeCmd {
    /// Frame rate, as a number or a host setting such as 23 or 29
    #[arg(long, value_name = "FPS", default_value = "24")]
    pub fps: String,

    /// Use drop-frame timecode
    #[arg(long)]
    pub drop: bool,

    /// Frame count to convert to timecode
    #[arg(
        value_name = "FRAMES",
        allow_negative_numbers = true,
        required_unless_present = "to_frames",
        conflicts_with = "to_frames"
    )]
    pub frames: Option<i64>,

    /// Timecode to convert to a frame count
    #[arg(long, value_name = "TIMECODE")]
    pub to_frames: Option<String>,
}

impl TimecodeCmd {
    pub async fn execute(&self) -> Result<()> {
        let rate = FrameRate::from_setting(&self.fps, self.drop)
            .with_context(|| format!("Invalid frame rate '{}'", self.fps))?;

        match (&self.to_frames, self.frames) {
            (Some(tc), _) => match frames_from_timecode(Some(tc), rate)? {
                Some(frames) => println!("{}", frames),
                None => anyhow::bail!("Timecode is empty"),
            },
            (None, Some(frames)) => println!("{}", timecode_from_frames(frames, rate)),
            (None, None) => anyhow::bail!("Nothing to convert"),
        }
        Ok(())
    }
}
