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


//! Eagerly extracted project data
//!
//! A snapshot is plain data read once from the host: source clips with their
//! rate and start timecode, and timelines with their video tracks and clip
//! usages. Nothing here holds a live host handle.

use platemerge_coalesce::{ClipColor, CoalesceError, GroupKey, Interval, SourceClipId};
use platemerge_timecode::{frames_from_timecode, FrameCount, FrameRate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// A media pool item used by timeline clips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceClip {
    /// Stable host identifier
    pub id: SourceClipId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Native frame rate of the media
    pub fps: f64,

    /// Whether the media's timecode is drop-frame
    #[serde(default)]
    pub drop_frame: bool,

    /// Timecode of the first frame; absent for media without timecode
    #[serde(default)]
    pub start_tc: Option<String>,

    /// Camera reel the media was recorded to
    #[serde(default)]
    pub reel_name: Option<String>,

    /// File name of the media on disk
    #[serde(default)]
    pub file_name: Option<String>,
}

impl SourceClip {
    /// Frame rate of the media
    pub fn rate(&self) -> platemerge_timecode::Result<FrameRate> {
        FrameRate::new(self.fps, self.drop_frame)
    }

    /// First frame of the media, in its own frame space.
    ///
    /// Media without a start timecode begins at frame 0.
    pub fn head_in(&self) -> platemerge_timecode::Result<FrameCount> {
        let rate = self.rate()?;
        match frames_from_timecode(self.start_tc.as_deref(), rate)? {
            Some(frames) => {
                debug!(source = %self.id, head_in = frames, "Resolved head-in");
                Ok(frames)
            }
            None => {
                warn!(source = %self.id, name = %self.name, "No start timecode, assuming head-in 0");
                Ok(0)
            }
        }
    }

    /// Value of the grouping property, or `None` when grouping by identity
    /// or when the property is blank
    pub fn group_value(&self, key: GroupKey) -> Option<&str> {
        let value = match key {
            GroupKey::SourceClip => None,
            GroupKey::ReelName => self.reel_name.as_deref(),
            GroupKey::FileName => self.file_name.as_deref(),
        };
        value.map(str::trim).filter(|value| !value.is_empty())
    }
}

/// One clip instance placed on a timeline track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipUsage {
    /// Clip name as shown on the timeline
    #[serde(default)]
    pub name: String,

    /// Media pool item the clip cuts from; generators and titles have none
    #[serde(default)]
    pub source: Option<SourceClipId>,

    /// Clip colour label
    #[serde(default, deserialize_with = "color_label")]
    pub color: Option<ClipColor>,

    /// Frames trimmed from the head of the source
    pub left_offset: FrameCount,

    /// Source frame at which the clip ends, relative to the source start
    pub right_offset: FrameCount,
}

impl ClipUsage {
    /// Source range this usage covers, given the source's head-in
    pub fn interval(&self, head_in: FrameCount) -> platemerge_coalesce::Result<Interval> {
        let duration = self.right_offset.checked_sub(self.left_offset).ok_or(
            CoalesceError::InvalidInterval {
                start: self.left_offset,
                end: self.right_offset,
            },
        )?;
        let src_in = head_in.saturating_add(self.left_offset);
        Interval::new(src_in, src_in.saturating_add(duration))
    }
}

/// A video track and its clips in timeline order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track name, e.g. `Video 1`
    pub name: String,

    /// Clips in timeline order
    #[serde(default)]
    pub clips: Vec<ClipUsage>,
}

/// A timeline in the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Timeline name
    pub name: String,

    /// Host frame rate setting, e.g. `"24"` or `"29"`
    #[serde(default = "default_fps_setting")]
    pub fps: String,

    /// Whether the timeline uses drop-frame timecode
    #[serde(default)]
    pub drop_frame: bool,

    /// Video tracks, bottom to top
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Timeline {
    /// Frame rate of the timeline
    pub fn rate(&self) -> platemerge_timecode::Result<FrameRate> {
        FrameRate::from_setting(&self.fps, self.drop_frame)
    }

    /// Label for the clip at `clip_index` on the 1-based `track_index`
    pub fn usage_label(&self, track_index: usize, clip_index: usize, clip: &ClipUsage) -> String {
        format!("{}-{}-{:04}-{}", self.name, track_index, clip_index, clip.name)
    }
}

fn default_fps_setting() -> String {
    "24".to_string()
}

/// Blank colour labels mean "no colour"
fn color_label<'de, D>(deserializer: D) -> Result<Option<ClipColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    match label.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
