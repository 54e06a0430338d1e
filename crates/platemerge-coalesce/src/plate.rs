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

//! Coalesced plates handed to the timeline sink

use crate::interval::{Interval, SourceClipId};
use platemerge_timecode::FrameCount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type tag attached to appended timeline items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum MediaType {
    /// Video only
    #[default]
    Video,
}

impl MediaType {
    /// Numeric code used by host timeline append calls
    pub fn host_code(&self) -> u8 {
        match self {
            MediaType::Video => 1,
        }
    }
}

/// One coalesced span of a source clip's usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    /// Source clip the plate cuts from
    pub source: SourceClipId,

    /// First frame, in the source clip's frame space
    pub start: FrameCount,

    /// One past the last frame
    pub end: FrameCount,

    /// Media type tag for the sink
    pub media_type: MediaType,

    /// Destination track on the new timeline (1-based)
    pub track_index: u32,

    /// Labels of the absorbed usages; the first is the plate's parent shot
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usages: Vec<String>,
}

impl Plate {
    /// Frames covered by the plate
    pub fn len(&self) -> FrameCount {
        self.end - self.start
    }

    /// Whether the plate covers no frames
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `interval` lies entirely within the plate
    pub fn covers(&self, interval: &Interval) -> bool {
        self.start <= interval.start() && interval.end() <= self.end
    }

    /// One summary line: `parent <- child, child` or `parent ^`
    pub fn describe(&self) -> String {
        match self.usages.split_first() {
            Some((parent, [])) => format!("{} ^", parent),
            Some((parent, children)) => format!("{} <- {}", parent, children.join(", ")),
            None => format!("[{}, {}) ^", self.start, self.end),
        }
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.source, self.start, self.end)
    }
}
