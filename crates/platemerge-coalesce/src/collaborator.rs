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


//! Contracts with the host editing application
//!
//! The coalescer never talks to a host directly. A [`OccurrenceSource`]
//! enumerates clip usages from whatever project it wraps, and a
//! [`TimelineSink`] receives the finished plates.

use crate::error::{CoalesceError, Result};
use crate::group::OccurrenceGroup;
use crate::plate::Plate;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clip colour labels offered by the host
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipColor {
    Orange,
    Apricot,
    Yellow,
    Lime,
    Olive,
    Green,
    Teal,
    Navy,
    Blue,
    Purple,
    Violet,
    Pink,
    Tan,
    Beige,
    Brown,
    Chocolate,
}

impl ClipColor {
    /// Every colour, in the host's menu order
    pub const ALL: [ClipColor; 16] = [
        ClipColor::Orange,
        ClipColor::Apricot,
        ClipColor::Yellow,
        ClipColor::Lime,
        ClipColor::Olive,
        ClipColor::Green,
        ClipColor::Teal,
        ClipColor::Navy,
        ClipColor::Blue,
        ClipColor::Purple,
        ClipColor::Violet,
        ClipColor::Pink,
        ClipColor::Tan,
        ClipColor::Beige,
        ClipColor::Brown,
        ClipColor::Chocolate,
    ];

    /// Host display name
    pub fn name(&self) -> &'static str {
        match self {
            ClipColor::Orange => "Orange",
            ClipColor::Apricot => "Apricot",
            ClipColor::Yellow => "Yellow",
            ClipColor::Lime => "Lime",
            ClipColor::Olive => "Olive",
            ClipColor::Green => "Green",
            ClipColor::Teal => "Teal",
            ClipColor::Navy => "Navy",
            ClipColor::Blue => "Blue",
            ClipColor::Purple => "Purple",
            ClipColor::Violet => "Violet",
            ClipColor::Pink => "Pink",
            ClipColor::Tan => "Tan",
            ClipColor::Beige => "Beige",
            ClipColor::Brown => "Brown",
            ClipColor::Chocolate => "Chocolate",
        }
    }
}

impl FromStr for ClipColor {
    type Err = CoalesceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ClipColor::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoalesceError::UnknownName {
                kind: "clip colour",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ClipColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source property that decides which usages share an occurrence group.
///
/// Grouping by reel or file name lets usages of several media pool items
/// cut from the same camera reel coalesce into shared plates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// Media pool item identity (default)
    #[default]
    SourceClip,

    /// Reel name of the media
    ReelName,

    /// File name of the media
    FileName,
}

impl FromStr for GroupKey {
    type Err = CoalesceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "source_clip" | "source" => Ok(GroupKey::SourceClip),
            "reel_name" | "reel" => Ok(GroupKey::ReelName),
            "file_name" | "file" | "source_file" => Ok(GroupKey::FileName),
            _ => Err(CoalesceError::UnknownName {
                kind: "group key",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::SourceClip => f.write_str("source_clip"),
            GroupKey::ReelName => f.write_str("reel_name"),
            GroupKey::FileName => f.write_str("file_name"),
        }
    }
}

/// Which timelines, tracks and clips an occurrence source should consider
#[derive(Debug, Clone, Default)]
pub struct TimelineFilter {
    pattern: Option<Regex>,
    skip_color: Option<ClipColor>,
    excluded_tracks: Vec<String>,
}

impl TimelineFilter {
    /// Filter timelines by a regular expression searched in the timeline
    /// name. An empty pattern matches every timeline.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern).map_err(|e| CoalesceError::InvalidFilter(e.to_string()))?)
        };
        Ok(TimelineFilter {
            pattern,
            ..Self::default()
        })
    }

    /// Accept every timeline, track and clip
    pub fn all() -> Self {
        Self::default()
    }

    /// Skip clips labelled with `color`
    pub fn with_skip_color(mut self, color: Option<ClipColor>) -> Self {
        self.skip_color = color;
        self
    }

    /// Skip video tracks with these names
    pub fn with_excluded_tracks<I, S>(mut self, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tracks = tracks.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the timeline called `name` is selected
    pub fn matches_timeline(&self, name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(name),
            None => true,
        }
    }

    /// Whether a clip with this colour label is skipped
    pub fn skips_color(&self, color: Option<ClipColor>) -> bool {
        self.skip_color.is_some() && self.skip_color == color
    }

    /// Whether the video track called `name` is skipped
    pub fn excludes_track(&self, name: &str) -> bool {
        self.excluded_tracks.iter().any(|track| track == name)
    }

    /// Colour being skipped, if any
    pub fn skip_color(&self) -> Option<ClipColor> {
        self.skip_color
    }
}

/// Inbound contract: enumerates clip usages grouped by source clip
pub trait OccurrenceSource {
    /// Every group of usages on the timelines `filter` selects
    fn enumerate_occurrences(&self, filter: &TimelineFilter) -> Result<Vec<OccurrenceGroup>>;
}

/// Outbound contract: receives plates to build a new timeline from
pub trait TimelineSink {
    /// Error raised while building the timeline
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a timeline called `name` holding `plates` in order
    fn build_timeline(&mut self, name: &str, plates: &[Plate]) -> std::result::Result<(), Self::Error>;
}
