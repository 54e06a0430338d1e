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

//! Source clip identities and half-open frame intervals

use crate::error::{CoalesceError, Result};
use platemerge_timecode::FrameCount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identity of a source clip (media pool item)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceClipId(String);

impl SourceClipId {
    /// Wrap a host identifier
    pub fn new(id: impl Into<String>) -> Self {
        SourceClipId(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceClipId {
    fn from(id: &str) -> Self {
        SourceClipId::new(id)
    }
}

impl From<String> for SourceClipId {
    fn from(id: String) -> Self {
        SourceClipId(id)
    }
}

/// A half-open `[start, end)` range in a source clip's own frame space.
///
/// Ordered by `start`, then `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    start: FrameCount,
    end: FrameCount,
}

impl Interval {
    /// Create an interval, rejecting `start > end`
    pub fn new(start: FrameCount, end: FrameCount) -> Result<Self> {
        if start > end {
            return Err(CoalesceError::InvalidInterval { start, end });
        }
        Ok(Interval { start, end })
    }

    /// First frame
    pub fn start(&self) -> FrameCount {
        self.start
    }

    /// One past the last frame
    pub fn end(&self) -> FrameCount {
        self.end
    }

    /// Number of frames covered
    pub fn len(&self) -> FrameCount {
        self.end - self.start
    }

    /// Whether the interval covers no frames
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this interval
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest interval covering both
    pub fn envelope(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether `next` starts no more than `gap_tolerance` frames after this
    /// interval ends. Overlapping and nested intervals are always within
    /// tolerance.
    pub fn within_gap(&self, next: &Interval, gap_tolerance: FrameCount) -> bool {
        next.start <= self.end.saturating_add(gap_tolerance)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
