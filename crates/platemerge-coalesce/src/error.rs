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

//! Error types for occurrence grouping and coalescing

use crate::interval::SourceClipId;
use platemerge_timecode::{FrameCount, TimecodeError};
use thiserror::Error;

/// Coalescing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoalesceError {
    /// A group was coalesced without any intervals
    #[error("No intervals recorded for source clip '{0}'")]
    EmptyGroup(SourceClipId),

    /// A usage referenced a source clip that was never registered
    #[error("Unknown source clip '{0}'")]
    UnknownSourceClip(SourceClipId),

    /// Interval end lies before its start
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        /// First frame
        start: FrameCount,
        /// One past the last frame
        end: FrameCount,
    },

    /// Timeline name filter did not compile
    #[error("Invalid timeline filter: {0}")]
    InvalidFilter(String),

    /// Unrecognised clip colour or merge mode name
    #[error("Unknown {kind} '{value}'")]
    UnknownName {
        /// What was being parsed
        kind: &'static str,
        /// The rejected value
        value: String,
    },

    /// Timecode conversion failed while building intervals
    #[error(transparent)]
    Timecode(#[from] TimecodeError),
}

/// Result type for coalescing operations
pub type Result<T> = std::result::Result<T, CoalesceError>;
