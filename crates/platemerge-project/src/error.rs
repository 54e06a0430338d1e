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


//! Error types for the project adapter

use platemerge_coalesce::{CoalesceError, SourceClipId};
use platemerge_timecode::{FrameCount, TimecodeError};
use std::path::PathBuf;
use thiserror::Error;

/// Project snapshot errors
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Occurrence grouping or coalescing failed
    #[error(transparent)]
    Coalesce(#[from] CoalesceError),

    /// Timecode or frame rate could not be interpreted
    #[error(transparent)]
    Timecode(#[from] TimecodeError),

    /// A plate or usage referenced a source clip missing from the snapshot
    #[error("Source clip '{0}' is not in the project snapshot")]
    UnknownSource(SourceClipId),

    /// A plate starts before its source clip's head-in
    #[error("Plate on '{clip}' starts at frame {start}, before head-in {head_in}")]
    PlateBeforeHeadIn {
        /// Source clip of the plate
        clip: SourceClipId,
        /// Plate start in source frames
        start: FrameCount,
        /// Head-in of the source clip
        head_in: FrameCount,
    },

    /// Snapshot file not found
    #[error("Snapshot file not found: {0}")]
    FileNotFound(PathBuf),

    /// Snapshot JSON could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for project operations
pub type Result<T> = std::result::Result<T, ProjectError>;
