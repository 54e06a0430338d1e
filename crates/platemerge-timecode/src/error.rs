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

//! Error types for timecode conversion

use thiserror::Error;

/// Timecode conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimecodeError {
    /// Timecode string is malformed or does not fit the frame rate
    #[error("Invalid timecode '{input}': {reason}")]
    InvalidTimecode {
        /// The offending input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Frame rate cannot be used for conversion
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(String),
}

impl TimecodeError {
    /// Build an [`TimecodeError::InvalidTimecode`]
    pub fn invalid_timecode(input: impl Into<String>, reason: impl Into<String>) -> Self {
        TimecodeError::InvalidTimecode {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for timecode operations
pub type Result<T> = std::result::Result<T, TimecodeError>;
