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

//! Structured logging macros.
//!
//! Thin wrappers over `tracing` that take fields as a `key => value` map:
//!
//! ```ignore
//! log_info!("Merge run complete" => {
//!     plates => report.plates.len(),
//!     sources => groups.len()
//! });
//! ```

/// Log an info message with structured fields
#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        tracing::info!($msg)
    };
    ($msg:expr => { $($key:ident => $value:expr),* $(,)? }) => {
        tracing::info!($($key = $value,)* $msg)
    };
}

/// Log a debug message with structured fields
#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        tracing::debug!($msg)
    };
    ($msg:expr => { $($key:ident => $value:expr),* $(,)? }) => {
        tracing::debug!($($key = $value,)* $msg)
    };
}

/// Log a warning with structured fields
#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        tracing::warn!($msg)
    };
    ($msg:expr => { $($key:ident => $value:expr),* $(,)? }) => {
        tracing::warn!($($key = $value,)* $msg)
    };
}

/// Log an error with structured fields
#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        tracing::error!($msg)
    };
    ($msg:expr => { $($key:ident => $value:expr),* $(,)? }) => {
        tracing::error!($($key = $value,)* $msg)
    };
}
