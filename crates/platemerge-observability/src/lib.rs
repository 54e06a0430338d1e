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

//! Structured logging for PlateMerge.
//!
//! Installs a global `tracing` subscriber in pretty, compact or JSON form,
//! filtered with an `EnvFilter` built from the configured level, `RUST_LOG`,
//! or `info`.
//!
//! ```no_run
//! use platemerge_observability::{init_tracing_with_config, LogConfig, LogFormat};
//!
//! let config = LogConfig::new()
//!     .with_format(LogFormat::Json)
//!     .with_level("debug");
//! init_tracing_with_config(config).unwrap();
//! tracing::info!("PlateMerge started");
//! ```

pub mod config;
pub mod initialization;
pub mod macros;

pub use config::{LogConfig, LogError, LogFormat, LogOutput};
pub use initialization::{init_tracing, init_tracing_with_config};
