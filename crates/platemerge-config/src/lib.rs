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


//! Configuration for PlateMerge
//!
//! Settings are read from TOML, YAML or JSON (detected from the file
//! extension), then overridden from `PLATEMERGE_*` environment variables
//! and validated.
//!
//! # Example
//!
//! ```no_run
//! use platemerge_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load_with_overrides("platemerge.toml").await?;
//!
//!     println!("Gap tolerance: {} frames", config.merge.gap_tolerance);
//!     println!("Output timeline: {}", config.merge.output_timeline);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::{Config, MergeConfig, ObservabilityConfig};
pub use validation::Validator;
