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

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{Config, MergeConfig, ObservabilityConfig};

/// Trait for validating configuration
pub trait Validator {
    /// Check the configuration, returning the first problem found
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for Config {
    fn validate(&self) -> ConfigResult<()> {
        self.merge.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl Validator for MergeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.output_timeline.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "merge.output_timeline".to_string(),
            ));
        }

        if self.track_index == 0 {
            return Err(ConfigError::invalid_value(
                "merge.track_index",
                "track indices start at 1",
            ));
        }

        // compiles the filter and parses the skip colour
        self.timeline_filter()?;

        Ok(())
    }
}

impl Validator for ObservabilityConfig {
    fn validate(&self) -> ConfigResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if let Some(level) = &self.log_level {
            if !valid_levels.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::invalid_value(
                    "observability.log_level",
                    format!("must be one of: {}", valid_levels.join(", ")),
                ));
            }
        }

        let valid_formats = ["pretty", "compact", "json"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "observability.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        Ok(())
    }
}
