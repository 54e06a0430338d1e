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
use crate::schema::Config;
use crate::validation::Validator;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let format = ConfigFormat::from_path(path)?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config: Config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        debug!("Configuration loaded from {}", format.name());

        if self.validate {
            config.validate()?;
        }

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Config> {
        let config = self.load_file(path).await?;
        self.finish(config)
    }

    /// Load `path` if given, otherwise start from defaults; environment
    /// overrides apply either way
    pub async fn load_or_default<P: AsRef<Path>>(&self, path: Option<P>) -> ConfigResult<Config> {
        match path {
            Some(path) => self.load_with_overrides(path).await,
            None => {
                debug!("No configuration file given, using defaults");
                self.finish(Config::default())
            }
        }
    }

    fn finish(&self, mut config: Config) -> ConfigResult<Config> {
        self.apply_env_overrides(&mut config)?;
        if self.validate {
            config.validate()?;
            info!("Configuration validated successfully");
        }
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&self, config: &mut Config) -> ConfigResult<()> {
        // Merge settings
        if let Ok(value) = std::env::var("PLATEMERGE_GAP_TOLERANCE") {
            config.merge.gap_tolerance = value.trim().parse().map_err(|_| {
                ConfigError::env_var_parsing_error(
                    "PLATEMERGE_GAP_TOLERANCE",
                    &value,
                    "expected a non-negative frame count",
                )
            })?;
        }
        if let Ok(value) = std::env::var("PLATEMERGE_MERGE_MODE") {
            config.merge.mode = value.parse().map_err(|_| {
                ConfigError::env_var_parsing_error(
                    "PLATEMERGE_MERGE_MODE",
                    &value,
                    "expected 'keep_all' or 'best_combination'",
                )
            })?;
        }
        if let Ok(value) = std::env::var("PLATEMERGE_TIMELINE_FILTER") {
            config.merge.timeline_filter = value;
        }
        if let Ok(value) = std::env::var("PLATEMERGE_SKIP_COLOR") {
            config.merge.skip_color = Some(value).filter(|color| !color.trim().is_empty());
        }
        if let Ok(value) = std::env::var("PLATEMERGE_EXCLUDED_TRACKS") {
            config.merge.excluded_tracks = value
                .split(',')
                .map(str::trim)
                .filter(|track| !track.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(value) = std::env::var("PLATEMERGE_GROUP_BY") {
            config.merge.group_by = value.parse().map_err(|_| {
                ConfigError::env_var_parsing_error(
                    "PLATEMERGE_GROUP_BY",
                    &value,
                    "expected 'source_clip', 'reel_name' or 'file_name'",
                )
            })?;
        }
        if let Ok(value) = std::env::var("PLATEMERGE_OUTPUT_TIMELINE") {
            config.merge.output_timeline = value;
        }

        // Observability settings
        if let Ok(value) = std::env::var("PLATEMERGE_LOG_LEVEL") {
            config.observability.log_level = Some(value);
        }
        if let Ok(value) = std::env::var("PLATEMERGE_LOG_FORMAT") {
            config.observability.log_format = value;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
