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

use platemerge_coalesce::{ClipColor, Coalescer, GroupKey, MergeMode, TimelineFilter};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Merge behaviour
    pub merge: MergeConfig,

    /// Logging settings
    pub observability: ObservabilityConfig,
}

/// How timelines are merged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergeConfig {
    /// Largest gap in frames between two usages that still merges them
    #[serde(default = "default_gap_tolerance")]
    pub gap_tolerance: u64,

    /// Which coalesced plates to keep
    #[serde(default)]
    pub mode: MergeMode,

    /// Regular expression selecting timelines by name; empty selects all
    #[serde(default)]
    pub timeline_filter: String,

    /// Clips labelled with this colour are ignored
    #[serde(default)]
    pub skip_color: Option<String>,

    /// Video track names to ignore
    #[serde(default)]
    pub excluded_tracks: Vec<String>,

    /// Source property that groups usages into shared plates
    #[serde(default)]
    pub group_by: GroupKey,

    /// Name of the timeline to create
    #[serde(default = "default_output_timeline")]
    pub output_timeline: String,

    /// Destination track for plates (1-based)
    #[serde(default = "default_track_index")]
    pub track_index: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            gap_tolerance: default_gap_tolerance(),
            mode: MergeMode::default(),
            timeline_filter: String::new(),
            skip_color: None,
            excluded_tracks: Vec::new(),
            group_by: GroupKey::default(),
            output_timeline: default_output_timeline(),
            track_index: default_track_index(),
        }
    }
}

impl MergeConfig {
    /// Parsed skip colour, if one is set
    pub fn skip_color(&self) -> ConfigResult<Option<ClipColor>> {
        match self.skip_color.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::invalid_value("merge.skip_color", format!("{}", e))),
        }
    }

    /// Timeline filter described by this configuration
    pub fn timeline_filter(&self) -> ConfigResult<TimelineFilter> {
        let filter = TimelineFilter::new(&self.timeline_filter)
            .map_err(|e| ConfigError::invalid_value("merge.timeline_filter", e.to_string()))?;
        Ok(filter
            .with_skip_color(self.skip_color()?)
            .with_excluded_tracks(self.excluded_tracks.iter().cloned()))
    }

    /// Coalescer described by this configuration
    pub fn coalescer(&self) -> Coalescer {
        Coalescer::new(self.gap_tolerance)
            .with_mode(self.mode)
            .with_track_index(self.track_index)
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Logging level; when unset, `RUST_LOG` applies, then `info`
    #[serde(default)]
    pub log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: None,
            log_format: default_log_format(),
        }
    }
}

fn default_gap_tolerance() -> u64 {
    10
}

fn default_output_timeline() -> String {
    "merged".to_string()
}

fn default_track_index() -> u32 {
    1
}

fn default_log_format() -> String {
    "pretty".to_string()
}
