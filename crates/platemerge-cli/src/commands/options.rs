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


//! Options shared by the commands that read a project snapshot.

use anyhow::{Context, Result};
use clap::Args;
use platemerge_coalesce::{GroupKey, MergeMode};
use platemerge_config::{MergeConfig, Validator};
use platemerge_project::ProjectSnapshot;
use std::path::PathBuf;

/// Snapshot path plus per-run overrides of the `[merge]` configuration
#[derive(Args, Debug)]
pub struct MergeOptions {
    /// Project snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Largest gap in frames that still merges two usages
    #[arg(short, long, value_name = "FRAMES")]
    pub gap: Option<u64>,

    /// Plates to keep: keep_all or best_combination
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<MergeMode>,

    /// Regular expression selecting timelines by name
    #[arg(short, long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Ignore clips labelled with this colour
    #[arg(long, value_name = "COLOR")]
    pub skip_color: Option<String>,

    /// Ignore video tracks with this name (repeatable)
    #[arg(long = "exclude-track", value_name = "TRACK")]
    pub exclude_tracks: Vec<String>,

    /// Group usages by source_clip, reel_name or file_name
    #[arg(long, value_name = "KEY")]
    pub group_by: Option<GroupKey>,
}

impl MergeOptions {
    /// `base` with this run's overrides applied, validated
    pub fn merge_config(&self, base: &MergeConfig) -> Result<MergeConfig> {
        let mut config = base.clone();
        if let Some(gap) = self.gap {
            config.gap_tolerance = gap;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(filter) = &self.filter {
            config.timeline_filter.clone_from(filter);
        }
        if let Some(color) = &self.skip_color {
            config.skip_color = Some(color.clone());
        }
        if !self.exclude_tracks.is_empty() {
            config.excluded_tracks.clone_from(&self.exclude_tracks);
        }
        if let Some(key) = self.group_by {
            config.group_by = key;
        }

        config.validate().context("Invalid merge options")?;
        Ok(config)
    }

    /// Read the snapshot named on the command line
    pub async fn load_snapshot(&self) -> Result<ProjectSnapshot> {
        ProjectSnapshot::load(&self.snapshot)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.snapshot.display()))
    }
}
