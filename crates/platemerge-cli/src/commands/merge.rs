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


use super::options::MergeOptions;
use crate::output;
use anyhow::{Context, Result};
use clap::Parser;
use platemerge_coalesce::TimelineSink;
use platemerge_config::Config;
use platemerge_project::JsonTimelineSink;
use platemerge_observability::{log_info, log_warn};
use std::path::PathBuf;

/// Merge timelines into source plates
///
/// Collects every usage of every source clip on the selected timelines,
/// merges usages that overlap or lie within the gap tolerance, and writes a
/// new timeline with one item per plate.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    # Merge every timeline, 10 frame handles
    platemerge merge project.json

    # Only reel timelines, ignore orange clips and the reference track
    platemerge merge project.json -f '^reel_' --skip-color Orange --exclude-track Refs

    # List the timelines that would be merged
    platemerge merge project.json -f '^reel_' --dry-run")]
pub struct MergeCmd {
    #[command(flatten)]
    pub options: MergeOptions,

    /// Name of the timeline to create
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Where to write the merged timeline (default: <NAME>.json)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Only list the timelines that would be merged
    #[arg(long)]
    pub dry_run: bool,

    /// Also print which shots each plate absorbed
    #[arg(short, long)]
    pub summary: bool,
}

impl MergeCmd {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let mut merge = self.options.merge_config(&config.merge)?;
        if let Some(name) = &self.output {
            merge.output_timeline.clone_from(name);
        }

        let snapshot = self.options.load_snapshot().await?;
        let filter = merge.timeline_filter()?;

        let selected = snapshot.selected_timelines(&filter);
        if self.dry_run {
            output::header(&format!("{} timelines selected", selected.len()));
            for name in selected {
                println!("  {}", name);
            }
            return Ok(());
        }
        if selected.is_empty() {
            output::warning("No timelines match the filter");
        }

        let run = merge
            .coalescer()
            .run(&snapshot.grouped_by(merge.group_by), &filter)
            .context("Failed to collect clip usages")?;
        for (source, error) in &run.report.failures {
            log_warn!("Source clip produced no plates" => { source => source.as_str() });
            output::warning(&format!("{}: {}", source, error));
        }

        let mut sink = JsonTimelineSink::for_snapshot(&snapshot);
        sink.build_timeline(&merge.output_timeline, &run.report.plates)
            .with_context(|| format!("Failed to build timeline '{}'", merge.output_timeline))?;

        let out = self
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", merge.output_timeline)));
        sink.write_to(&out).await?;

        let summary = run.summary();
        if self.summary {
            println!("{}", summary);
        }
        log_info!("Merged timeline written" => {
            timeline => merge.output_timeline.as_str(),
            plates => run.report.plates.len(),
            failures => run.report.failures.len()
        });

        output::success(&summary.status_line());
        output::detail("Timeline", &merge.output_timeline);
        output::detail("Written to", &out.display().to_string());
        Ok(())
    }
}
