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
use platemerge_config::Config;

/// Show which shots each plate would absorb, without writing a timeline
#[derive(Parser, Debug)]
pub struct SummaryCmd {
    #[command(flatten)]
    pub options: MergeOptions,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryCmd {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let merge = self.options.merge_config(&config.merge)?;
        let snapshot = self.options.load_snapshot().await?;
        let filter = merge.timeline_filter()?;

        let run = merge
            .coalescer()
            .run(&snapshot.grouped_by(merge.group_by), &filter)
            .context("Failed to collect clip usages")?;
        let summary = run.summary();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        output::header(&format!(
            "{} (gap {} frames, {})",
            if snapshot.name.is_empty() { "Merge summary" } else { &snapshot.name },
            merge.gap_tolerance,
            merge.mode
        ));
        for (source, lines) in &summary.entries {
            println!("{}", source);
            for line in lines {
                println!("  {}", line);
            }
        }
        output::success(&summary.status_line());
        Ok(())
    }
}
