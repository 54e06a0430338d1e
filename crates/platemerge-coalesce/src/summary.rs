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


//! Human-readable account of what a merge run absorbed

use crate::coalescer::CoalesceReport;
use crate::group::OccurrenceGroup;
use crate::interval::SourceClipId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Per-source plate descriptions plus run totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// One line per plate, grouped by source clip
    pub entries: BTreeMap<SourceClipId, Vec<String>>,

    /// Source clips with at least one usage
    pub sources: usize,

    /// Clip usages enumerated, duplicates included
    pub shots: usize,

    /// Plates produced
    pub plates: usize,
}

impl MergeSummary {
    /// Summarise `report` against the groups it was built from
    pub fn new(groups: &[OccurrenceGroup], report: &CoalesceReport) -> Self {
        let mut entries: BTreeMap<SourceClipId, Vec<String>> = BTreeMap::new();
        for plate in &report.plates {
            entries
                .entry(plate.source.clone())
                .or_default()
                .push(plate.describe());
        }

        MergeSummary {
            entries,
            sources: groups.len(),
            shots: groups.iter().map(OccurrenceGroup::usages).sum(),
            plates: report.plates.len(),
        }
    }

    /// Totals line, e.g. `3 sources, 7 shots 4 plates`
    pub fn status_line(&self) -> String {
        format!(
            "{} sources, {} shots {} plates",
            self.sources, self.shots, self.plates
        )
    }
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, lines) in &self.entries {
            writeln!(f, "{}", source)?;
            for line in lines {
                writeln!(f, "  {}", line)?;
            }
        }
        write!(f, "{}", self.status_line())
    }
}
