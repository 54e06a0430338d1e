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

//! Gap-tolerant coalescing of occurrence groups into plates
//!
//! Each group is reduced independently:
//!
//! 1. Intervals are deduplicated and sorted by start (the group keeps them
//!    that way already).
//! 2. A running envelope is seeded from the first interval.
//! 3. Every following interval that starts no more than `gap_tolerance`
//!    frames after the envelope's end extends it; any other interval closes
//!    the envelope and seeds a new one.
//!
//! Envelopes in start order are the group's plates. Nested intervals start
//! inside the envelope and are absorbed without changing it.
//!
//! # Example
//!
//! ```rust
//! use platemerge_coalesce::{Coalescer, Interval, OccurrenceGroup};
//!
//! # fn main() -> platemerge_coalesce::Result<()> {
//! let group = OccurrenceGroup::from_intervals(
//!     "A001C003",
//!     [Interval::new(0, 10)?, Interval::new(12, 20)?, Interval::new(50, 60)?],
//! );
//!
//! let plates = Coalescer::new(5).coalesce(&group)?;
//! assert_eq!(plates.len(), 2);
//! assert_eq!((plates[0].start, plates[0].end), (0, 20));
//! # Ok(())
//! # }
//! ```

use crate::collaborator::{OccurrenceSource, TimelineFilter};
use crate::error::{CoalesceError, Result};
use crate::group::OccurrenceGroup;
use crate::interval::{Interval, SourceClipId};
use crate::plate::{MediaType, Plate};
use crate::summary::MergeSummary;
use platemerge_timecode::FrameCount;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Which coalesced plates of a group are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Keep every coalesced plate (default)
    #[default]
    KeepAll,

    /// Keep only the contiguous run of plates covering the most frames.
    /// Drops coverage; opt-in only.
    BestCombination,
}

impl FromStr for MergeMode {
    type Err = CoalesceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "keep_all" | "all" => Ok(MergeMode::KeepAll),
            "best_combination" | "best" => Ok(MergeMode::BestCombination),
            _ => Err(CoalesceError::UnknownName {
                kind: "merge mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::KeepAll => f.write_str("keep_all"),
            MergeMode::BestCombination => f.write_str("best_combination"),
        }
    }
}

/// Plates from every group plus the groups that failed
#[derive(Debug, Default)]
pub struct CoalesceReport {
    /// Plates of all successful groups, ordered by source id then start
    pub plates: Vec<Plate>,

    /// Groups that produced no plates, with the reason
    pub failures: Vec<(SourceClipId, CoalesceError)>,
}

impl CoalesceReport {
    /// Whether every group coalesced
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Plates cut from one source clip
    pub fn plates_for<'a>(&'a self, source: &'a SourceClipId) -> impl Iterator<Item = &'a Plate> + 'a {
        self.plates.iter().filter(move |plate| &plate.source == source)
    }
}

/// Result of enumerating and coalescing one set of timelines
#[derive(Debug)]
pub struct MergeRun {
    /// Groups as supplied by the occurrence source
    pub groups: Vec<OccurrenceGroup>,

    /// Coalesced plates
    pub report: CoalesceReport,
}

impl MergeRun {
    /// Per-source summary of which shots each plate absorbed
    pub fn summary(&self) -> MergeSummary {
        MergeSummary::new(&self.groups, &self.report)
    }
}

/// Gap-tolerant occurrence coalescer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coalescer {
    gap_tolerance: FrameCount,
    mode: MergeMode,
    track_index: u32,
}

impl Default for Coalescer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Coalescer {
    /// Create a coalescer that merges intervals at most `gap_tolerance`
    /// frames apart
    pub fn new(gap_tolerance: FrameCount) -> Self {
        Coalescer {
            gap_tolerance,
            mode: MergeMode::KeepAll,
            track_index: 1,
        }
    }

    /// Select which plates are kept
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Destination track index stamped on every plate
    pub fn with_track_index(mut self, track_index: u32) -> Self {
        self.track_index = track_index;
        self
    }

    /// Configured gap tolerance in frames
    pub fn gap_tolerance(&self) -> FrameCount {
        self.gap_tolerance
    }

    /// Configured merge mode
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Coalesce one group into plates in ascending start order
    #[instrument(level = "debug", skip(self, group), fields(source = %group.source(), intervals = group.len()))]
    pub fn coalesce(&self, group: &OccurrenceGroup) -> Result<Vec<Plate>> {
        if group.is_empty() {
            return Err(CoalesceError::EmptyGroup(group.source().clone()));
        }

        let mut envelopes: Vec<(Interval, Vec<String>)> = Vec::new();
        for (interval, labels) in group.entries() {
            match envelopes.last_mut() {
                Some((current, usages)) if current.within_gap(interval, self.gap_tolerance) => {
                    *current = current.envelope(interval);
                    usages.extend_from_slice(labels);
                }
                _ => envelopes.push((*interval, labels.to_vec())),
            }
        }

        let mut plates: Vec<Plate> = envelopes
            .into_iter()
            .map(|(interval, usages)| Plate {
                source: group.source().clone(),
                start: interval.start(),
                end: interval.end(),
                media_type: MediaType::Video,
                track_index: self.track_index,
                usages,
            })
            .collect();

        debug!(plates = plates.len(), "Coalesced group");

        if self.mode == MergeMode::BestCombination {
            let keep = best_contiguous_run(&plates);
            if keep.len() < plates.len() {
                debug!(
                    kept = keep.len(),
                    dropped = plates.len() - keep.len(),
                    "Discarded plates outside the best combination"
                );
            }
            plates.truncate(keep.end);
            plates.drain(..keep.start);
        }

        Ok(plates)
    }

    /// Coalesce every group. Groups are processed in parallel; a failing
    /// group is reported and the others are unaffected.
    pub fn coalesce_all(&self, groups: &[OccurrenceGroup]) -> CoalesceReport {
        let mut results: Vec<(SourceClipId, Result<Vec<Plate>>)> = groups
            .par_iter()
            .map(|group| (group.source().clone(), self.coalesce(group)))
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = CoalesceReport::default();
        for (source, result) in results {
            match result {
                Ok(plates) => report.plates.extend(plates),
                Err(e) => {
                    warn!(source = %source, error = %e, "Group produced no plates");
                    report.failures.push((source, e));
                }
            }
        }
        report
    }

    /// Enumerate occurrences from `source` and coalesce them
    #[instrument(skip(self, source, filter), fields(gap = self.gap_tolerance, mode = %self.mode))]
    pub fn run<S: OccurrenceSource + ?Sized>(
        &self,
        source: &S,
        filter: &TimelineFilter,
    ) -> Result<MergeRun> {
        let groups = source.enumerate_occurrences(filter)?;
        let report = self.coalesce_all(&groups);

        info!(
            sources = groups.len(),
            plates = report.plates.len(),
            failures = report.failures.len(),
            "Merge run complete"
        );

        Ok(MergeRun { groups, report })
    }
}

/// Coalesce bare intervals with the keep-all rule.
///
/// Input order and duplicates do not matter.
pub fn merge_intervals(
    intervals: impl IntoIterator<Item = Interval>,
    gap_tolerance: FrameCount,
) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut merged: Vec<Interval> = Vec::new();
    for interval in sorted {
        match merged.last_mut() {
            Some(current) if current.within_gap(&interval, gap_tolerance) => {
                *current = current.envelope(&interval);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Contiguous run of plates with the largest total length.
///
/// The first maximal run found (earliest start, then shortest) wins. When
/// every plate is zero-length the first plate is kept so the group never
/// vanishes.
fn best_contiguous_run(plates: &[Plate]) -> Range<usize> {
    if plates.is_empty() {
        return 0..0;
    }

    let mut prefix = Vec::with_capacity(plates.len() + 1);
    prefix.push(0u64);
    for plate in plates {
        let total = prefix.last().copied().unwrap_or(0);
        prefix.push(total + plate.len());
    }

    let mut best = 0..1;
    let mut best_len = plates[0].len();
    for i in 0..plates.len() {
        for j in i..plates.len() {
            let covered = prefix[j + 1] - prefix[i];
            if covered > best_len {
                best = i..j + 1;
                best_len = covered;
            }
        }
    }
    best
}
