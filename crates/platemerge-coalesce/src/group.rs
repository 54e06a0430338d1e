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

//! Occurrence groups: every usage of one source clip across timelines
//!
//! Intervals are kept as a set. Two clip instances that use exactly the same
//! source range collapse into one interval, but both usage labels are kept so
//! the merge summary can still name every shot.

use crate::error::{CoalesceError, Result};
use crate::interval::{Interval, SourceClipId};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// All recorded usages of one source clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceGroup {
    source: SourceClipId,
    intervals: BTreeMap<Interval, Vec<String>>,
    usages: usize,
}

impl OccurrenceGroup {
    /// Create an empty group for `source`
    pub fn new(source: impl Into<SourceClipId>) -> Self {
        OccurrenceGroup {
            source: source.into(),
            intervals: BTreeMap::new(),
            usages: 0,
        }
    }

    /// Create a group from unlabelled intervals
    pub fn from_intervals(
        source: impl Into<SourceClipId>,
        intervals: impl IntoIterator<Item = Interval>,
    ) -> Self {
        let mut group = Self::new(source);
        for interval in intervals {
            group.insert(interval, None);
        }
        group
    }

    /// Record one usage. Returns `false` when the interval was already
    /// present; the label is still kept.
    pub fn insert(&mut self, interval: Interval, label: Option<String>) -> bool {
        self.usages += 1;
        let is_new = !self.intervals.contains_key(&interval);
        let labels = self.intervals.entry(interval).or_default();
        if let Some(label) = label {
            labels.push(label);
        }
        if !is_new {
            trace!(source = %self.source, %interval, "Duplicate interval collapsed");
        }
        is_new
    }

    /// Source clip this group belongs to
    pub fn source(&self) -> &SourceClipId {
        &self.source
    }

    /// Number of distinct intervals
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether no intervals have been recorded
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of usages recorded, duplicates included
    pub fn usages(&self) -> usize {
        self.usages
    }

    /// Distinct intervals in ascending `(start, end)` order
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> + '_ {
        self.intervals.keys()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Interval, &[String])> + '_ {
        self.intervals
            .iter()
            .map(|(interval, labels)| (interval, labels.as_slice()))
    }
}

/// Registry of source clips and their usages, built once per merge run.
///
/// Sources must be registered before usages can be recorded against them.
#[derive(Debug, Default)]
pub struct OccurrenceIndex {
    groups: BTreeMap<SourceClipId, OccurrenceGroup>,
}

impl OccurrenceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source clip. Returns `false` if it was already known.
    pub fn register_source(&mut self, id: impl Into<SourceClipId>) -> bool {
        let id = id.into();
        if self.groups.contains_key(&id) {
            return false;
        }
        debug!(source = %id, "Registered source clip");
        self.groups.insert(id.clone(), OccurrenceGroup::new(id));
        true
    }

    /// Whether `id` has been registered
    pub fn is_registered(&self, id: &SourceClipId) -> bool {
        self.groups.contains_key(id)
    }

    /// Record a usage of a registered source clip
    pub fn record(
        &mut self,
        id: &SourceClipId,
        interval: Interval,
        label: impl Into<String>,
    ) -> Result<()> {
        let group = self
            .groups
            .get_mut(id)
            .ok_or_else(|| CoalesceError::UnknownSourceClip(id.clone()))?;
        group.insert(interval, Some(label.into()));
        Ok(())
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no sources are registered
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups with at least one usage, ordered by source id
    pub fn into_groups(self) -> Vec<OccurrenceGroup> {
        self.groups
            .into_values()
            .filter(|group| {
                if group.is_empty() {
                    debug!(source = %group.source(), "Source clip has no usages, skipping");
                }
                !group.is_empty()
            })
            .collect()
    }
}
