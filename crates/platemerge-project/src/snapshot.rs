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


//! Project snapshots as an occurrence source

use crate::error::{ProjectError, Result};
use crate::model::{SourceClip, Timeline};
use platemerge_coalesce::{
    CoalesceError, GroupKey, OccurrenceGroup, OccurrenceIndex, OccurrenceSource, SourceClipId,
    TimelineFilter,
};
use platemerge_timecode::FrameCount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Everything needed to merge timelines, extracted from the host in one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project name
    #[serde(default)]
    pub name: String,

    /// Media pool items referenced by timeline clips
    #[serde(default)]
    pub sources: Vec<SourceClip>,

    /// Timelines in project order
    #[serde(default)]
    pub timelines: Vec<Timeline>,
}

impl ProjectSnapshot {
    /// Read a snapshot from a JSON file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading project snapshot from: {}", path.display());

        if !path.exists() {
            return Err(ProjectError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let snapshot = Self::from_json_str(&content)?;

        info!(
            sources = snapshot.sources.len(),
            timelines = snapshot.timelines.len(),
            "Loaded project snapshot {}",
            path.display()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Look up a source clip by id
    pub fn source(&self, id: &SourceClipId) -> Option<&SourceClip> {
        self.sources.iter().find(|source| &source.id == id)
    }

    /// Head-in of a source clip in its own frame space
    pub fn head_in(&self, id: &SourceClipId) -> Result<FrameCount> {
        let source = self
            .source(id)
            .ok_or_else(|| ProjectError::UnknownSource(id.clone()))?;
        Ok(source.head_in()?)
    }

    /// Timelines the filter selects, ordered by name.
    ///
    /// Timelines sharing a name keep their project order.
    pub fn timelines_matching(&self, filter: &TimelineFilter) -> Vec<&Timeline> {
        let mut timelines: Vec<&Timeline> = self
            .timelines
            .iter()
            .filter(|timeline| filter.matches_timeline(&timeline.name))
            .collect();
        timelines.sort_by(|a, b| a.name.cmp(&b.name));
        timelines
    }

    /// Sorted names of the timelines the filter selects
    pub fn selected_timelines(&self, filter: &TimelineFilter) -> Vec<&str> {
        self.timelines_matching(filter)
            .into_iter()
            .map(|timeline| timeline.name.as_str())
            .collect()
    }

    /// Occurrence source that groups usages by `key` instead of by media
    /// pool item
    pub fn grouped_by(&self, key: GroupKey) -> GroupedSnapshot<'_> {
        GroupedSnapshot { snapshot: self, key }
    }

    /// Source each source clip's usages are recorded against.
    ///
    /// Sources sharing a grouping value are recorded against the one with
    /// the earliest head-in, so every plate starts at or after its head-in.
    /// Sources without a value, or whose head-in cannot be resolved, stay
    /// on their own.
    fn group_targets(&self, key: GroupKey) -> BTreeMap<&SourceClipId, &SourceClipId> {
        let mut earliest: BTreeMap<&str, (FrameCount, &SourceClipId)> = BTreeMap::new();
        for source in &self.sources {
            let Some(value) = source.group_value(key) else {
                continue;
            };
            let head_in = match source.head_in() {
                Ok(head_in) => head_in,
                Err(e) => {
                    debug!(source = %source.id, error = %e, "Head-in unavailable, not grouping");
                    continue;
                }
            };
            let candidate = (head_in, &source.id);
            earliest
                .entry(value)
                .and_modify(|best| {
                    if candidate < *best {
                        *best = candidate;
                    }
                })
                .or_insert(candidate);
        }

        self.sources
            .iter()
            .filter_map(|source| {
                let (_, target) = earliest.get(source.group_value(key)?)?;
                Some((&source.id, *target))
            })
            .collect()
    }
}

/// A [`ProjectSnapshot`] enumerated with a non-default [`GroupKey`]
#[derive(Debug, Clone, Copy)]
pub struct GroupedSnapshot<'a> {
    snapshot: &'a ProjectSnapshot,
    key: GroupKey,
}

impl OccurrenceSource for ProjectSnapshot {
    fn enumerate_occurrences(
        &self,
        filter: &TimelineFilter,
    ) -> platemerge_coalesce::Result<Vec<OccurrenceGroup>> {
        self.grouped_by(GroupKey::SourceClip)
            .enumerate_occurrences(filter)
    }
}

impl OccurrenceSource for GroupedSnapshot<'_> {
    #[instrument(skip(self, filter), fields(project = %self.snapshot.name, key = %self.key))]
    fn enumerate_occurrences(
        &self,
        filter: &TimelineFilter,
    ) -> platemerge_coalesce::Result<Vec<OccurrenceGroup>> {
        let snapshot = self.snapshot;
        let mut index = OccurrenceIndex::new();
        for source in &snapshot.sources {
            index.register_source(source.id.clone());
        }

        let targets = snapshot.group_targets(self.key);
        let mut head_ins: BTreeMap<&SourceClipId, FrameCount> = BTreeMap::new();
        let mut timelines = 0usize;

        for timeline in snapshot.timelines_matching(filter) {
            timelines += 1;
            let rate = timeline.rate()?;
            debug!(timeline = %timeline.name, %rate, "Analyzing timeline");

            for (track_index, track) in timeline.tracks.iter().enumerate() {
                if filter.excludes_track(&track.name) {
                    debug!(timeline = %timeline.name, track = %track.name, "Skipping excluded track");
                    continue;
                }

                for (clip_index, clip) in track.clips.iter().enumerate() {
                    let Some(source_id) = clip.source.as_ref() else {
                        debug!(clip = %clip.name, "Clip has no media pool item, skipping");
                        continue;
                    };
                    if filter.skips_color(clip.color) {
                        debug!(clip = %clip.name, color = ?clip.color, "Skipping clip by colour");
                        continue;
                    }

                    let head_in = match head_ins.get(source_id) {
                        Some(head_in) => *head_in,
                        None => {
                            let source = snapshot.source(source_id).ok_or_else(|| {
                                CoalesceError::UnknownSourceClip(source_id.clone())
                            })?;
                            let head_in = source.head_in()?;
                            head_ins.insert(source_id, head_in);
                            head_in
                        }
                    };

                    let interval = clip.interval(head_in)?;
                    let label = timeline.usage_label(track_index + 1, clip_index, clip);
                    let group = targets.get(source_id).copied().unwrap_or(source_id);
                    debug!(clip = %clip.name, %interval, group = %group, "Recorded usage");
                    index.record(group, interval, label)?;
                }
            }
        }

        let groups = index.into_groups();
        info!(timelines, sources = groups.len(), "Enumerated occurrences");
        Ok(groups)
    }
}
