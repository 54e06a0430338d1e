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


//! JSON timeline sink
//!
//! Collects merged timelines in the shape a host append call expects: one
//! item per plate, with frames relative to the source clip's head-in and an
//! inclusive end frame. Plates covering no frames have nothing to append and
//! are left out.

use crate::error::{ProjectError, Result};
use crate::snapshot::ProjectSnapshot;
use platemerge_coalesce::{Plate, SourceClipId, TimelineSink};
use platemerge_timecode::FrameCount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// One clip to append to the new timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Media pool item to cut from
    pub media_pool_item: SourceClipId,

    /// First frame, relative to the item's head-in
    pub start_frame: FrameCount,

    /// Last frame (inclusive), relative to the item's head-in
    pub end_frame: FrameCount,

    /// Host media type code (1 = video)
    pub media_type: u8,

    /// Destination track (1-based)
    pub track_index: u32,
}

/// A timeline built from plates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTimeline {
    /// Timeline name
    pub name: String,

    /// Items in append order
    pub items: Vec<TimelineItem>,
}

/// Timeline sink that records merged timelines as plain data
#[derive(Debug, Clone, Default)]
pub struct JsonTimelineSink {
    head_ins: BTreeMap<SourceClipId, FrameCount>,
    timelines: Vec<MergedTimeline>,
}

impl JsonTimelineSink {
    /// Sink with head-ins resolved from `snapshot`.
    ///
    /// Only sources whose head-in can be resolved are known to the sink.
    pub fn for_snapshot(snapshot: &ProjectSnapshot) -> Self {
        let head_ins = snapshot
            .sources
            .iter()
            .filter_map(|source| match source.head_in() {
                Ok(head_in) => Some((source.id.clone(), head_in)),
                Err(e) => {
                    debug!(source = %source.id, error = %e, "Head-in unavailable");
                    None
                }
            })
            .collect();

        JsonTimelineSink {
            head_ins,
            timelines: Vec::new(),
        }
    }

    /// Sink with explicit head-ins
    pub fn with_head_ins(head_ins: impl IntoIterator<Item = (SourceClipId, FrameCount)>) -> Self {
        JsonTimelineSink {
            head_ins: head_ins.into_iter().collect(),
            timelines: Vec::new(),
        }
    }

    /// Timelines built so far
    pub fn timelines(&self) -> &[MergedTimeline] {
        &self.timelines
    }

    /// Consume the sink, returning its timelines
    pub fn into_timelines(self) -> Vec<MergedTimeline> {
        self.timelines
    }

    /// Pretty-printed JSON of every timeline built so far
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.timelines)?)
    }

    /// Write every timeline built so far to `path` as JSON
    pub async fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?).await?;
        info!(timelines = self.timelines.len(), "Wrote merged timelines to {}", path.display());
        Ok(())
    }

    fn item(&self, plate: &Plate) -> Result<Option<TimelineItem>> {
        let head_in = *self
            .head_ins
            .get(&plate.source)
            .ok_or_else(|| ProjectError::UnknownSource(plate.source.clone()))?;

        let start_frame =
            plate
                .start
                .checked_sub(head_in)
                .ok_or_else(|| ProjectError::PlateBeforeHeadIn {
                    clip: plate.source.clone(),
                    start: plate.start,
                    head_in,
                })?;

        if plate.is_empty() {
            warn!(source = %plate.source, start = plate.start, "Skipping plate with no frames");
            return Ok(None);
        }

        Ok(Some(TimelineItem {
            media_pool_item: plate.source.clone(),
            start_frame,
            end_frame: start_frame + plate.len() - 1,
            media_type: plate.media_type.host_code(),
            track_index: plate.track_index,
        }))
    }
}

impl TimelineSink for JsonTimelineSink {
    type Error = ProjectError;

    fn build_timeline(&mut self, name: &str, plates: &[Plate]) -> Result<()> {
        let items = plates
            .iter()
            .filter_map(|plate| self.item(plate).transpose())
            .collect::<Result<Vec<_>>>()?;

        debug!(timeline = name, items = items.len(), "Built merged timeline");
        self.timelines.push(MergedTimeline {
            name: name.to_string(),
            items,
        });
        Ok(())
    }
}
