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


//! Occurrence coalescing for PlateMerge
//!
//! Groups every usage of a source clip across the selected timelines, then
//! merges usages that overlap or sit within a gap tolerance of each other
//! into plates: the minimal set of source ranges that covers them all.
//!
//! # Example
//!
//! ```rust
//! use platemerge_coalesce::{Coalescer, Interval, OccurrenceIndex, SourceClipId};
//!
//! # fn main() -> platemerge_coalesce::Result<()> {
//! let mut index = OccurrenceIndex::new();
//! index.register_source("A001C003");
//!
//! let id = SourceClipId::from("A001C003");
//! index.record(&id, Interval::new(0, 10)?, "cut-1-0000-A001C003")?;
//! index.record(&id, Interval::new(12, 20)?, "cut-1-0001-A001C003")?;
//!
//! let report = Coalescer::new(5).coalesce_all(&index.into_groups());
//! assert_eq!(report.plates.len(), 1);
//! assert_eq!(report.plates[0].usages.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod coalescer;
pub mod collaborator;
pub mod error;
pub mod group;
pub mod interval;
pub mod plate;
pub mod summary;

pub use coalescer::{merge_intervals, CoalesceReport, Coalescer, MergeMode, MergeRun};
pub use collaborator::{ClipColor, GroupKey, OccurrenceSource, TimelineFilter, TimelineSink};
pub use error::{CoalesceError, Result};
pub use group::{OccurrenceGroup, OccurrenceIndex};
pub use interval::{Interval, SourceClipId};
pub use plate::{MediaType, Plate};
pub use summary::MergeSummary;

pub use platemerge_timecode::FrameCount;
