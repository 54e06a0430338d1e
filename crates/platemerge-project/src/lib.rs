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


//! Project snapshot adapter for PlateMerge
//!
//! This crate provides:
//! - [`ProjectSnapshot`]: eagerly extracted sources and timelines, usable as
//!   an [`OccurrenceSource`](platemerge_coalesce::OccurrenceSource)
//! - [`JsonTimelineSink`]: a [`TimelineSink`](platemerge_coalesce::TimelineSink)
//!   that records merged timelines as host append items
//!
//! # Example
//!
//! ```rust
//! use platemerge_coalesce::{Coalescer, TimelineFilter, TimelineSink};
//! use platemerge_project::{JsonTimelineSink, ProjectSnapshot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = ProjectSnapshot::from_json_str(r#"{
//!     "sources": [{"id": "mpi-1", "fps": 24.0, "start_tc": "01:00:00:00"}],
//!     "timelines": [{"name": "cut_v1", "tracks": [{"name": "Video 1", "clips": [
//!         {"name": "A001", "source": "mpi-1", "left_offset": 0, "right_offset": 48},
//!         {"name": "A001", "source": "mpi-1", "left_offset": 52, "right_offset": 96}
//!     ]}]}]
//! }"#)?;
//!
//! let run = Coalescer::new(10).run(&snapshot, &TimelineFilter::all())?;
//! let mut sink = JsonTimelineSink::for_snapshot(&snapshot);
//! sink.build_timeline("merged", &run.report.plates)?;
//!
//! let item = &sink.timelines()[0].items[0];
//! assert_eq!((item.start_frame, item.end_frame), (0, 95));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod sink;
pub mod snapshot;

pub use error::{ProjectError, Result};
pub use model::{ClipUsage, SourceClip, Timeline, Track};
pub use sink::{JsonTimelineSink, MergedTimeline, TimelineItem};
pub use snapshot::{GroupedSnapshot, ProjectSnapshot};
