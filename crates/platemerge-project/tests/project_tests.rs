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

#![allow(clippy::unwrap_used)]
//! Project adapter tests
//!
//! - Timeline filter, clip colour and track exclusion
//! - Head-in normalisation, including drop-frame and missing start timecode
//! - Snapshot loading and sink output

use platemerge_coalesce::{
    ClipColor, CoalesceError, Coalescer, GroupKey, OccurrenceSource, SourceClipId, TimelineFilter,
    TimelineSink,
};
use platemerge_timecode::TimecodeError;
use platemerge_project::{JsonTimelineSink, ProjectError, ProjectSnapshot};
use std::io::Write;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
    "name": "feature",
    "sources": [
        {"id": "mpi-a", "name": "A001C003", "fps": 24.0, "start_tc": "01:00:00:00"},
        {"id": "mpi-b", "name": "B002C001", "fps": 29.97, "drop_frame": true, "start_tc": "00:01:00;02"},
        {"id": "mpi-c", "name": "C003C007", "fps": 25.0},
        {"id": "mpi-unused", "name": "UNUSED", "fps": 24.0, "start_tc": "10:00:00:00"}
    ],
    "timelines": [
        {"name": "reel_1_v3", "fps": "24", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 0, "right_offset": 48},
                {"name": "B002C001", "source": "mpi-b", "left_offset": 10, "right_offset": 40},
                {"name": "Title", "left_offset": 0, "right_offset": 100}
            ]},
            {"name": "Refs", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 1000, "right_offset": 2000}
            ]}
        ]},
        {"name": "reel_1_v4", "fps": "24", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 52, "right_offset": 96},
                {"name": "A001C003", "source": "mpi-a", "color": "Orange", "left_offset": 500, "right_offset": 600},
                {"name": "C003C007", "source": "mpi-c", "color": "", "left_offset": 5, "right_offset": 15}
            ]}
        ]},
        {"name": "trailer", "fps": "24", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 3000, "right_offset": 3100}
            ]}
        ]}
    ]
}"#;

fn snapshot() -> ProjectSnapshot {
    ProjectSnapshot::from_json_str(SNAPSHOT).unwrap()
}

fn reel_filter() -> TimelineFilter {
    TimelineFilter::new("^reel_")
        .unwrap()
        .with_skip_color(Some(ClipColor::Orange))
        .with_excluded_tracks(["Refs"])
}

fn spans(group: &platemerge_coalesce::OccurrenceGroup) -> Vec<(u64, u64)> {
    group.intervals().map(|i| (i.start(), i.end())).collect()
}

#[test]
fn test_selected_timelines_sorted() {
    let snapshot = snapshot();
    assert_eq!(
        snapshot.selected_timelines(&TimelineFilter::new("reel").unwrap()),
        vec!["reel_1_v3", "reel_1_v4"]
    );
    assert_eq!(snapshot.selected_timelines(&TimelineFilter::all()).len(), 3);
}

#[test]
fn test_timeline_order_does_not_change_labels() {
    let forward = snapshot();
    let mut reversed = snapshot();
    reversed.timelines.reverse();

    assert_eq!(
        forward.selected_timelines(&reel_filter()),
        reversed.selected_timelines(&reel_filter())
    );

    let coalescer = Coalescer::new(10);
    let forward_run = coalescer.run(&forward, &reel_filter()).unwrap();
    let reversed_run = coalescer.run(&reversed, &reel_filter()).unwrap();
    assert_eq!(forward_run.report.plates, reversed_run.report.plates);
    assert_eq!(forward_run.summary(), reversed_run.summary());
    assert_eq!(
        reversed_run.report.plates[0].describe(),
        "reel_1_v3-1-0000-A001C003 <- reel_1_v4-1-0000-A001C003"
    );
}

#[test]
fn test_unreadable_timeline_rate() {
    let mut snapshot = snapshot();
    snapshot.timelines[0].fps = "fast".into();

    let err = snapshot.enumerate_occurrences(&reel_filter()).unwrap_err();
    assert!(matches!(err, CoalesceError::Timecode(TimecodeError::InvalidFrameRate(_))));

    // Timelines the filter rejects are never inspected
    assert!(snapshot
        .enumerate_occurrences(&TimelineFilter::new("^reel_1_v4$").unwrap())
        .is_ok());
}

#[test]
fn test_enumerate_applies_filters() {
    let groups = snapshot().enumerate_occurrences(&reel_filter()).unwrap();
    let ids: Vec<_> = groups.iter().map(|g| g.source().as_str()).collect();
    assert_eq!(ids, vec!["mpi-a", "mpi-b", "mpi-c"]);

    // Refs track, Orange clip and trailer timeline are all excluded
    assert_eq!(spans(&groups[0]), vec![(86_400, 86_448), (86_452, 86_496)]);
}

#[test]
fn test_drop_frame_head_in() {
    let groups = snapshot().enumerate_occurrences(&reel_filter()).unwrap();
    assert_eq!(spans(&groups[1]), vec![(1_810, 1_840)]);
}

#[test]
fn test_missing_start_tc_uses_frame_zero() {
    let groups = snapshot().enumerate_occurrences(&reel_filter()).unwrap();
    assert_eq!(spans(&groups[2]), vec![(5, 15)]);
}

#[test]
fn test_usage_labels() {
    let groups = snapshot().enumerate_occurrences(&reel_filter()).unwrap();
    let report = Coalescer::new(10).coalesce_all(&groups);
    assert_eq!(
        report.plates[0].usages,
        vec!["reel_1_v3-1-0000-A001C003", "reel_1_v4-1-0000-A001C003"]
    );
}

#[test]
fn test_unknown_source_reference() {
    let mut snapshot = snapshot();
    snapshot.sources.retain(|s| s.id.as_str() != "mpi-b");

    let err = snapshot.enumerate_occurrences(&reel_filter()).unwrap_err();
    assert_eq!(err, CoalesceError::UnknownSourceClip("mpi-b".into()));
}

#[test]
fn test_merge_into_sink() {
    let snapshot = snapshot();
    let run = Coalescer::new(10).run(&snapshot, &reel_filter()).unwrap();
    assert_eq!(run.summary().status_line(), "3 sources, 4 shots 3 plates");

    let mut sink = JsonTimelineSink::for_snapshot(&snapshot);
    sink.build_timeline("merged", &run.report.plates).unwrap();

    let items: Vec<_> = sink.timelines()[0]
        .items
        .iter()
        .map(|i| (i.media_pool_item.as_str(), i.start_frame, i.end_frame))
        .collect();
    assert_eq!(
        items,
        vec![("mpi-a", 0, 95), ("mpi-b", 10, 39), ("mpi-c", 5, 14)]
    );
}

#[test]
fn test_head_in_lookup() {
    let snapshot = snapshot();
    assert_eq!(snapshot.head_in(&SourceClipId::from("mpi-a")).unwrap(), 86_400);
    assert!(matches!(
        snapshot.head_in(&SourceClipId::from("nope")).unwrap_err(),
        ProjectError::UnknownSource(_)
    ));
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();

    let snapshot = ProjectSnapshot::load(file.path()).await.unwrap();
    assert_eq!(snapshot.name, "feature");
    assert_eq!(snapshot.timelines.len(), 3);
}

#[tokio::test]
async fn test_load_missing_file() {
    let err = ProjectSnapshot::load("/nonexistent/snapshot.json").await.unwrap_err();
    assert!(matches!(err, ProjectError::FileNotFound(_)));
}

#[tokio::test]
async fn test_sink_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("merged.json");

    let mut sink = JsonTimelineSink::for_snapshot(&snapshot());
    sink.build_timeline("empty", &[]).unwrap();
    sink.write_to(&out).await.unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"name\": \"empty\""));
}

const REELS: &str = r#"{
    "name": "reels",
    "sources": [
        {"id": "mpi-x", "fps": 24.0, "start_tc": "01:00:00:00", "reel_name": "A001", "file_name": "A001_01.mov"},
        {"id": "mpi-y", "fps": 24.0, "start_tc": "01:00:02:00", "reel_name": "A001", "file_name": "A001_02.mov"},
        {"id": "mpi-z", "fps": 24.0, "start_tc": "02:00:00:00"}
    ],
    "timelines": [
        {"name": "reel_1", "tracks": [{"name": "Video 1", "clips": [
            {"name": "shot_010", "source": "mpi-y", "left_offset": 0, "right_offset": 24},
            {"name": "shot_020", "source": "mpi-x", "left_offset": 0, "right_offset": 48},
            {"name": "shot_030", "source": "mpi-z", "left_offset": 0, "right_offset": 10}
        ]}]}
    ]
}"#;

#[test]
fn test_group_by_reel_name() {
    let snapshot = ProjectSnapshot::from_json_str(REELS).unwrap();

    let by_clip = snapshot.enumerate_occurrences(&TimelineFilter::all()).unwrap();
    assert_eq!(by_clip.len(), 3);

    let by_reel = snapshot
        .grouped_by(GroupKey::ReelName)
        .enumerate_occurrences(&TimelineFilter::all())
        .unwrap();
    let ids: Vec<_> = by_reel.iter().map(|g| g.source().as_str()).collect();
    assert_eq!(ids, vec!["mpi-x", "mpi-z"]);
    assert_eq!(spans(&by_reel[0]), vec![(86_400, 86_448), (86_448, 86_472)]);

    let run = Coalescer::new(0)
        .run(&snapshot.grouped_by(GroupKey::ReelName), &TimelineFilter::all())
        .unwrap();
    assert_eq!(run.summary().status_line(), "2 sources, 3 shots 2 plates");

    let mut sink = JsonTimelineSink::for_snapshot(&snapshot);
    sink.build_timeline("merged", &run.report.plates).unwrap();
    let item = &sink.timelines()[0].items[0];
    assert_eq!(item.media_pool_item.as_str(), "mpi-x");
    assert_eq!((item.start_frame, item.end_frame), (0, 71));
}

#[test]
fn test_group_by_file_name_keeps_distinct_files_apart() {
    let snapshot = ProjectSnapshot::from_json_str(REELS).unwrap();
    let groups = snapshot
        .grouped_by(GroupKey::FileName)
        .enumerate_occurrences(&TimelineFilter::all())
        .unwrap();
    assert_eq!(groups.len(), 3);
}
