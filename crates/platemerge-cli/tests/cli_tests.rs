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


//! End-to-end tests for the `platemerge` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "name": "feature",
    "sources": [
        {"id": "mpi-a", "name": "A001C003", "fps": 24.0, "start_tc": "01:00:00:00"},
        {"id": "mpi-b", "name": "B002C001", "fps": 24.0, "start_tc": "02:00:00:00"}
    ],
    "timelines": [
        {"name": "reel_1", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 0, "right_offset": 48},
                {"name": "B002C001", "source": "mpi-b", "left_offset": 100, "right_offset": 148}
            ]},
            {"name": "Refs", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 5000, "right_offset": 5100}
            ]}
        ]},
        {"name": "reel_2", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 52, "right_offset": 96},
                {"name": "B002C001", "source": "mpi-b", "color": "Orange", "left_offset": 900, "right_offset": 960}
            ]}
        ]},
        {"name": "trailer", "tracks": [
            {"name": "Video 1", "clips": [
                {"name": "A001C003", "source": "mpi-a", "left_offset": 3000, "right_offset": 3024}
            ]}
        ]}
    ]
}"#;

#[allow(deprecated)]
fn platemerge() -> Command {
    let mut cmd = Command::cargo_bin("platemerge").unwrap();
    cmd.env("PLATEMERGE_LOG_LEVEL", "error").arg("--color").arg("never");
    cmd
}

fn write_snapshot(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("project.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path
}

#[test]
fn test_timecode_drop_frame() {
    platemerge()
        .args(["timecode", "--fps", "29.97", "--drop", "1800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("00:01:00;02"));
}

#[test]
fn test_timecode_to_frames() {
    platemerge()
        .args(["timecode", "--fps", "29.97", "--drop", "--to-frames", "00:01:00;02"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1800\n"));
}

#[test]
fn test_timecode_host_setting() {
    platemerge()
        .args(["timecode", "--fps", "25", "125"])
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:05:00"));
}

#[test]
fn test_timecode_rejects_bad_rate() {
    platemerge()
        .args(["timecode", "--fps", "25", "--drop", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid frame rate"));
}

#[test]
fn test_timecode_rejects_malformed() {
    platemerge()
        .args(["timecode", "--fps", "25", "--to-frames", "1:2:3"])
        .assert()
        .failure();
}

#[test]
fn test_merge_dry_run_lists_timelines() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    platemerge()
        .current_dir(dir.path())
        .arg("merge")
        .arg(&snapshot)
        .args(["-f", "^reel_", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 timelines selected"))
        .stdout(predicate::str::contains("reel_1"))
        .stdout(predicate::str::contains("trailer").not());

    assert!(!dir.path().join("merged.json").exists());
}

#[test]
fn test_merge_writes_timeline() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    platemerge()
        .current_dir(dir.path())
        .arg("merge")
        .arg(&snapshot)
        .args(["-f", "^reel_", "--skip-color", "orange", "--exclude-track", "Refs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 sources, 3 shots 2 plates"));

    let written = fs::read_to_string(dir.path().join("merged.json")).unwrap();
    let timelines: serde_json::Value = serde_json::from_str(&written).unwrap();
    let items = timelines[0]["items"].as_array().unwrap();

    assert_eq!(timelines[0]["name"], "merged");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["media_pool_item"], "mpi-a");
    assert_eq!(items[0]["start_frame"], 0);
    assert_eq!(items[0]["end_frame"], 95);
    assert_eq!(items[1]["start_frame"], 100);
    assert_eq!(items[1]["media_type"], 1);
}

#[test]
fn test_merge_zero_gap_keeps_plates_apart() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("plates.json");

    platemerge()
        .arg("merge")
        .arg(&snapshot)
        .args(["-f", "^reel_", "--exclude-track", "Refs", "--skip-color", "Orange"])
        .args(["--gap", "0", "--output", "plates_v1", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 plates"));

    let timelines: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(timelines[0]["name"], "plates_v1");
}

#[test]
fn test_merge_with_config_file() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());
    let config = dir.path().join("platemerge.toml");
    fs::write(
        &config,
        "[merge]\ntimeline_filter = \"trailer\"\noutput_timeline = \"trailer_plates\"\n",
    )
    .unwrap();

    platemerge()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("merge")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sources, 1 shots 1 plates"));

    assert!(dir.path().join("trailer_plates.json").exists());
}

#[test]
fn test_summary_lists_absorbed_shots() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    platemerge()
        .arg("summary")
        .arg(&snapshot)
        .args(["-f", "^reel_", "--exclude-track", "Refs", "--skip-color", "Orange"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "reel_1-1-0000-A001C003 <- reel_2-1-0000-A001C003",
        ))
        .stdout(predicate::str::contains("reel_1-1-0001-B002C001 ^"));
}

#[test]
fn test_summary_json() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    let assert = platemerge()
        .arg("summary")
        .arg(&snapshot)
        .arg("--json")
        .assert()
        .success();

    let summary: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["sources"], 2);
    assert_eq!(summary["shots"], 6);
}

#[test]
fn test_invalid_filter_reported() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(dir.path());

    platemerge()
        .arg("merge")
        .arg(&snapshot)
        .args(["-f", "reel_("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeline_filter"));
}

#[test]
fn test_missing_snapshot() {
    platemerge()
        .args(["summary", "/nonexistent/project.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read snapshot"));
}

#[test]
fn test_summary_grouped_by_reel() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("reels.json");
    fs::write(
        &snapshot,
        r#"{
            "sources": [
                {"id": "mpi-a", "fps": 24.0, "start_tc": "01:00:00:00", "reel_name": "A001"},
                {"id": "mpi-b", "fps": 24.0, "start_tc": "01:00:02:00", "reel_name": "A001"}
            ],
            "timelines": [{"name": "reel_1", "tracks": [{"name": "Video 1", "clips": [
                {"name": "shot_010", "source": "mpi-a", "left_offset": 0, "right_offset": 48},
                {"name": "shot_020", "source": "mpi-b", "left_offset": 0, "right_offset": 24}
            ]}]}]
        }"#,
    )
    .unwrap();

    let by_clip = platemerge()
        .arg("summary")
        .arg(&snapshot)
        .args(["--gap", "0", "--json"])
        .assert()
        .success();
    let summary: serde_json::Value =
        serde_json::from_slice(&by_clip.get_output().stdout).unwrap();
    assert_eq!(summary["plates"], 2);

    let by_reel = platemerge()
        .arg("summary")
        .arg(&snapshot)
        .args(["--gap", "0", "--group-by", "reel_name", "--json"])
        .assert()
        .success();
    let summary: serde_json::Value =
        serde_json::from_slice(&by_reel.get_output().stdout).unwrap();
    assert_eq!(summary["sources"], 1);
    assert_eq!(summary["plates"], 1);
    assert_eq!(summary["shots"], 2);
}
