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
//! Coalescer behaviour tests
//!
//! - Worked examples from editorial usage
//! - Coverage, separation, idempotence and order independence (proptest)
//! - Best-combination selection

use platemerge_coalesce::{
    merge_intervals, CoalesceError, Coalescer, Interval, MergeMode, OccurrenceGroup,
    OccurrenceIndex, OccurrenceSource, Plate, SourceClipId, TimelineFilter,
};
use proptest::prelude::*;

fn iv(start: u64, end: u64) -> Interval {
    Interval::new(start, end).unwrap()
}

fn spans(plates: &[Plate]) -> Vec<(u64, u64)> {
    plates.iter().map(|p| (p.start, p.end)).collect()
}

fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0u64..5_000, 0u64..400), 1..60).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(start, len)| iv(start, start + len))
            .collect()
    })
}

struct FixedSource(Vec<OccurrenceGroup>);

impl OccurrenceSource for FixedSource {
    fn enumerate_occurrences(
        &self,
        _filter: &TimelineFilter,
    ) -> platemerge_coalesce::Result<Vec<OccurrenceGroup>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_separate_usages_stay_separate() {
    let group = OccurrenceGroup::from_intervals("A001C003", [iv(0, 10), iv(50, 60)]);
    let plates = Coalescer::new(5).coalesce(&group).unwrap();
    assert_eq!(spans(&plates), vec![(0, 10), (50, 60)]);
}

#[test]
fn test_close_usages_merge() {
    let group = OccurrenceGroup::from_intervals("A001C003", [iv(0, 10), iv(12, 20)]);
    let plates = Coalescer::new(5).coalesce(&group).unwrap();
    assert_eq!(spans(&plates), vec![(0, 20)]);
}

#[test]
fn test_nested_usage_absorbed() {
    let group = OccurrenceGroup::from_intervals("A001C003", [iv(0, 100), iv(10, 20)]);
    let plates = Coalescer::new(5).coalesce(&group).unwrap();
    assert_eq!(spans(&plates), vec![(0, 100)]);
}

#[test]
fn test_chained_merges_extend_envelope() {
    // each step is within tolerance of the previous envelope, not of the first interval
    let group = OccurrenceGroup::from_intervals(
        "A001C003",
        [iv(0, 10), iv(14, 30), iv(34, 50), iv(54, 70), iv(80, 90)],
    );
    let plates = Coalescer::new(4).coalesce(&group).unwrap();
    assert_eq!(spans(&plates), vec![(0, 70), (80, 90)]);
}

#[test]
fn test_unregistered_source_rejected() {
    let mut index = OccurrenceIndex::new();
    index.register_source("A001C003");
    let err = index
        .record(&SourceClipId::from("B007C001"), iv(0, 10), "cut-1-0000-B007C001")
        .unwrap_err();
    assert_eq!(err, CoalesceError::UnknownSourceClip("B007C001".into()));
}

#[test]
fn test_empty_group_rejected() {
    let err = Coalescer::new(5)
        .coalesce(&OccurrenceGroup::new("A001C003"))
        .unwrap_err();
    assert_eq!(err, CoalesceError::EmptyGroup("A001C003".into()));
}

#[test]
fn test_best_combination_drops_uncovered_tail() {
    let group = OccurrenceGroup::from_intervals(
        "A001C003",
        [iv(100, 400), iv(1_000, 1_010), iv(2_000, 2_000)],
    );
    let keep_all = Coalescer::new(5).coalesce(&group).unwrap();
    assert_eq!(keep_all.len(), 3);

    let best = Coalescer::new(5)
        .with_mode(MergeMode::BestCombination)
        .coalesce(&group)
        .unwrap();
    assert_eq!(spans(&best), vec![(100, 400), (1_000, 1_010)]);
}

#[test]
fn test_run_collects_groups_and_summary() {
    let mut first = OccurrenceGroup::new("A001C003");
    first.insert(iv(0, 10), Some("cut-1-0000-A001C003".into()));
    first.insert(iv(12, 20), Some("cut-1-0001-A001C003".into()));
    let mut second = OccurrenceGroup::new("B007C001");
    second.insert(iv(500, 600), Some("cut-1-0002-B007C001".into()));

    let source = FixedSource(vec![second, first]);
    let run = Coalescer::new(5).run(&source, &TimelineFilter::all()).unwrap();

    assert!(run.report.is_clean());
    assert_eq!(spans(&run.report.plates), vec![(0, 20), (500, 600)]);

    let summary = run.summary();
    assert_eq!(summary.status_line(), "2 sources, 3 shots 2 plates");
    assert_eq!(
        summary.entries[&SourceClipId::from("A001C003")],
        vec!["cut-1-0000-A001C003 <- cut-1-0001-A001C003"]
    );
}

#[test]
fn proptest_every_interval_covered_by_exactly_one_plate() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let group = OccurrenceGroup::from_intervals("src", intervals.clone());
        let plates = Coalescer::new(gap).coalesce(&group).unwrap();

        for interval in &intervals {
            let covering = plates.iter().filter(|p| p.covers(interval)).count();
            prop_assert_eq!(covering, 1, "{} covered {} times", interval, covering);
        }
    });
}

#[test]
fn proptest_plates_separated_by_more_than_gap() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let group = OccurrenceGroup::from_intervals("src", intervals);
        let plates = Coalescer::new(gap).coalesce(&group).unwrap();

        for pair in plates.windows(2) {
            prop_assert!(pair[1].start > pair[0].end + gap);
        }
    });
}

#[test]
fn proptest_plate_endpoints_come_from_inputs() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let group = OccurrenceGroup::from_intervals("src", intervals.clone());
        let plates = Coalescer::new(gap).coalesce(&group).unwrap();

        for plate in &plates {
            prop_assert!(intervals.iter().any(|i| i.start() == plate.start));
            prop_assert!(intervals.iter().any(|i| i.end() == plate.end));
        }
    });
}

#[test]
fn proptest_coalescing_is_idempotent() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let once = merge_intervals(intervals, gap);
        let twice = merge_intervals(once.clone(), gap);
        prop_assert_eq!(once, twice);
    });
}

#[test]
fn proptest_input_order_does_not_matter() {
    proptest!(|(
        (intervals, shuffled) in arb_intervals()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        gap in 0u64..50
    )| {
        let a = Coalescer::new(gap)
            .coalesce(&OccurrenceGroup::from_intervals("src", intervals))
            .unwrap();
        let b = Coalescer::new(gap)
            .coalesce(&OccurrenceGroup::from_intervals("src", shuffled))
            .unwrap();
        prop_assert_eq!(spans(&a), spans(&b));
    });
}

#[test]
fn proptest_group_and_bare_merge_agree() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let plates = Coalescer::new(gap)
            .coalesce(&OccurrenceGroup::from_intervals("src", intervals.clone()))
            .unwrap();
        let merged: Vec<(u64, u64)> = merge_intervals(intervals, gap)
            .iter()
            .map(|i| (i.start(), i.end()))
            .collect();
        prop_assert_eq!(spans(&plates), merged);
    });
}

#[test]
fn proptest_best_combination_is_a_maximal_contiguous_run() {
    proptest!(|(intervals in arb_intervals(), gap in 0u64..50)| {
        let group = OccurrenceGroup::from_intervals("src", intervals);
        let all = Coalescer::new(gap).coalesce(&group).unwrap();
        let best = Coalescer::new(gap)
            .with_mode(MergeMode::BestCombination)
            .coalesce(&group)
            .unwrap();

        prop_assert!(!best.is_empty());
        let offset = all.iter().position(|p| p == &best[0]).unwrap();
        prop_assert_eq!(&all[offset..offset + best.len()], best.as_slice());

        let best_total: u64 = best.iter().map(Plate::len).sum();
        let all_total: u64 = all.iter().map(Plate::len).sum();
        prop_assert_eq!(best_total, all_total);
    });
}
