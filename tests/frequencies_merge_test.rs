// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;
use std::collections::BTreeMap;

use spacesaving::error::ErrorKind;
use spacesaving::frequencies::DEFAULT_BATCH_SIZE;
use spacesaving::frequencies::ItemKey;
use spacesaving::frequencies::Snapshot;
use spacesaving::frequencies::SnapshotBucket;
use spacesaving::frequencies::SnapshotRecord;
use spacesaving::frequencies::SpaceSavingBuilder;
use spacesaving::frequencies::SpaceSavingSketch;
use spacesaving::hash::DEFAULT_UPDATE_SEED;

fn filled_with(fillers: &[&str], heavy: &str, hits: usize) -> SpaceSavingSketch<String> {
    let mut sketch = SpaceSavingSketch::new(10);
    sketch.ingest_all(fillers.iter().map(|s| s.to_string()));
    sketch.ingest_all(std::iter::repeat_n(heavy.to_string(), hits));
    sketch
}

fn last_two(sketch: &SpaceSavingSketch<String>) -> Vec<String> {
    let top: Vec<_> = sketch.top_k().cloned().collect();
    top[top.len() - 2..].to_vec()
}

#[test]
fn test_merge_shared_fillers() {
    let fillers = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let s1 = filled_with(&fillers, "beans", 10);
    let s2 = filled_with(&fillers, "cheese", 11);

    let merged = s1.merge(&s2).unwrap();
    assert_eq!(merged.capacity(), 10);
    assert_eq!(merged.frequency("beans"), Some(10));
    assert_eq!(merged.frequency("cheese"), Some(11));
    assert_eq!(merged.top_k().count(), 10);
    assert_eq!(last_two(&merged), vec!["beans", "cheese"]);
    assert_eq!(merged.total_weight(), 41);
    merged.export().validate().unwrap();
}

#[test]
fn test_merge_distinct_fillers() {
    let left = ["a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9"];
    let right = ["b0", "b1", "b2", "b3", "b4", "b5", "b6", "b7", "b8", "b9"];
    let s1 = filled_with(&left, "beans", 10);
    let s2 = filled_with(&right, "cheese", 11);

    let merged = s1.merge(&s2).unwrap();
    assert_eq!(merged.frequency("beans"), Some(10));
    assert_eq!(merged.frequency("cheese"), Some(11));
    assert_eq!(merged.len(), 10);
    assert_eq!(last_two(&merged), vec!["beans", "cheese"]);
    merged.export().validate().unwrap();
}

#[test]
fn test_merge_sums_counts_and_errors() {
    let mut s1 = SpaceSavingSketch::new(2);
    s1.ingest_all(["x", "x", "y", "z", "z"]);
    let mut s2 = SpaceSavingSketch::new(2);
    s2.ingest_all(["z", "w", "w", "w"]);

    // s1: x=2, z replaced y -> z=3 (error 1)
    assert_eq!(s1.upper_bound("z"), Some(3));
    assert_eq!(s1.error("z"), Some(1));

    let merged = s1.merge_with_capacity(&s2, 4).unwrap();
    assert_eq!(merged.capacity(), 4);
    assert_eq!(merged.upper_bound("z"), Some(4));
    assert_eq!(merged.error("z"), Some(1));
    assert_eq!(merged.frequency("z"), Some(3));
    assert_eq!(merged.frequency("x"), Some(2));
    assert_eq!(merged.frequency("w"), Some(3));
    assert_eq!(merged.len(), 3);
}

#[test]
fn test_merge_leaves_inputs_untouched() {
    let mut s1 = SpaceSavingSketch::new(3);
    s1.ingest_all([1u64, 1, 2]);
    let mut s2 = SpaceSavingSketch::new(3);
    s2.ingest_all([1u64, 3]);
    let before = (s1.rows(), s2.rows());

    let mut merged = s1.merge(&s2).unwrap();
    merged.ingest(1);
    s1.ingest(2);

    assert_eq!(merged.frequency(&1), Some(4));
    assert_eq!(s2.rows(), before.1);
    assert_eq!(s1.frequency(&2), Some(2));
    assert_eq!(s1.frequency(&1), Some(2));
}

#[test]
fn test_merge_into_smaller_capacity_preserves_guarantees() {
    let mut s1 = SpaceSavingSketch::new(8);
    s1.ingest_all((0..8u64).flat_map(|i| std::iter::repeat_n(i, i as usize + 1)));
    let s2 = s1.clone();

    let merged = s1.merge_with_capacity(&s2, 3).unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.total_weight(), 72);
    // the three heaviest are inserted last and keep their guaranteed counts
    assert_eq!(merged.frequency(&7), Some(16));
    assert_eq!(merged.frequency(&6), Some(14));
    assert_eq!(merged.frequency(&5), Some(12));
    merged.export().validate().unwrap();
}

#[test]
fn test_merge_rejects_mismatched_capacity() {
    let s1 = SpaceSavingSketch::<u64>::new(10);
    let s2 = SpaceSavingSketch::<u64>::new(20);
    let err = s1.merge(&s2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleCapacity);
    assert_that!(err.to_string(), contains_substring("left: 10, right: 20"));

    // an explicit capacity makes the policy unambiguous
    assert_eq!(s1.merge_with_capacity(&s2, 20).unwrap().capacity(), 20);
    let err = s1.merge_with_capacity(&s2, 0).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::IncompatibleCapacity));
}

#[test]
fn test_merge_rejects_mismatched_seed() {
    let s1: SpaceSavingSketch<u64> = SpaceSavingBuilder::default().seed(1).build().unwrap();
    let s2: SpaceSavingSketch<u64> = SpaceSavingBuilder::default().seed(2).build().unwrap();
    let err = s1.merge(&s2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSeed);
}

fn saturated(count: u64, error: u64) -> SpaceSavingSketch<String> {
    let value = "beans".to_string();
    let key = ItemKey::of(&value, DEFAULT_UPDATE_SEED);
    let mut tracked_records = BTreeMap::new();
    tracked_records.insert(key, SnapshotRecord { count, error, value });
    SpaceSavingSketch::import(Snapshot {
        capacity: 2,
        active_bucket_count: 1,
        seed: DEFAULT_UPDATE_SEED,
        batch_size: DEFAULT_BATCH_SIZE,
        total_weight: count,
        tracked_records,
        buckets: vec![
            SnapshotBucket {
                count: Some(count),
                member_keys: vec![key],
            },
            SnapshotBucket::default(),
        ],
    })
    .unwrap()
}

#[test]
fn test_merge_rejects_weight_overflow() {
    let sketch = saturated(u64::MAX, u64::MAX);
    let err = sketch.merge(&sketch).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::WeightOverflow));
    assert_that!(err.message(), contains_substring("does not fit in 64 bits"));

    let mut saturated_copy = sketch.clone();
    saturated_copy.ingest("cheese".to_string());
    assert_eq!(saturated_copy.total_weight(), u64::MAX);
    assert_eq!(saturated_copy.frequency("cheese"), None);

    let merged = sketch.merge(&SpaceSavingSketch::new(2)).unwrap();
    assert_eq!(merged.total_weight(), u64::MAX);
    assert_eq!(merged.upper_bound("beans"), Some(u64::MAX));
    assert_eq!(merged.frequency("beans"), Some(0));
}

#[test]
fn test_merge_near_weight_limit_keeps_bounds() {
    let half = u64::MAX / 2;
    let left = saturated(half, 1);
    let right = saturated(half, 2);
    let merged = left.merge(&right).unwrap();
    assert_eq!(merged.total_weight(), half * 2);
    assert_eq!(merged.upper_bound("beans"), Some(half * 2));
    assert_eq!(merged.error("beans"), Some(3));
    assert_eq!(merged.frequency("beans"), Some(half * 2 - 3));
}
