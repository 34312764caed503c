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

use std::collections::HashMap;

use googletest::assert_that;
use googletest::prelude::eq;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use spacesaving::error::ErrorKind;
use spacesaving::frequencies::NoPacer;
use spacesaving::frequencies::Pacer;
use spacesaving::frequencies::SpaceSavingBuilder;
use spacesaving::frequencies::SpaceSavingSketch;

#[test]
fn test_frequency_counts_repeated_items() {
    let mut sketch = SpaceSavingSketch::new(10);
    sketch.ingest("beans");
    sketch.ingest("beans");
    sketch.ingest("cheese");

    assert_eq!(sketch.frequency("beans"), Some(2));
    assert_eq!(sketch.frequency("cheese"), Some(1));
    let top: Vec<_> = sketch.top_k().copied().collect();
    assert_that!(top.len(), eq(2));
    assert_eq!(top, vec!["cheese", "beans"]);
}

#[test]
fn test_heavy_hitter_displaces_fillers() {
    let mut sketch = SpaceSavingSketch::new(10);
    for i in 0..10 {
        sketch.ingest(i.to_string());
    }
    for _ in 0..10 {
        sketch.ingest("42".to_string());
    }

    assert_eq!(sketch.frequency("42"), Some(10));
    assert_eq!(sketch.upper_bound("42"), Some(11));
    assert_eq!(sketch.error("42"), Some(1));
    let top: Vec<_> = sketch.top_k().collect();
    assert_eq!(top.len(), 10);
    assert_eq!(top.last().map(|s| s.as_str()), Some("42"));
    // the oldest filler was the one evicted
    assert_eq!(sketch.frequency("0"), None);
    assert_eq!(sketch.frequency("1"), Some(1));
}

#[test]
fn test_untracked_items_are_not_found() {
    let mut sketch: SpaceSavingSketch<&str> = SpaceSavingSketch::new(4);
    assert_eq!(sketch.frequency("never"), None);
    sketch.ingest_all(["a", "b", "c"]);
    assert_eq!(sketch.frequency("never"), None);
    assert_eq!(sketch.upper_bound("never"), None);
    assert_eq!(sketch.error("never"), None);
}

#[test]
fn test_empty_sketch() {
    let sketch = SpaceSavingSketch::<u64>::new(3);
    assert!(sketch.is_empty());
    assert_eq!(sketch.len(), 0);
    assert_eq!(sketch.total_weight(), 0);
    assert_eq!(sketch.num_active_buckets(), 0);
    assert_eq!(sketch.top_k().count(), 0);
    assert!(sketch.rows().is_empty());
}

#[test]
fn test_top_k_is_restartable() {
    let mut sketch = SpaceSavingSketch::new(5);
    sketch.ingest_all([3u64, 1, 3, 2, 3, 2]);
    let first: Vec<_> = sketch.top_k().copied().collect();
    let second: Vec<_> = sketch.top_k().copied().collect();
    assert_eq!(first, vec![1, 2, 3]);
    assert_eq!(first, second);
    assert_eq!(sketch.top_k().len(), 3);
}

#[test]
fn test_frequent_items_heaviest_first() {
    let mut sketch = SpaceSavingSketch::new(8);
    sketch.ingest_all(["a", "b", "b", "c", "c", "c", "d"]);
    let rows = sketch.frequent_items(2);
    assert_eq!(rows.len(), 2);
    assert_eq!(*rows[0].item(), "c");
    assert_eq!(rows[0].estimate(), 3);
    assert_eq!(rows[0].lower_bound(), 3);
    assert_eq!(*rows[1].item(), "b");
    assert_eq!(sketch.frequent_items(100).len(), 4);
}

#[test]
fn test_rows_expose_bounds() {
    let mut sketch = SpaceSavingSketch::new(2);
    sketch.ingest_all(["a", "a", "a", "a", "b", "c", "c"]);
    // "c" replaced "b" (count 1) and then got one more hit
    let rows = sketch.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(*rows[0].item(), "c");
    assert_eq!(rows[0].upper_bound(), 3);
    assert_eq!(rows[0].error(), 1);
    assert_eq!(rows[0].lower_bound(), 2);
    assert_eq!(rows[1].estimate(), 4);
    assert_eq!(rows.into_iter().last().map(|row| row.into_item()), Some("a"));
}

#[test]
fn test_builder_rejects_invalid_config() {
    let err = SpaceSavingBuilder::default()
        .capacity(0)
        .build::<u64>()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    let err = SpaceSavingBuilder::default()
        .batch_size(0)
        .build::<u64>()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
#[should_panic(expected = "capacity must be greater than 0")]
fn test_new_with_zero_capacity_panics() {
    let _ = SpaceSavingSketch::<u64>::new(0);
}

#[derive(Default)]
struct CountingPacer {
    pauses: usize,
}

impl Pacer for CountingPacer {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}

#[test]
fn test_pacer_called_once_per_batch() {
    let mut sketch: SpaceSavingSketch<u64> = SpaceSavingBuilder::default()
        .capacity(16)
        .batch_size(10)
        .build()
        .unwrap();
    let mut pacer = CountingPacer::default();
    sketch.ingest_all_paced(0..95, &mut pacer);
    assert_eq!(pacer.pauses, 9);
    assert_eq!(sketch.total_weight(), 95);

    let mut plain: SpaceSavingSketch<u64> =
        SpaceSavingBuilder::default().capacity(16).build().unwrap();
    plain.ingest_all_paced(0..95u64, &mut NoPacer);
    assert_eq!(plain.rows(), sketch.rows());
}

#[test]
fn test_extend_ingests_every_item() {
    let mut sketch: SpaceSavingSketch<&str> = SpaceSavingSketch::new(4);
    sketch.extend(["x", "y", "x"]);
    assert_eq!(sketch.frequency("x"), Some(2));
    assert_eq!(sketch.total_weight(), 3);
}

#[test]
fn test_random_stream_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut sketch: SpaceSavingSketch<u64> = SpaceSavingSketch::new(16);
    let mut truth: HashMap<u64, u64> = HashMap::new();

    for _ in 0..5_000 {
        // skewed stream: small values are much more frequent
        let item = rng.random_range(0..8u64) * rng.random_range(0..8u64);
        let previous = sketch.upper_bound(&item);
        let full = sketch.len() == sketch.capacity();
        let min_before = sketch.rows().first().map(|row| row.upper_bound());
        let before: Vec<_> = sketch.rows();

        sketch.ingest(item);
        *truth.entry(item).or_default() += 1;

        assert!(sketch.len() <= sketch.capacity());
        sketch.export().validate().unwrap();
        match previous {
            Some(count) => assert_eq!(sketch.upper_bound(&item), Some(count + 1)),
            None if full => {
                let evicted: Vec<_> = before
                    .iter()
                    .filter(|row| sketch.upper_bound(row.item()).is_none())
                    .collect();
                assert_eq!(evicted.len(), 1);
                assert_eq!(Some(evicted[0].upper_bound()), min_before);
                assert_eq!(sketch.error(&item), min_before);
            }
            None => assert_eq!(sketch.upper_bound(&item), Some(1)),
        }
    }

    for row in sketch.rows() {
        let actual = truth[row.item()];
        assert!(row.error() <= row.estimate());
        assert!(row.lower_bound() <= actual, "{row:?} vs {actual}");
        assert!(row.upper_bound() >= actual, "{row:?} vs {actual}");
    }
    assert_eq!(sketch.total_weight(), 5_000);
}

#[test]
fn test_heavy_hitters_survive_in_noise() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut sketch: SpaceSavingSketch<u64> = SpaceSavingSketch::new(20);
    for i in 0..10_000u64 {
        if i % 4 == 0 {
            sketch.ingest(1_000_000);
        } else {
            sketch.ingest(rng.random_range(0..10_000u64));
        }
    }
    let top = sketch.frequent_items(1);
    assert_eq!(*top[0].item(), 1_000_000);
    assert!(top[0].lower_bound() <= 2_500);
    assert!(top[0].upper_bound() >= 2_500);
}
