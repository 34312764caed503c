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

//! Ordered bucket storage for the Space-Saving summary.
//!
//! A [`BucketStore`] holds at most `capacity` bucket slots. The first
//! `num_active` slots hold the active buckets, sorted by strictly increasing
//! count; the remaining slots are parked at the tail with no count and no
//! members, and are recycled when a new count value appears. Slots are
//! allocated on first use, so slots that were never active are implicit.
//!
//! ```text
//!   index:   0        1        2        3        4
//!          [c=1]    [c=3]    [c=4]    [ - ]    [ - ]
//!          {a,b}    {c}      {d}      parked   parked
//!          ^ minimum (eviction side)   ^ num_active
//! ```
//!
//! Members of a bucket are ordered by insertion sequence number, so iteration
//! and eviction within one count are oldest first.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::frequencies::key::ItemKey;

/// All tracked keys sharing one count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Bucket {
    count: Option<u64>,
    members: BTreeMap<u64, ItemKey>,
}

impl Bucket {
    /// Returns the count of an active bucket, `None` for a parked slot.
    pub(super) fn count(&self) -> Option<u64> {
        self.count
    }

    pub(super) fn len(&self) -> usize {
        self.members.len()
    }

    /// Member keys, oldest first.
    pub(super) fn keys(&self) -> btree_map::Values<'_, u64, ItemKey> {
        self.members.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct BucketStore {
    buckets: Vec<Bucket>,
    capacity: usize,
    num_active: usize,
}

impl BucketStore {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            buckets: Vec::new(),
            capacity,
            num_active: 0,
        }
    }

    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(super) fn num_active(&self) -> usize {
        self.num_active
    }

    /// Allocated slots, active buckets first then parked ones.
    pub(super) fn slots(&self) -> &[Bucket] {
        &self.buckets
    }

    pub(super) fn active(&self) -> &[Bucket] {
        &self.buckets[..self.num_active]
    }

    /// Returns the index of the active bucket holding `count`.
    pub(super) fn locate(&self, count: u64) -> Option<usize> {
        let idx = self.search(count);
        (idx < self.num_active && self.count_at(idx) == count).then_some(idx)
    }

    /// Returns the index of the bucket for `count`, activating a parked slot
    /// at the insertion point when no active bucket has that count.
    ///
    /// # Panics
    ///
    /// Panics if a new bucket is needed and every slot is active.
    pub(super) fn ensure_bucket(&mut self, count: u64) -> usize {
        let idx = self.search(count);
        if idx < self.num_active && self.count_at(idx) == count {
            return idx;
        }
        self.unpark(idx, count);
        idx
    }

    /// Parks the bucket at `idx` if it has no members left.
    pub(super) fn remove_if_empty(&mut self, idx: usize) -> bool {
        if idx < self.num_active && self.buckets[idx].members.is_empty() {
            self.park(idx);
            true
        } else {
            false
        }
    }

    pub(super) fn insert(&mut self, idx: usize, seq: u64, key: ItemKey) {
        assert!(idx < self.num_active, "insert into a parked bucket");
        self.buckets[idx].members.insert(seq, key);
    }

    /// Moves member `seq` from the bucket for `count` to the bucket for
    /// `count + 1`, re-registering it under `new_seq`.
    ///
    /// # Panics
    ///
    /// Panics if no such member is tracked under `count`.
    pub(super) fn increment(&mut self, count: u64, seq: u64, new_seq: u64) {
        let idx = self
            .locate(count)
            .unwrap_or_else(|| panic!("no bucket for count {count}"));
        let key = self.buckets[idx]
            .members
            .remove(&seq)
            .unwrap_or_else(|| panic!("member {seq} missing from bucket {count}"));

        let target = count + 1;
        let next = idx + 1;
        let next_matches = next < self.num_active && self.count_at(next) == target;

        let dest = if self.buckets[idx].members.is_empty() {
            if next_matches {
                self.park(idx);
            } else {
                // still ordered: target sits strictly below the next count
                self.buckets[idx].count = Some(target);
            }
            idx
        } else {
            if !next_matches {
                self.unpark(next, target);
            }
            next
        };
        self.buckets[dest].members.insert(new_seq, key);
    }

    /// Removes the oldest member of the minimum bucket, returning it with its
    /// count. The bucket is parked when it becomes empty.
    pub(super) fn pop_min(&mut self) -> Option<(ItemKey, u64)> {
        if self.num_active == 0 {
            return None;
        }
        let count = self.count_at(0);
        let (_, key) = self.buckets[0].members.pop_first()?;
        self.remove_if_empty(0);
        Some((key, count))
    }

    pub(super) fn clear(&mut self) {
        for bucket in &mut self.buckets[..self.num_active] {
            bucket.count = None;
            bucket.members.clear();
        }
        self.num_active = 0;
    }

    fn count_at(&self, idx: usize) -> u64 {
        // parked slots order after every active count
        self.buckets[idx].count.unwrap_or(u64::MAX)
    }

    /// Finds the first active index whose count is not less than `count`.
    ///
    /// The probe starts at the middle of the active range and moves by a step
    /// that halves on every iteration (never below one), stopping on an exact
    /// hit, on a direction change at unit step, or when the step cannot move
    /// inside the active range. A short walk then settles the probe onto the
    /// insertion point.
    fn search(&self, count: u64) -> usize {
        let n = self.num_active;
        // fast path: the minimum bucket is touched by every eviction
        if n == 0 || self.count_at(0) >= count {
            return 0;
        }

        let max_idx = n - 1;
        let mut idx = n / 2;
        let mut step = (idx / 2).max(1);
        let mut last_up = None;
        loop {
            let up = match self.count_at(idx).cmp(&count) {
                std::cmp::Ordering::Equal => return idx,
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
            };
            if step == 1 && last_up == Some(!up) {
                break;
            }
            let room = if up { max_idx - idx } else { idx };
            let delta = step.min(room);
            if delta == 0 {
                break;
            }
            if up {
                idx += delta;
            } else {
                idx -= delta;
            }
            last_up = Some(up);
            step = (step / 2).max(1);
        }

        while idx > 0 && self.count_at(idx - 1) >= count {
            idx -= 1;
        }
        while idx < n && self.count_at(idx) < count {
            idx += 1;
        }
        idx
    }

    fn park(&mut self, idx: usize) {
        debug_assert!(self.buckets[idx].members.is_empty());
        self.buckets[idx].count = None;
        self.buckets[idx..].rotate_left(1);
        self.num_active -= 1;
    }

    fn unpark(&mut self, idx: usize, count: u64) {
        assert!(
            self.num_active < self.capacity,
            "no parked bucket left for count {count}"
        );
        if self.num_active == self.buckets.len() {
            self.buckets.push(Bucket::default());
        }
        self.buckets[idx..].rotate_right(1);
        self.buckets[idx].count = Some(count);
        self.num_active += 1;
    }
}
