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

//! Snapshot schema for exporting and importing a summary.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::error::Error;
use crate::frequencies::key::ItemKey;

/// A plain, transferable image of a [`SpaceSavingSketch`](super::SpaceSavingSketch).
///
/// `buckets` always holds `capacity` entries: the active buckets first, in
/// strictly increasing count order, followed by parked entries with no count
/// and no members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    /// Maximum number of tracked items.
    pub capacity: usize,
    /// Number of leading entries of `buckets` that carry a count.
    pub active_bucket_count: usize,
    /// Key derivation seed.
    pub seed: u32,
    /// Number of items ingested between two pacing pauses.
    pub batch_size: usize,
    /// Number of items ingested, summed across merges.
    pub total_weight: u64,
    /// Every tracked record, by key.
    pub tracked_records: BTreeMap<ItemKey, SnapshotRecord<T>>,
    /// Bucket slots, active ones first.
    pub buckets: Vec<SnapshotBucket>,
}

/// A tracked record inside a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord<T> {
    /// Estimated count, never below the true frequency.
    pub count: u64,
    /// Maximum overcount of `count`.
    pub error: u64,
    /// The retained item.
    pub value: T,
}

/// A bucket slot inside a [`Snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotBucket {
    /// Count shared by every member, `None` for a parked slot.
    pub count: Option<u64>,
    /// Member keys, oldest first.
    pub member_keys: Vec<ItemKey>,
}

impl<T> Snapshot<T> {
    /// Checks the structural invariants of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDeserializeData`](crate::error::ErrorKind::MalformedDeserializeData)
    /// describing the first violated invariant.
    pub fn validate(&self) -> Result<(), Error> {
        validate_config(self.capacity, self.batch_size)?;
        if self.buckets.len() != self.capacity {
            return Err(Error::deserial("bucket count does not match capacity")
                .with_context("buckets", self.buckets.len())
                .with_context("capacity", self.capacity));
        }
        let members: usize = self.buckets.iter().map(|b| b.member_keys.len()).sum();
        if members != self.tracked_records.len() {
            return Err(
                Error::deserial("bucket membership does not match tracked records")
                    .with_context("members", members)
                    .with_context("records", self.tracked_records.len()),
            );
        }

        let active = self.buckets.iter().take_while(|b| b.count.is_some()).count();
        if active != self.active_bucket_count {
            return Err(Error::deserial("active bucket count mismatch")
                .with_context("declared", self.active_bucket_count)
                .with_context("actual", active));
        }
        if let Some(idx) = self.buckets[active..]
            .iter()
            .position(|b| b.count.is_some() || !b.member_keys.is_empty())
        {
            return Err(Error::deserial("parked bucket is not empty")
                .with_context("index", active + idx));
        }
        validate_active(
            self.capacity,
            self.total_weight,
            &self.tracked_records,
            &self.buckets[..active],
        )
    }
}

/// Checks the configuration carried by a snapshot or a serialized image.
pub(super) fn validate_config(capacity: usize, batch_size: usize) -> Result<(), Error> {
    if capacity == 0 {
        return Err(Error::deserial("capacity must be greater than 0"));
    }
    if u32::try_from(capacity).is_err() {
        return Err(Error::deserial("capacity must fit in 32 bits")
            .with_context("capacity", capacity));
    }
    if batch_size == 0 {
        return Err(Error::deserial("batch size must be greater than 0"));
    }
    if u32::try_from(batch_size).is_err() {
        return Err(Error::deserial("batch size must fit in 32 bits")
            .with_context("batch_size", batch_size));
    }
    Ok(())
}

/// Checks the active buckets against the tracked records.
///
/// The counts of all records must sum to at most `total_weight`, which keeps
/// every count, error and merged sum within `u64`.
pub(super) fn validate_active<T>(
    capacity: usize,
    total_weight: u64,
    tracked_records: &BTreeMap<ItemKey, SnapshotRecord<T>>,
    active: &[SnapshotBucket],
) -> Result<(), Error> {
    let members: usize = active.iter().map(|b| b.member_keys.len()).sum();
    if members != tracked_records.len() {
        return Err(
            Error::deserial("bucket membership does not match tracked records")
                .with_context("members", members)
                .with_context("records", tracked_records.len()),
        );
    }
    if tracked_records.len() > capacity {
        return Err(Error::deserial("more tracked records than capacity")
            .with_context("records", tracked_records.len())
            .with_context("capacity", capacity));
    }

    let mut previous = 0;
    let mut seen = HashSet::with_capacity(members);
    let mut counted = 0u64;
    for (idx, bucket) in active.iter().enumerate() {
        let count = bucket.count.unwrap_or_default();
        if count <= previous {
            return Err(
                Error::deserial("active bucket counts are not strictly increasing")
                    .with_context("index", idx)
                    .with_context("count", count),
            );
        }
        previous = count;
        if bucket.member_keys.is_empty() {
            return Err(Error::deserial("active bucket has no members").with_context("index", idx));
        }
        for key in &bucket.member_keys {
            if !seen.insert(*key) {
                return Err(Error::deserial("key appears in more than one bucket slot")
                    .with_context("key", key));
            }
            let Some(record) = tracked_records.get(key) else {
                return Err(Error::deserial("bucket member has no tracked record")
                    .with_context("key", key));
            };
            if record.count != count {
                return Err(Error::deserial("record count differs from its bucket")
                    .with_context("key", key)
                    .with_context("record", record.count)
                    .with_context("bucket", count));
            }
            if record.error > record.count {
                return Err(Error::deserial("record error exceeds its count")
                    .with_context("key", key)
                    .with_context("error", record.error));
            }
            counted = match counted.checked_add(count) {
                Some(sum) if sum <= total_weight => sum,
                _ => {
                    return Err(Error::deserial("tracked counts exceed total weight")
                        .with_context("key", key)
                        .with_context("total_weight", total_weight));
                }
            };
        }
    }
    Ok(())
}
