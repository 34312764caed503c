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

//! Space-Saving summary implementation.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;

use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::frequencies::builder::DEFAULT_BATCH_SIZE;
use crate::frequencies::builder::SpaceSavingBuilder;
use crate::frequencies::bucket::BucketStore;
use crate::frequencies::iter::TopK;
use crate::frequencies::key::ItemKey;
use crate::frequencies::record::MonitoredRecord;
use crate::frequencies::record::Row;
use crate::frequencies::serde::ItemsSerde;
use crate::frequencies::serialization::*;
use crate::frequencies::snapshot::Snapshot;
use crate::frequencies::snapshot::SnapshotBucket;
use crate::frequencies::snapshot::SnapshotRecord;
use crate::frequencies::snapshot::validate_active;
use crate::frequencies::snapshot::validate_config;
use crate::hash::DEFAULT_UPDATE_SEED;

/// Hook invoked between ingestion batches.
///
/// Hosts that share an execution context with other cooperatively scheduled work
/// can yield from [`pause`](Pacer::pause). The sketch state is never touched by
/// the hook, and a threaded host can use [`NoPacer`].
pub trait Pacer {
    /// Called after every `batch_size` ingested items.
    fn pause(&mut self);
}

/// A [`Pacer`] that never pauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&mut self) {}
}

/// Space-Saving summary tracking approximate counts of the heaviest items.
///
/// At most `capacity` distinct items are tracked. Each tracked item carries a
/// count that never underestimates its true frequency and an error bound such
/// that the true frequency is at least `count - error`.
///
/// See the [module documentation](super) for more details.
#[derive(Debug, Clone)]
pub struct SpaceSavingSketch<T> {
    seed: u32,
    batch_size: usize,
    total_weight: u64,
    next_seq: u64,
    records: HashMap<ItemKey, MonitoredRecord<T>>,
    buckets: BucketStore,
}

impl<T> SpaceSavingSketch<T> {
    /// Creates a sketch tracking at most `capacity` items with default settings.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit in 32 bits. Use
    /// [`builder()`](Self::builder) for a fallible constructor.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        assert!(
            u32::try_from(capacity).is_ok(),
            "capacity must fit in 32 bits"
        );
        Self::with_config(capacity, DEFAULT_UPDATE_SEED, DEFAULT_BATCH_SIZE)
    }

    /// Returns a builder for creating a sketch.
    pub fn builder() -> SpaceSavingBuilder {
        SpaceSavingBuilder::default()
    }

    pub(super) fn with_config(capacity: usize, seed: u32, batch_size: usize) -> Self {
        Self {
            seed,
            batch_size,
            total_weight: 0,
            next_seq: 0,
            records: HashMap::new(),
            buckets: BucketStore::new(capacity),
        }
    }

    /// Returns the maximum number of tracked items.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Returns the key derivation seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the number of items ingested between two pacing pauses.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the number of currently tracked items.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no item is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of items ingested, summed across merges.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the number of distinct counts currently tracked.
    pub fn num_active_buckets(&self) -> usize {
        self.buckets.num_active()
    }

    /// Returns tracked items in ascending order of estimated count.
    ///
    /// The heaviest items are at the end of the sequence. Items sharing a
    /// count are yielded oldest first. Every call starts a fresh pass.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spacesaving::frequencies::SpaceSavingSketch;
    /// let mut sketch = SpaceSavingSketch::new(10);
    /// sketch.ingest("beans");
    /// sketch.ingest("beans");
    /// sketch.ingest("cheese");
    /// let top: Vec<_> = sketch.top_k().copied().collect();
    /// assert_eq!(top, vec!["cheese", "beans"]);
    /// ```
    pub fn top_k(&self) -> TopK<'_, T> {
        TopK::new(self.buckets.active(), &self.records)
    }

    /// Returns every tracked item with its bounds, in [`top_k`](Self::top_k) order.
    pub fn rows(&self) -> Vec<Row<T>>
    where
        T: Clone,
    {
        let mut iter = self.top_k();
        std::iter::from_fn(|| iter.next_record())
            .map(|record| Row::new(record.value.clone(), record.count, record.error))
            .collect()
    }

    /// Returns the `k` heaviest items, heaviest first.
    pub fn frequent_items(&self, k: usize) -> Vec<Row<T>>
    where
        T: Clone,
    {
        let mut rows = self.rows();
        rows.reverse();
        rows.truncate(k);
        rows
    }

    /// Forgets every tracked item, keeping capacity, seed and batch size.
    pub fn reset(&mut self) {
        self.records.clear();
        self.buckets.clear();
        self.total_weight = 0;
        self.next_seq = 0;
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Tracks a new key with the given count and error, evicting the minimum
    /// record first when the sketch is full. The evicted count is added to both
    /// the count and the error, so `count - error` is preserved.
    ///
    /// Returns the evicted key and its count.
    fn insert_record(
        &mut self,
        key: ItemKey,
        value: T,
        mut count: u64,
        mut error: u64,
    ) -> Option<(ItemKey, u64)> {
        let mut evicted = None;
        if self.records.len() >= self.capacity() {
            if let Some((old_key, old_count)) = self.buckets.pop_min() {
                self.records.remove(&old_key);
                count += old_count;
                error += old_count;
                evicted = Some((old_key, old_count));
            }
        }
        let seq = self.bump_seq();
        let idx = self.buckets.ensure_bucket(count);
        self.buckets.insert(idx, seq, key);
        self.records.insert(
            key,
            MonitoredRecord {
                value,
                count,
                error,
                seq,
            },
        );
        evicted
    }
}

impl<T: Hash> SpaceSavingSketch<T> {
    /// Observes one occurrence of `item`.
    ///
    /// A tracked item has its count incremented. An untracked item is added
    /// with count 1 while there is room, and otherwise replaces the item with
    /// the smallest count, inheriting that count as its error.
    ///
    /// Once the total weight reaches `u64::MAX`, further items are dropped.
    pub fn ingest(&mut self, item: T) {
        let Some(total_weight) = self.total_weight.checked_add(1) else {
            tracing::debug!("total weight saturated, dropping item");
            return;
        };
        let key = ItemKey::of(&item, self.seed);
        self.total_weight = total_weight;
        let seq = self.bump_seq();
        if let Some(record) = self.records.get_mut(&key) {
            self.buckets.increment(record.count, record.seq, seq);
            record.count += 1;
            record.seq = seq;
            return;
        }
        self.insert_record(key, item, 1, 0);
    }

    /// Ingests every item of `items`.
    pub fn ingest_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.ingest_all_paced(items, &mut NoPacer);
    }

    /// Ingests every item of `items`, calling `pacer` after each batch.
    pub fn ingest_all_paced<I, P>(&mut self, items: I, pacer: &mut P)
    where
        I: IntoIterator<Item = T>,
        P: Pacer + ?Sized,
    {
        let mut in_batch = 0;
        for item in items {
            self.ingest(item);
            in_batch += 1;
            if in_batch == self.batch_size {
                tracing::trace!(batch_size = self.batch_size, "pausing ingestion");
                pacer.pause();
                in_batch = 0;
            }
        }
    }

    /// Returns the guaranteed frequency of `item` (count minus error), or
    /// `None` if the item is not tracked.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spacesaving::frequencies::SpaceSavingSketch;
    /// let mut sketch = SpaceSavingSketch::new(2);
    /// sketch.ingest_all(["a", "a", "b", "c"]);
    /// assert_eq!(sketch.frequency("a"), Some(2));
    /// // "c" replaced "b" and inherited its count as error
    /// assert_eq!(sketch.frequency("c"), Some(1));
    /// assert_eq!(sketch.frequency("b"), None);
    /// ```
    pub fn frequency<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.record(item).map(MonitoredRecord::lower_bound)
    }

    /// Alias of [`frequency`](Self::frequency).
    pub fn lower_bound<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.frequency(item)
    }

    /// Returns the estimated count of `item`, which never underestimates.
    pub fn upper_bound<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.record(item).map(|record| record.count)
    }

    /// Returns the maximum overcount of `item`'s estimate.
    pub fn error<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.record(item).map(|record| record.error)
    }

    fn record<Q>(&self, item: &Q) -> Option<&MonitoredRecord<T>>
    where
        T: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.records.get(&ItemKey::of(item, self.seed))
    }

    /// Merges two summaries of equal capacity into a new one.
    ///
    /// Neither input is modified. See
    /// [`merge_with_capacity`](Self::merge_with_capacity) for the merge rules.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompatibleCapacity`] if the capacities differ,
    /// [`ErrorKind::IncompatibleSeed`] if the seeds differ, and
    /// [`ErrorKind::WeightOverflow`] if the summed total weight overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spacesaving::frequencies::SpaceSavingSketch;
    /// let mut left = SpaceSavingSketch::new(4);
    /// left.ingest_all(["a", "a", "b"]);
    /// let mut right = SpaceSavingSketch::new(4);
    /// right.ingest_all(["a", "c"]);
    ///
    /// let merged = left.merge(&right).unwrap();
    /// assert_eq!(merged.frequency("a"), Some(3));
    /// assert_eq!(merged.total_weight(), 5);
    /// ```
    pub fn merge(&self, other: &Self) -> Result<Self, Error>
    where
        T: Clone,
    {
        if self.capacity() != other.capacity() {
            return Err(Error::new(
                ErrorKind::IncompatibleCapacity,
                "cannot merge sketches of different capacity",
            )
            .with_context("left", self.capacity())
            .with_context("right", other.capacity()));
        }
        self.merge_with_capacity(other, self.capacity())
    }

    /// Merges two summaries into a new one tracking at most `capacity` items.
    ///
    /// A key tracked by both inputs gets the sum of both counts and the sum of
    /// both errors; a key tracked by one input is carried over unchanged. The
    /// combined records are then inserted lightest first through the regular
    /// insertion path. Once the result is full, each insertion evicts the
    /// minimum record and absorbs the evicted count into both its count and
    /// its error, so `count - error` of every surviving record is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompatibleCapacity`] if `capacity` is 0 or does not
    /// fit in 32 bits, [`ErrorKind::IncompatibleSeed`] if the seeds differ, and
    /// [`ErrorKind::WeightOverflow`] if the summed total weight overflows.
    pub fn merge_with_capacity(&self, other: &Self, capacity: usize) -> Result<Self, Error>
    where
        T: Clone,
    {
        if capacity == 0 || u32::try_from(capacity).is_err() {
            return Err(Error::new(
                ErrorKind::IncompatibleCapacity,
                "merged capacity must be between 1 and u32::MAX",
            )
            .with_context("capacity", capacity));
        }
        if self.seed != other.seed {
            return Err(Error::new(
                ErrorKind::IncompatibleSeed,
                "cannot merge sketches with different seeds",
            )
            .with_context("left", self.seed)
            .with_context("right", other.seed));
        }

        let Some(total_weight) = self.total_weight.checked_add(other.total_weight) else {
            return Err(Error::new(
                ErrorKind::WeightOverflow,
                "combined weight does not fit in 64 bits",
            )
            .with_context("left", self.total_weight)
            .with_context("right", other.total_weight));
        };

        // counts sum to at most the total weight, so neither sum below overflows
        let mut combined: Vec<(ItemKey, &T, u64, u64)> =
            Vec::with_capacity(self.len() + other.len());
        let mut positions: HashMap<ItemKey, usize> = HashMap::with_capacity(combined.capacity());
        for source in [self, other] {
            for (key, record) in &source.records {
                match positions.get(key) {
                    Some(&pos) => {
                        combined[pos].2 += record.count;
                        combined[pos].3 += record.error;
                    }
                    None => {
                        positions.insert(*key, combined.len());
                        combined.push((*key, &record.value, record.count, record.error));
                    }
                }
            }
        }
        // lightest first, so evictions fall on light records; ties by key
        combined.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)));

        let mut merged = Self::with_config(capacity, self.seed, self.batch_size);
        merged.total_weight = total_weight;
        for (key, value, count, error) in combined {
            if let Some((evicted, evicted_count)) =
                merged.insert_record(key, value.clone(), count, error)
            {
                tracing::debug!(
                    %evicted,
                    evicted_count,
                    inserted = %key,
                    "merge evicted a record while re-inserting"
                );
            }
        }
        Ok(merged)
    }

    /// Exports the summary as a plain [`Snapshot`].
    pub fn export(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        let tracked_records = self
            .records
            .iter()
            .map(|(key, record)| {
                let record = SnapshotRecord {
                    count: record.count,
                    error: record.error,
                    value: record.value.clone(),
                };
                (*key, record)
            })
            .collect();
        let mut buckets: Vec<SnapshotBucket> = self
            .buckets
            .slots()
            .iter()
            .map(|bucket| {
                let mut member_keys = Vec::with_capacity(bucket.len());
                member_keys.extend(bucket.keys().copied());
                SnapshotBucket {
                    count: bucket.count(),
                    member_keys,
                }
            })
            .collect();
        // slots never allocated are parked too
        buckets.resize(self.capacity(), SnapshotBucket::default());
        Snapshot {
            capacity: self.capacity(),
            active_bucket_count: self.num_active_buckets(),
            seed: self.seed,
            batch_size: self.batch_size,
            total_weight: self.total_weight,
            tracked_records,
            buckets,
        }
    }

    /// Rebuilds a summary from a [`Snapshot`].
    ///
    /// The result answers [`frequency`](Self::frequency) and
    /// [`top_k`](Self::top_k) exactly like the exported summary, and keeps its
    /// seed and batch size.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDeserializeData`] if the snapshot violates
    /// any structural invariant (see [`Snapshot::validate`]) or if a retained
    /// value does not hash to its key.
    pub fn import(snapshot: Snapshot<T>) -> Result<Self, Error> {
        snapshot
            .validate()
            .inspect_err(|err| tracing::debug!(%err, "rejected snapshot"))?;

        let Snapshot {
            capacity,
            active_bucket_count,
            seed,
            batch_size,
            total_weight,
            tracked_records,
            mut buckets,
        } = snapshot;
        buckets.truncate(active_bucket_count);
        let mut sketch = Self::with_config(capacity, seed, batch_size);
        sketch.total_weight = total_weight;
        sketch.restore(tracked_records, buckets)?;
        Ok(sketch)
    }

    /// Fills an empty sketch from validated active buckets, oldest member first.
    fn restore(
        &mut self,
        mut tracked_records: BTreeMap<ItemKey, SnapshotRecord<T>>,
        active: Vec<SnapshotBucket>,
    ) -> Result<(), Error> {
        for bucket in active {
            let Some(count) = bucket.count else {
                break;
            };
            let idx = self.buckets.ensure_bucket(count);
            for key in bucket.member_keys {
                let Some(record) = tracked_records.remove(&key) else {
                    return Err(Error::deserial("bucket member has no tracked record")
                        .with_context("key", key));
                };
                if ItemKey::of(&record.value, self.seed) != key {
                    let err = Error::deserial("retained value does not match its key")
                        .with_context("key", key);
                    tracing::debug!(%err, "rejected snapshot");
                    return Err(err);
                }
                let seq = self.bump_seq();
                self.buckets.insert(idx, seq, key);
                self.records.insert(
                    key,
                    MonitoredRecord {
                        value: record.value,
                        count: record.count,
                        error: record.error,
                        seq,
                    },
                );
            }
        }
        Ok(())
    }

    /// Serializes this sketch into a byte vector using the provided serializer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spacesaving::frequencies::SpaceSavingSketch;
    /// # use spacesaving::frequencies::StringSerde;
    /// let mut sketch = SpaceSavingSketch::new(8);
    /// sketch.ingest_all(["x", "y", "x"].map(String::from));
    ///
    /// let bytes = sketch.serialize_with(&StringSerde);
    /// let restored = SpaceSavingSketch::<String>::deserialize_with(&bytes, &StringSerde).unwrap();
    /// assert_eq!(restored.frequency("x"), Some(2));
    /// ```
    pub fn serialize_with<S: ItemsSerde<T>>(&self, serde: &S) -> Vec<u8> {
        let mut iter = self.top_k();
        let records: Vec<&MonitoredRecord<T>> = std::iter::from_fn(|| iter.next_record()).collect();
        let values: Vec<&T> = records.iter().map(|record| &record.value).collect();
        let items = serde.serialize_items(&values);

        let mut bytes = SketchBytes::with_capacity(
            PREAMBLE_LONGS as usize * 8 + records.len() * RECORD_BYTES + items.len(),
        );
        bytes.write_u8(PREAMBLE_LONGS);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(FAMILY_ID);
        bytes.write_u8(if self.is_empty() { EMPTY_FLAG_MASK } else { 0 });
        bytes.write_u32_le(self.seed);
        bytes.write_u32_le(self.capacity() as u32);
        bytes.write_u32_le(self.num_active_buckets() as u32);
        bytes.write_u32_le(records.len() as u32);
        bytes.write_u32_le(self.batch_size as u32);
        bytes.write_u64_le(self.total_weight);

        for record in &records {
            let (hi, lo) = ItemKey::of(&record.value, self.seed).parts();
            bytes.write_u64_le(record.count);
            bytes.write_u64_le(record.error);
            bytes.write_u64_le(hi);
            bytes.write_u64_le(lo);
        }
        bytes.write(&items);
        bytes.into_bytes()
    }

    /// Deserializes a sketch from bytes using the provided serializer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDeserializeData`] if the bytes are
    /// truncated, carry another family or version, or describe an invalid
    /// summary.
    pub fn deserialize_with<S: ItemsSerde<T>>(bytes: &[u8], serde: &S) -> Result<Self, Error> {
        let mut cursor = SketchSlice::new(bytes);

        let preamble_longs = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("preamble_longs"))?;
        let serial_version = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("serial_version"))?;
        let family_id = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("family_id"))?;
        if family_id != FAMILY_ID {
            return Err(Error::invalid_family(FAMILY_ID, family_id, "SpaceSaving"));
        }
        if serial_version != SERIAL_VERSION {
            return Err(Error::unsupported_serial_version(
                SERIAL_VERSION,
                serial_version,
            ));
        }
        if preamble_longs != PREAMBLE_LONGS {
            return Err(Error::invalid_preamble_longs(PREAMBLE_LONGS, preamble_longs));
        }

        let flags = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("flags"))?;
        let seed = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("seed"))?;
        let capacity = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("capacity"))? as usize;
        let active_buckets = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("active_buckets"))? as usize;
        let num_records = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("num_records"))? as usize;
        let batch_size = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("batch_size"))? as usize;
        let total_weight = cursor
            .read_u64_le()
            .map_err(|_| Error::insufficient_data("total_weight"))?;

        validate_config(capacity, batch_size)?;
        let is_empty = (flags & EMPTY_FLAG_MASK) != 0;
        if is_empty != (num_records == 0) {
            return Err(Error::deserial("empty flag disagrees with record count")
                .with_context("num_records", num_records));
        }
        if num_records > capacity {
            return Err(Error::deserial("more tracked records than capacity")
                .with_context("records", num_records)
                .with_context("capacity", capacity));
        }
        if cursor.remaining().len() < num_records.saturating_mul(RECORD_BYTES) {
            return Err(Error::insufficient_data("records"));
        }

        let mut entries = Vec::with_capacity(num_records);
        for _ in 0..num_records {
            let count = cursor
                .read_u64_le()
                .map_err(|_| Error::insufficient_data("count"))?;
            let error = cursor
                .read_u64_le()
                .map_err(|_| Error::insufficient_data("error"))?;
            let hi = cursor
                .read_u64_le()
                .map_err(|_| Error::insufficient_data("key"))?;
            let lo = cursor
                .read_u64_le()
                .map_err(|_| Error::insufficient_data("key"))?;
            entries.push((ItemKey::from_parts(hi, lo), count, error));
        }
        let (items, consumed) = serde.deserialize_items(cursor.remaining(), num_records)?;
        if items.len() != num_records {
            return Err(Error::deserial("item count mismatch during deserialization")
                .with_context("expected", num_records)
                .with_context("actual", items.len()));
        }
        cursor
            .advance(consumed)
            .map_err(|_| Error::insufficient_data("items"))?;

        // records are stored in ascending count order, one run per bucket
        let mut buckets: Vec<SnapshotBucket> = Vec::new();
        let mut tracked_records = BTreeMap::new();
        for ((key, count, error), value) in entries.into_iter().zip(items) {
            match buckets.last_mut() {
                Some(bucket) if bucket.count == Some(count) => bucket.member_keys.push(key),
                _ => buckets.push(SnapshotBucket {
                    count: Some(count),
                    member_keys: vec![key],
                }),
            }
            tracked_records.insert(key, SnapshotRecord { count, error, value });
        }
        if buckets.len() != active_buckets {
            return Err(Error::deserial("active bucket count mismatch")
                .with_context("declared", active_buckets)
                .with_context("actual", buckets.len()));
        }
        // the parked tail is implied by capacity and never materialized
        validate_active(capacity, total_weight, &tracked_records, &buckets)
            .inspect_err(|err| tracing::debug!(%err, "rejected serialized sketch"))?;

        let mut sketch = Self::with_config(capacity, seed, batch_size);
        sketch.total_weight = total_weight;
        sketch.restore(tracked_records, buckets)?;
        Ok(sketch)
    }
}

impl<T: Hash> Extend<T> for SpaceSavingSketch<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.ingest_all(iter);
    }
}
