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

//! Space-Saving summaries for finding heavy hitters in data streams.
//!
//! A [`SpaceSavingSketch`] tracks at most `capacity` distinct items. Every tracked
//! item has a count that never underestimates its true frequency and an error
//! bound such that the true frequency is at least `count - error`. Once the
//! sketch is full, a newly observed item replaces the item with the smallest
//! count and inherits that count as its error.
//!
//! Items with equal counts share a bucket; buckets are kept in ascending count
//! order so that the eviction candidate is always at the front.
//!
//! # Usage
//!
//! ```rust
//! # use spacesaving::frequencies::SpaceSavingSketch;
//! let mut sketch = SpaceSavingSketch::new(10);
//! for i in 0..10 {
//!     sketch.ingest(i.to_string());
//! }
//! for _ in 0..10 {
//!     sketch.ingest("42".to_string());
//! }
//! assert_eq!(sketch.frequency("42"), Some(10));
//! assert_eq!(sketch.top_k().last().map(String::as_str), Some("42"));
//! ```
//!
//! # Merging
//!
//! ```rust
//! # use spacesaving::frequencies::SpaceSavingSketch;
//! let mut left = SpaceSavingSketch::new(16);
//! left.ingest_all(["beans"; 5]);
//! let mut right = SpaceSavingSketch::new(16);
//! right.ingest_all(["beans"; 3]);
//!
//! let merged = left.merge(&right).unwrap();
//! assert_eq!(merged.frequency("beans"), Some(8));
//! ```
//!
//! # Serialization
//!
//! ```rust
//! # use spacesaving::frequencies::SpaceSavingSketch;
//! let mut sketch = SpaceSavingSketch::new(16);
//! sketch.ingest_all([1i64, 2, 2, 3, 3, 3]);
//!
//! let snapshot = sketch.export();
//! let restored = SpaceSavingSketch::import(snapshot).unwrap();
//! assert_eq!(restored.frequency(&3), Some(3));
//! ```

mod bucket;
mod builder;
mod iter;
mod key;
mod record;
mod serde;
mod serialization;
mod sketch;
mod snapshot;

pub use self::builder::DEFAULT_BATCH_SIZE;
pub use self::builder::DEFAULT_CAPACITY;
pub use self::builder::SpaceSavingBuilder;
pub use self::iter::TopK;
pub use self::key::ItemKey;
pub use self::record::Row;
pub use self::serde::I64Serde;
pub use self::serde::ItemsSerde;
pub use self::serde::StringSerde;
pub use self::sketch::NoPacer;
pub use self::sketch::Pacer;
pub use self::sketch::SpaceSavingSketch;
pub use self::snapshot::Snapshot;
pub use self::snapshot::SnapshotBucket;
pub use self::snapshot::SnapshotRecord;
