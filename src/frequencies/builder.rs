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

use crate::error::Error;
use crate::frequencies::sketch::SpaceSavingSketch;
use crate::hash::DEFAULT_UPDATE_SEED;

/// Default number of tracked items, matching the classic stream-summary default.
pub const DEFAULT_CAPACITY: usize = 10;
/// Default number of items ingested between two [`Pacer::pause`](super::Pacer::pause) calls.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Builder for creating [`SpaceSavingSketch`] instances.
///
/// # Examples
///
/// ```
/// # use spacesaving::frequencies::SpaceSavingBuilder;
/// # use spacesaving::frequencies::SpaceSavingSketch;
/// let sketch: SpaceSavingSketch<String> = SpaceSavingBuilder::default()
///     .capacity(128)
///     .seed(42)
///     .batch_size(256)
///     .build()
///     .unwrap();
/// assert_eq!(sketch.capacity(), 128);
/// assert_eq!(sketch.seed(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceSavingBuilder {
    capacity: usize,
    seed: u32,
    batch_size: usize,
}

impl Default for SpaceSavingBuilder {
    fn default() -> Self {
        SpaceSavingBuilder {
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_UPDATE_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SpaceSavingBuilder {
    /// Sets the maximum number of distinct items tracked at once (default: 10).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the key derivation seed (default: 9001).
    ///
    /// **Important**: Sketches with different seeds cannot be merged.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many items are ingested between two pacing pauses (default: 1024).
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builds the sketch.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the capacity or the batch size is zero, or if either does not fit the
    /// 32-bit fields of the serialized image.
    pub fn build<T>(self) -> Result<SpaceSavingSketch<T>, Error> {
        if self.capacity == 0 {
            return Err(Error::config_invalid("capacity must be greater than 0"));
        }
        if u32::try_from(self.capacity).is_err() {
            return Err(Error::config_invalid("capacity must fit in 32 bits")
                .with_context("capacity", self.capacity));
        }
        if self.batch_size == 0 {
            return Err(Error::config_invalid("batch size must be greater than 0"));
        }
        if u32::try_from(self.batch_size).is_err() {
            return Err(Error::config_invalid("batch size must fit in 32 bits")
                .with_context("batch_size", self.batch_size));
        }
        Ok(SpaceSavingSketch::with_config(
            self.capacity,
            self.seed,
            self.batch_size,
        ))
    }
}
