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

/// Per-item state held by a sketch.
///
/// `count` may overstate the true frequency by at most `error`, so the true
/// frequency lies in `[count - error, count]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MonitoredRecord<T> {
    pub(super) value: T,
    pub(super) count: u64,
    pub(super) error: u64,
    /// Position of the item inside its bucket; smaller is older.
    pub(super) seq: u64,
}

impl<T> MonitoredRecord<T> {
    pub(super) fn lower_bound(&self) -> u64 {
        self.count - self.error
    }
}

/// Result row for frequent item queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<T> {
    item: T,
    count: u64,
    error: u64,
}

impl<T> Row<T> {
    pub(super) fn new(item: T, count: u64, error: u64) -> Self {
        Self { item, count, error }
    }

    /// Returns the item value.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Consumes the row, returning the item value.
    pub fn into_item(self) -> T {
        self.item
    }

    /// Returns the estimated frequency, which never underestimates.
    pub fn estimate(&self) -> u64 {
        self.count
    }

    /// Returns the maximum overcount of the estimate.
    pub fn error(&self) -> u64 {
        self.error
    }

    /// Returns the upper bound for the frequency.
    pub fn upper_bound(&self) -> u64 {
        self.count
    }

    /// Returns the lower bound for the frequency.
    pub fn lower_bound(&self) -> u64 {
        self.count - self.error
    }
}
