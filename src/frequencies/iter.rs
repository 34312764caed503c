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
use std::collections::btree_map;
use std::slice;

use crate::frequencies::bucket::Bucket;
use crate::frequencies::key::ItemKey;
use crate::frequencies::record::MonitoredRecord;

/// Iterator over tracked items in ascending order of estimated count.
///
/// Items sharing a count are yielded oldest first. The heaviest items come
/// last. Returned by [`SpaceSavingSketch::top_k`](super::SpaceSavingSketch::top_k).
#[derive(Debug)]
pub struct TopK<'a, T> {
    buckets: slice::Iter<'a, Bucket>,
    members: Option<btree_map::Values<'a, u64, ItemKey>>,
    records: &'a HashMap<ItemKey, MonitoredRecord<T>>,
    remaining: usize,
}

impl<'a, T> TopK<'a, T> {
    pub(super) fn new(
        buckets: &'a [Bucket],
        records: &'a HashMap<ItemKey, MonitoredRecord<T>>,
    ) -> Self {
        TopK {
            buckets: buckets.iter(),
            members: None,
            records,
            remaining: records.len(),
        }
    }

    pub(super) fn next_record(&mut self) -> Option<&'a MonitoredRecord<T>> {
        loop {
            if let Some(members) = &mut self.members {
                if let Some(key) = members.next() {
                    self.remaining = self.remaining.saturating_sub(1);
                    return self.records.get(key);
                }
            }
            self.members = Some(self.buckets.next()?.keys());
        }
    }
}

impl<'a, T> Iterator for TopK<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().map(|record| &record.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for TopK<'_, T> {}
