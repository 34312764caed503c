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

use std::fmt;
use std::hash::Hash;

use crate::hash::hash128;

/// Canonical identity of a tracked item.
///
/// Two items with the same key are treated as the same tracked entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    hi: u64,
    lo: u64,
}

impl ItemKey {
    /// Derives the key of `item` under `seed`.
    pub fn of<T: Hash + ?Sized>(item: &T, seed: u32) -> Self {
        let (lo, hi) = hash128(item, seed);
        Self { hi, lo }
    }

    /// Rebuilds a key from its two halves.
    pub fn from_parts(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Returns the high and low 64-bit halves.
    pub fn parts(&self) -> (u64, u64) {
        (self.hi, self.lo)
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKey({:016x}{:016x})", self.hi, self.lo)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}
