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

//! Key derivation for tracked items.
//!
//! Items are reduced to a 128-bit MurmurHash3 (x64_128) digest of their [`Hash`]
//! representation. Two equal items always produce the same digest; distinct items
//! collide with negligible probability.

use std::hash::Hash;

/// Default seed used when deriving item keys.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// Hashes `item` with MurmurHash3 x64_128 under `seed`.
pub(crate) fn hash128<T: Hash + ?Sized>(item: &T, seed: u32) -> (u64, u64) {
    let mut hasher = mur3::Hasher128::with_seed(seed);
    item.hash(&mut hasher);
    hasher.finish128()
}
