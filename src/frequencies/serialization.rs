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

//! Serialization constants for Space-Saving sketches.
//!
//! Layout of the preamble (little endian):
//!
//! ```text
//!  byte  0      preamble longs (4)
//!  byte  1      serial version
//!  byte  2      family id
//!  byte  3      flags
//!  bytes 4..8   seed (u32)
//!  bytes 8..12  capacity (u32)
//!  bytes 12..16 active buckets (u32)
//!  bytes 16..20 tracked records (u32)
//!  bytes 20..24 batch size (u32)
//!  bytes 24..32 total weight (u64)
//! ```
//!
//! The preamble is followed by one 32-byte entry per record in ascending count
//! order (count, error, key high half, key low half) and then the items block
//! written by an [`ItemsSerde`](super::ItemsSerde) in the same order.

/// Family ID for Space-Saving sketches.
pub(super) const FAMILY_ID: u8 = 22;
/// Serialization version.
pub(super) const SERIAL_VERSION: u8 = 1;
/// Preamble size in 8-byte words.
pub(super) const PREAMBLE_LONGS: u8 = 4;
/// Set when no record is tracked.
pub(super) const EMPTY_FLAG_MASK: u8 = 1 << 2;
/// Bytes per record entry.
pub(super) const RECORD_BYTES: usize = 32;
