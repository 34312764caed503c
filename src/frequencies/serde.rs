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

//! Serialization helpers for items retained by a sketch.

use std::str;

use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::error::Error;

/// Serializer/deserializer for items stored in a sketch.
pub trait ItemsSerde<T> {
    /// Serializes a sequence of items to a byte buffer.
    fn serialize_items(&self, items: &[&T]) -> Vec<u8>;

    /// Deserializes `num_items` from bytes, returning items and bytes consumed.
    fn deserialize_items(&self, bytes: &[u8], num_items: usize) -> Result<(Vec<T>, usize), Error>;
}

/// Serializer for UTF-8 strings as length-prefixed byte runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringSerde;

impl ItemsSerde<String> for StringSerde {
    fn serialize_items(&self, items: &[&String]) -> Vec<u8> {
        let mut out = SketchBytes::with_capacity(items.iter().map(|s| s.len() + 4).sum());
        for item in items {
            let bytes = item.as_bytes();
            out.write_u32_le(bytes.len() as u32);
            out.write(bytes);
        }
        out.into_bytes()
    }

    fn deserialize_items(&self, bytes: &[u8], num_items: usize) -> Result<(Vec<String>, usize), Error> {
        let mut slice = SketchSlice::new(bytes);
        let mut items = Vec::with_capacity(num_items.min(bytes.len() / 4));
        for _ in 0..num_items {
            let len = slice
                .read_u32_le()
                .map_err(|_| Error::insufficient_data("string length"))? as usize;
            let Some(payload) = slice.remaining().get(..len) else {
                return Err(Error::insufficient_data("string payload"));
            };
            let value = str::from_utf8(payload)
                .map_err(|err| Error::deserial("invalid UTF-8 string payload").set_source(err))?
                .to_string();
            items.push(value);
            slice
                .advance(len)
                .map_err(|_| Error::insufficient_data("string payload"))?;
        }
        Ok((items, bytes.len() - slice.remaining().len()))
    }
}

/// Serializer for i64 items as fixed 8-byte little endian words.
#[derive(Debug, Default, Clone, Copy)]
pub struct I64Serde;

impl ItemsSerde<i64> for I64Serde {
    fn serialize_items(&self, items: &[&i64]) -> Vec<u8> {
        let mut out = SketchBytes::with_capacity(items.len() * 8);
        for item in items {
            out.write_u64_le(**item as u64);
        }
        out.into_bytes()
    }

    fn deserialize_items(&self, bytes: &[u8], num_items: usize) -> Result<(Vec<i64>, usize), Error> {
        let needed = num_items
            .checked_mul(8)
            .ok_or_else(|| Error::deserial("items size overflow"))?;
        if bytes.len() < needed {
            return Err(Error::insufficient_data("i64 items"));
        }
        let mut slice = SketchSlice::new(bytes);
        let mut items = Vec::with_capacity(num_items);
        for _ in 0..num_items {
            let value = slice
                .read_u64_le()
                .map_err(|_| Error::insufficient_data("i64 items"))?;
            items.push(value as i64);
        }
        Ok((items, needed))
    }
}
