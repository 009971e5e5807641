//! Ordered binary stream used to carry value objects across a boundary.
//!
//! # Responsibility
//! - Append typed values in call order and read them back in the same order.
//! - Keep the wire shape free of tags, lengths-per-record and version headers.
//!
//! # Invariants
//! - Values are encoded with bincode default options (fixed-width
//!   little-endian integers, one-byte `Option` marker, `u64` string length).
//! - Reads never move the cursor past the end of the buffer.
//! - A length prefix larger than the unread bytes fails the read.

use super::{CodecError, CodecResult};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Append-only write buffer with an independent read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parcel {
    data: Vec<u8>,
    position: usize,
}

impl Parcel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps bytes produced by another parcel; the cursor starts at zero.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read offset in bytes.
    pub fn data_position(&self) -> usize {
        self.position
    }

    /// Moves the read cursor back to the first byte.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Number of bytes not yet consumed by reads.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Appends one value at the end of the stream.
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> CodecResult<()> {
        wire_options()
            .serialize_into(&mut self.data, value)
            .map_err(|err| CodecError::Encode(err.to_string()))
    }

    /// Reads one value at the cursor and advances past it.
    pub fn read<T: DeserializeOwned>(&mut self) -> CodecResult<T> {
        let mut unread = &self.data[self.position..];
        let before = unread.len();
        let value = wire_options()
            .with_limit(before as u64)
            .deserialize_from(&mut unread)
            .map_err(|err| CodecError::Decode {
                offset: self.position,
                message: err.to_string(),
            })?;
        self.position += before - unread.len();
        Ok(value)
    }

    pub fn write_i32(&mut self, value: i32) -> CodecResult<()> {
        self.write(&value)
    }

    pub fn read_i32(&mut self) -> CodecResult<i32> {
        self.read()
    }

    pub fn write_f64(&mut self, value: f64) -> CodecResult<()> {
        self.write(&value)
    }

    pub fn read_f64(&mut self) -> CodecResult<f64> {
        self.read()
    }

    pub fn write_str(&mut self, value: &str) -> CodecResult<()> {
        self.write(value)
    }

    pub fn read_string(&mut self) -> CodecResult<String> {
        self.read()
    }

    /// Writes a presence marker followed by the value when present.
    pub fn write_optional<T: Serialize>(&mut self, value: &Option<T>) -> CodecResult<()> {
        self.write(value)
    }

    pub fn read_optional<T: DeserializeOwned>(&mut self) -> CodecResult<Option<T>> {
        self.read()
    }
}

/// Fixed-width little-endian integers, trailing bytes left for the next read.
fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}
