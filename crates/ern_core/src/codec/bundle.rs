//! Named key-value container for values crossing a component boundary.

use super::{CodecResult, Parcel, Parcelable};
use std::collections::BTreeMap;

/// One bundle entry.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    /// Opaque parcel bytes tagged with the writer's `Parcelable::TYPE_NAME`.
    Parcelable {
        type_name: &'static str,
        blob: Vec<u8>,
    },
}

/// String-keyed bag of typed values.
///
/// Typed getters return `None` both for a missing key and for an entry of a
/// different kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    /// Inserts or replaces one raw entry.
    pub fn put(&mut self, key: impl Into<String>, value: BundleValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, BundleValue::Bool(value));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i32) {
        self.put(key, BundleValue::Int(value));
    }

    pub fn put_long(&mut self, key: impl Into<String>, value: i64) {
        self.put(key, BundleValue::Long(value));
    }

    pub fn put_double(&mut self, key: impl Into<String>, value: f64) {
        self.put(key, BundleValue::Double(value));
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key, BundleValue::String(value.into()));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            BundleValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.entries.get(key)? {
            BundleValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            BundleValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            BundleValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            BundleValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Stores `value` as an opaque parcel blob under `key`.
    pub fn put_parcelable<T: Parcelable>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> CodecResult<()> {
        let mut parcel = Parcel::new();
        value.write_to_parcel(&mut parcel)?;
        self.put(
            key,
            BundleValue::Parcelable {
                type_name: T::TYPE_NAME,
                blob: parcel.into_bytes(),
            },
        );
        Ok(())
    }

    /// Decodes the parcelable stored under `key`.
    ///
    /// Returns `None` when the key is missing, the entry is not a parcelable,
    /// it was written by another type, or the blob does not decode.
    pub fn get_parcelable<T: Parcelable>(&self, key: &str) -> Option<T> {
        let BundleValue::Parcelable { type_name, blob } = self.entries.get(key)? else {
            return None;
        };
        if *type_name != T::TYPE_NAME {
            return None;
        }

        let mut parcel = Parcel::from_bytes(blob.clone());
        match T::create_from_parcel(&mut parcel) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!(
                    "event=bundle_get module=codec status=error type={} error={}",
                    T::TYPE_NAME,
                    err
                );
                None
            }
        }
    }
}
