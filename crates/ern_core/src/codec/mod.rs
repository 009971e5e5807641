//! Cross-boundary codec contracts.
//!
//! # Responsibility
//! - Provide the ordered binary stream (`Parcel`) and the key-value
//!   container (`Bundle`) used to move value objects between components.
//! - Define the `Parcelable` contract generated models implement.
//!
//! # Invariants
//! - A parcelable value written to a parcel reads back equal, field for field.
//! - Bundle lookups never fail loudly: shape mismatches yield `None`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bundle;
pub mod parcel;

pub use bundle::{Bundle, BundleValue};
pub use parcel::Parcel;

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode/decode failures raised by parcel operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    Encode(String),
    Decode { offset: usize, message: String },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(message) => write!(f, "parcel encode failed: {message}"),
            Self::Decode { offset, message } => {
                write!(f, "parcel decode failed at byte {offset}: {message}")
            }
        }
    }
}

impl Error for CodecError {}

/// Value object that can cross a component boundary.
///
/// The default parcel methods encode the whole struct through serde, which
/// writes fields in declaration order with no tags. Models that need a
/// different field order override both methods together.
pub trait Parcelable: Serialize + DeserializeOwned {
    /// Stable identity checked when reading a bundle entry.
    const TYPE_NAME: &'static str;
    /// Fixed key used by `to_bundle` / `from_bundle`.
    const BUNDLE_KEY: &'static str;

    fn write_to_parcel(&self, dest: &mut Parcel) -> CodecResult<()> {
        dest.write(self)
    }

    /// Builds an instance straight from the stream, without a builder.
    fn create_from_parcel(source: &mut Parcel) -> CodecResult<Self> {
        source.read()
    }

    fn to_parcel_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut parcel = Parcel::new();
        self.write_to_parcel(&mut parcel)?;
        Ok(parcel.into_bytes())
    }

    fn from_parcel_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut parcel = Parcel::from_bytes(bytes.to_vec());
        Self::create_from_parcel(&mut parcel)
    }

    /// Wraps this value under `BUNDLE_KEY` in a fresh bundle.
    ///
    /// Encoding plain serde structs into a `Vec` cannot fail, so a failure
    /// here leaves the bundle without the entry and is logged.
    fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        if let Err(err) = bundle.put_parcelable(Self::BUNDLE_KEY, self) {
            log::error!(
                "event=bundle_put module=codec status=error type={} error={}",
                Self::TYPE_NAME,
                err
            );
        }
        bundle
    }

    /// Returns the value stored under `BUNDLE_KEY`.
    ///
    /// `None` when the bundle is absent, the key is missing, or the entry is
    /// not this type.
    fn from_bundle(bundle: Option<&Bundle>) -> Option<Self> {
        bundle?.get_parcelable(Self::BUNDLE_KEY)
    }
}
