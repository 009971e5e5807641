//! Geographic coordinate value object from the weather API schema.
//!
//! # Invariants
//! - `lat` is always present; `lon` may be absent.
//! - Instances are immutable; build a new one to change a field.

use crate::codec::Parcelable;
use crate::model::schema::{FieldKind, FieldSpec, ModelSchema};
use serde::{Deserialize, Serialize};

const KEY_BUNDLE_LAT_LONG: &str = "latLong";

/// Latitude/longitude pair in integer degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatLong {
    lat: i32,
    lon: Option<i32>,
}

impl LatLong {
    /// Starts a builder with the required latitude.
    pub fn builder(lat: i32) -> LatLongBuilder {
        LatLongBuilder::new(lat)
    }

    pub fn lat(&self) -> i32 {
        self.lat
    }

    pub fn lon(&self) -> Option<i32> {
        self.lon
    }

    pub fn schema() -> ModelSchema {
        ModelSchema {
            name: "LatLong",
            bundle_key: KEY_BUNDLE_LAT_LONG,
            fields: vec![
                FieldSpec::required("lat", FieldKind::Int),
                FieldSpec::optional("lon", FieldKind::Int),
            ],
        }
    }
}

impl Parcelable for LatLong {
    const TYPE_NAME: &'static str = "com.walmartlabs.ern.weather.model.LatLong";
    const BUNDLE_KEY: &'static str = KEY_BUNDLE_LAT_LONG;
}

/// Mutable accumulator for `LatLong`.
#[derive(Debug, Clone)]
pub struct LatLongBuilder {
    lat: i32,
    lon: Option<i32>,
}

impl LatLongBuilder {
    pub fn new(lat: i32) -> Self {
        Self { lat, lon: None }
    }

    pub fn lon(&mut self, lon: impl Into<Option<i32>>) -> &mut Self {
        self.lon = lon.into();
        self
    }

    pub fn build(&self) -> LatLong {
        LatLong {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
