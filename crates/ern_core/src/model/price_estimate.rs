//! Ride price estimate value object from the uber API schema.

use crate::codec::Parcelable;
use crate::model::schema::{FieldKind, FieldSpec, ModelSchema};
use serde::{Deserialize, Serialize};

const KEY_BUNDLE_PRICE_ESTIMATE: &str = "priceEstimate";

/// Price estimate for one product.
///
/// Monetary bounds are floating point as declared by the upstream API, so
/// this type is `PartialEq` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    product_id: String,
    currency_code: String,
    display_name: Option<String>,
    estimate: Option<String>,
    low_estimate: Option<f64>,
    high_estimate: Option<f64>,
    surge_multiplier: Option<f64>,
}

impl PriceEstimate {
    pub fn builder(
        product_id: impl Into<String>,
        currency_code: impl Into<String>,
    ) -> PriceEstimateBuilder {
        PriceEstimateBuilder::new(product_id, currency_code)
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// ISO 4217 currency code.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Formatted estimate string, e.g. `$23-29`.
    pub fn estimate(&self) -> Option<&str> {
        self.estimate.as_deref()
    }

    pub fn low_estimate(&self) -> Option<f64> {
        self.low_estimate
    }

    pub fn high_estimate(&self) -> Option<f64> {
        self.high_estimate
    }

    pub fn surge_multiplier(&self) -> Option<f64> {
        self.surge_multiplier
    }

    pub fn schema() -> ModelSchema {
        ModelSchema {
            name: "PriceEstimate",
            bundle_key: KEY_BUNDLE_PRICE_ESTIMATE,
            fields: vec![
                FieldSpec::required("product_id", FieldKind::String),
                FieldSpec::required("currency_code", FieldKind::String),
                FieldSpec::optional("display_name", FieldKind::String),
                FieldSpec::optional("estimate", FieldKind::String),
                FieldSpec::optional("low_estimate", FieldKind::Double),
                FieldSpec::optional("high_estimate", FieldKind::Double),
                FieldSpec::optional("surge_multiplier", FieldKind::Double),
            ],
        }
    }
}

impl Parcelable for PriceEstimate {
    const TYPE_NAME: &'static str = "com.walmartlabs.ern.uber.model.PriceEstimate";
    const BUNDLE_KEY: &'static str = KEY_BUNDLE_PRICE_ESTIMATE;
}

/// Mutable accumulator for `PriceEstimate`.
///
/// `build` clones the accumulated strings, so the builder can keep being
/// edited after producing a value.
#[derive(Debug, Clone)]
pub struct PriceEstimateBuilder {
    product_id: String,
    currency_code: String,
    display_name: Option<String>,
    estimate: Option<String>,
    low_estimate: Option<f64>,
    high_estimate: Option<f64>,
    surge_multiplier: Option<f64>,
}

impl PriceEstimateBuilder {
    pub fn new(product_id: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            currency_code: currency_code.into(),
            display_name: None,
            estimate: None,
            low_estimate: None,
            high_estimate: None,
            surge_multiplier: None,
        }
    }

    pub fn display_name(&mut self, value: Option<&str>) -> &mut Self {
        self.display_name = value.map(str::to_owned);
        self
    }

    pub fn estimate(&mut self, value: Option<&str>) -> &mut Self {
        self.estimate = value.map(str::to_owned);
        self
    }

    pub fn low_estimate(&mut self, value: impl Into<Option<f64>>) -> &mut Self {
        self.low_estimate = value.into();
        self
    }

    pub fn high_estimate(&mut self, value: impl Into<Option<f64>>) -> &mut Self {
        self.high_estimate = value.into();
        self
    }

    pub fn surge_multiplier(&mut self, value: impl Into<Option<f64>>) -> &mut Self {
        self.surge_multiplier = value.into();
        self
    }

    pub fn build(&self) -> PriceEstimate {
        PriceEstimate {
            product_id: self.product_id.clone(),
            currency_code: self.currency_code.clone(),
            display_name: self.display_name.clone(),
            estimate: self.estimate.clone(),
            low_estimate: self.low_estimate,
            high_estimate: self.high_estimate,
            surge_multiplier: self.surge_multiplier,
        }
    }
}
