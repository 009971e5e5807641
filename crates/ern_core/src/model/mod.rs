//! Generated value objects shared across the container boundary.
//!
//! # Responsibility
//! - Hold immutable, builder-constructed models per API schema.
//! - Publish each model's schema for authoring-time validation.
//!
//! # Invariants
//! - Required fields are builder constructor parameters, never setters.
//! - Parcel field order equals schema field order.

pub mod lat_long;
pub mod price_estimate;
pub mod schema;
