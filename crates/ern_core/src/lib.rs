//! Core of the Electrode native container.
//! Value objects crossing the host boundary and the runtime container
//! lifecycle live here; host bindings stay thin.

pub mod codec;
pub mod container;
pub mod logging;
pub mod model;

pub use codec::{Bundle, BundleValue, CodecError, CodecResult, Parcel, Parcelable};
pub use container::config::{ConfigError, ContainerConfig};
pub use container::host::{ContainerError, ContainerHost, ReactContainer};
pub use container::plugin::{
    PluginConfig, PluginDescriptor, PluginError, PluginHook, PluginRegistry,
};
pub use container::runtime::{
    ActivityHandle, HostApplication, LifecycleState, RuntimeContext, RuntimeError,
    RuntimeFactory, RuntimeManager, RuntimeManagerBuilder, RuntimeSettings,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::lat_long::{LatLong, LatLongBuilder};
pub use model::price_estimate::{PriceEstimate, PriceEstimateBuilder};
pub use model::schema::{FieldKind, FieldSpec, ModelSchema, SchemaError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
