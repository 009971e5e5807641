//! Container configuration.
//!
//! # Invariants
//! - A config is fully assembled before `ContainerHost::initialize` and is
//!   never mutated by the container afterwards.
//! - Missing JSON fields fall back to the documented defaults.

use crate::container::runtime::LifecycleState;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_BUNDLE_ASSET_NAME: &str = "index.android.bundle";
pub const DEFAULT_JS_MAIN_MODULE_NAME: &str = "index.android";

/// General runtime settings for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// Enables runtime developer tooling (reload menu, overlay, remote JS).
    pub react_native_developer_support: bool,
    /// Packaged JS bundle asset the runtime loads.
    pub bundle_asset_name: String,
    /// JS entry module name used by the development server.
    pub js_main_module_name: String,
    pub initial_lifecycle_state: LifecycleState,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            react_native_developer_support: false,
            bundle_asset_name: DEFAULT_BUNDLE_ASSET_NAME.to_string(),
            js_main_module_name: DEFAULT_JS_MAIN_MODULE_NAME.to_string(),
            initial_lifecycle_state: LifecycleState::BeforeCreate,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn react_native_developer_support(mut self, value: bool) -> Self {
        self.react_native_developer_support = value;
        self
    }

    pub fn bundle_asset_name(mut self, value: impl Into<String>) -> Self {
        self.bundle_asset_name = value.into();
        self
    }

    pub fn js_main_module_name(mut self, value: impl Into<String>) -> Self {
        self.js_main_module_name = value.into();
        self
    }

    pub fn initial_lifecycle_state(mut self, value: LifecycleState) -> Self {
        self.initial_lifecycle_state = value;
        self
    }

    /// Parses a JSON object; absent fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bundle_asset_name.trim().is_empty() {
            return Err(ConfigError::EmptyField("bundle_asset_name"));
        }
        if self.js_main_module_name.trim().is_empty() {
            return Err(ConfigError::EmptyField("js_main_module_name"));
        }
        Ok(())
    }
}

impl Display for ContainerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config{{isReactNativeDeveloperSupport={}}}",
            self.react_native_developer_support
        )
    }
}

/// Config loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    EmptyField(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid container config: {err}"),
            Self::EmptyField(name) => write!(f, "container config field must not be empty: {name}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::EmptyField(_) => None,
        }
    }
}
