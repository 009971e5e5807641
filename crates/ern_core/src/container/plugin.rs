//! Plugin descriptors, hooks and the start-up registry.
//!
//! # Responsibility
//! - Validate plugin declarations before the container exists.
//! - Pair each plugin hook with its configuration when it is configurable.
//! - Run hooks against the shared runtime builder in registration order.
//!
//! # Invariants
//! - Plugin names are unique within one registry and carry no surrounding
//!   whitespace.
//! - A configurable plugin always carries a config; others never do.
//! - The core runtime entry (`react-native`) is not a hookable plugin.

use crate::container::runtime::{HostApplication, RuntimeManagerBuilder};
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Dependency name of the runtime itself; never hooked as a plugin.
pub const REACT_NATIVE_PLUGIN_NAME: &str = "react-native";

/// Declaration of one plugin hook class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Hook name, e.g. `ReactNativeCodePushPlugin`.
    pub name: String,
    /// Whether the hook takes a config at initialization.
    pub configurable: bool,
}

impl PluginDescriptor {
    pub fn new(name: impl Into<String>, configurable: bool) -> Self {
        Self {
            name: name.into(),
            configurable,
        }
    }

    /// Config parameter name used by the host, e.g. `reactNativeCodePushPluginConfig`.
    pub fn config_param_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("{}{}Config", first.to_ascii_lowercase(), chars.as_str()),
            None => "config".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), PluginError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PluginError::EmptyName);
        }
        if name == REACT_NATIVE_PLUGIN_NAME {
            return Err(PluginError::ReservedName(name.to_string()));
        }
        if !is_valid_plugin_name(&self.name) {
            return Err(PluginError::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

/// Named settings for one configurable plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    values: BTreeMap<String, String>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Hook contract implemented by each integrated native module.
pub trait PluginHook: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;

    /// Wires the plugin into the runtime builder.
    ///
    /// `config` is `Some` exactly when the descriptor is configurable.
    fn hook(
        &self,
        app: &dyn HostApplication,
        builder: &mut RuntimeManagerBuilder,
        config: Option<&PluginConfig>,
    ) -> Result<(), PluginError>;
}

struct RegisteredPlugin {
    hook: Arc<dyn PluginHook>,
    config: Option<PluginConfig>,
}

/// Plugin list resolved before the container is constructed.
#[derive(Default)]
pub struct PluginRegistry {
    entries: Vec<RegisteredPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one hook with its optional config.
    pub fn register(
        &mut self,
        hook: Arc<dyn PluginHook>,
        config: Option<PluginConfig>,
    ) -> Result<(), PluginError> {
        let descriptor = hook.descriptor().clone();
        descriptor.validate()?;

        if self.get(&descriptor.name).is_some() {
            return Err(PluginError::DuplicateName(descriptor.name));
        }
        match (descriptor.configurable, config.is_some()) {
            (true, false) => return Err(PluginError::MissingConfig(descriptor.name)),
            (false, true) => return Err(PluginError::UnexpectedConfig(descriptor.name)),
            _ => {}
        }

        self.entries.push(RegisteredPlugin { hook, config });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plugin names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.hook.descriptor().name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PluginHook>> {
        self.entries
            .iter()
            .find(|entry| entry.hook.descriptor().name == name.trim())
            .map(|entry| entry.hook.clone())
    }

    pub fn config(&self, name: &str) -> Option<&PluginConfig> {
        self.entries
            .iter()
            .find(|entry| entry.hook.descriptor().name == name.trim())
            .and_then(|entry| entry.config.as_ref())
    }

    /// Runs every hook in registration order; stops at the first failure.
    pub fn apply_all(
        &self,
        app: &dyn HostApplication,
        builder: &mut RuntimeManagerBuilder,
    ) -> Result<(), PluginError> {
        for entry in &self.entries {
            let descriptor = entry.hook.descriptor();
            let name = descriptor.name.as_str();
            match entry.hook.hook(app, builder, entry.config.as_ref()) {
                Ok(()) if entry.config.is_some() => info!(
                    "event=plugin_hook module=container status=ok plugin={} config_param={}",
                    name,
                    descriptor.config_param_name()
                ),
                Ok(()) => info!(
                    "event=plugin_hook module=container status=ok plugin={} config_param=none",
                    name
                ),
                Err(err) => {
                    error!(
                        "event=plugin_hook module=container status=error plugin={} error={}",
                        name, err
                    );
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

fn is_valid_plugin_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Plugin declaration and hook errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    EmptyName,
    InvalidName(String),
    ReservedName(String),
    DuplicateName(String),
    MissingConfig(String),
    UnexpectedConfig(String),
    HookFailed { plugin: String, message: String },
}

impl Display for PluginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "plugin name must not be empty"),
            Self::InvalidName(value) => write!(f, "plugin name is invalid: {value}"),
            Self::ReservedName(value) => write!(f, "plugin name is reserved: {value}"),
            Self::DuplicateName(value) => write!(f, "plugin already registered: {value}"),
            Self::MissingConfig(value) => {
                write!(f, "configurable plugin registered without config: {value}")
            }
            Self::UnexpectedConfig(value) => {
                write!(f, "plugin is not configurable but got a config: {value}")
            }
            Self::HookFailed { plugin, message } => {
                write!(f, "plugin hook failed for {plugin}: {message}")
            }
        }
    }
}

impl Error for PluginError {}
