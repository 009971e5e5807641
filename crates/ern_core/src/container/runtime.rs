//! Runtime collaborator contracts.
//!
//! The host application and the JS runtime are external; this module only
//! fixes the seams the container talks through.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Default package every runtime starts with.
pub const MAIN_REACT_PACKAGE: &str = "MainReactPackage";

/// Lifecycle state the runtime assumes before the first host activity
/// attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    BeforeCreate,
    BeforeResume,
    Resumed,
}

/// Opaque handle to a foreground host activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityHandle {
    name: String,
}

impl ActivityHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Host application the container is embedded in.
pub trait HostApplication: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the platform gates drawing over other apps behind a
    /// user-granted permission.
    fn requires_overlay_permission(&self) -> bool;

    fn can_draw_overlays(&self) -> bool;

    /// Asks the user for the overlay permission. Must not block.
    fn request_overlay_permission(&self);
}

/// Live runtime context; exists once background creation completes.
pub trait RuntimeContext: Send + Sync {
    fn current_activity(&self) -> Option<ActivityHandle>;
}

/// Object that loads and executes the embedded JS bundle.
pub trait RuntimeManager: Send + Sync {
    /// Starts context creation without waiting for it.
    fn create_context_in_background(&self);

    fn current_context(&self) -> Option<Arc<dyn RuntimeContext>>;
}

/// Creates runtime managers from frozen builder settings.
pub trait RuntimeFactory: Send + Sync {
    fn create(&self, settings: &RuntimeSettings) -> Result<Arc<dyn RuntimeManager>, RuntimeError>;
}

/// Settings accumulated by the container and its plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub application_name: String,
    pub bundle_asset_name: String,
    pub js_main_module_name: String,
    pub packages: Vec<String>,
    pub use_developer_support: bool,
    pub initial_lifecycle_state: LifecycleState,
}

/// Runtime-manager builder shared with plugin hooks during construction.
pub struct RuntimeManagerBuilder {
    settings: RuntimeSettings,
    factory: Arc<dyn RuntimeFactory>,
}

impl RuntimeManagerBuilder {
    pub fn new(application_name: impl Into<String>, factory: Arc<dyn RuntimeFactory>) -> Self {
        Self {
            settings: RuntimeSettings {
                application_name: application_name.into(),
                bundle_asset_name: String::new(),
                js_main_module_name: String::new(),
                packages: vec![MAIN_REACT_PACKAGE.to_string()],
                use_developer_support: false,
                initial_lifecycle_state: LifecycleState::BeforeCreate,
            },
            factory,
        }
    }

    pub fn bundle_asset_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.settings.bundle_asset_name = value.into();
        self
    }

    pub fn js_main_module_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.settings.js_main_module_name = value.into();
        self
    }

    /// Appends a native package; duplicates are ignored.
    pub fn add_package(&mut self, package: impl Into<String>) -> &mut Self {
        let package = package.into();
        if !self.settings.packages.contains(&package) {
            self.settings.packages.push(package);
        }
        self
    }

    pub fn use_developer_support(&mut self, value: bool) -> &mut Self {
        self.settings.use_developer_support = value;
        self
    }

    pub fn initial_lifecycle_state(&mut self, value: LifecycleState) -> &mut Self {
        self.settings.initial_lifecycle_state = value;
        self
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    pub fn build(&self) -> Result<Arc<dyn RuntimeManager>, RuntimeError> {
        self.factory.create(&self.settings)
    }
}

/// Runtime construction failure reported by a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    BuildFailed(String),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuildFailed(message) => write!(f, "runtime manager build failed: {message}"),
        }
    }
}

impl Error for RuntimeError {}
