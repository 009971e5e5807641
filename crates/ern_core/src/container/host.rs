//! Container lifecycle: one-shot initialization and lazy runtime build.
//!
//! # Responsibility
//! - Own the single `ReactContainer` of a process-scoped `ContainerHost`.
//! - Build the runtime manager at most once and share it.
//!
//! # Invariants
//! - Uninitialized -> Configured -> Built; there is no way back.
//! - The first successful `initialize` wins; later calls ignore their inputs.
//! - Concurrent first callers of `runtime_manager` observe one build.
//! - A failed initialization leaves the host uninitialized and is not retried
//!   automatically.

use crate::container::config::ContainerConfig;
use crate::container::plugin::{PluginError, PluginRegistry};
use crate::container::runtime::{
    ActivityHandle, HostApplication, RuntimeError, RuntimeFactory, RuntimeManager,
    RuntimeManagerBuilder,
};
use log::{debug, error, info};
use once_cell::sync::{Lazy, OnceCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

static GLOBAL_HOST: Lazy<ContainerHost> = Lazy::new(ContainerHost::new);

/// Slot owning at most one container for its lifetime.
#[derive(Default)]
pub struct ContainerHost {
    container: OnceCell<Arc<ReactContainer>>,
}

impl ContainerHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide host for callers that cannot thread a host reference.
    pub fn global() -> &'static ContainerHost {
        &GLOBAL_HOST
    }

    /// Initializes the container once and returns it.
    ///
    /// When a container already exists this returns it unchanged and drops
    /// the given arguments. Otherwise it requests the overlay permission when
    /// needed, applies plugin hooks, builds the runtime manager and starts
    /// background context creation before returning.
    ///
    /// # Errors
    /// - Returns `ContainerError::Plugin` when a hook fails.
    /// - Returns `ContainerError::Runtime` when the runtime build fails.
    pub fn initialize(
        &self,
        app: Arc<dyn HostApplication>,
        config: ContainerConfig,
        plugins: PluginRegistry,
        factory: Arc<dyn RuntimeFactory>,
    ) -> Result<Arc<ReactContainer>, ContainerError> {
        if let Some(existing) = self.container.get() {
            debug!("event=container_init module=container status=skipped reason=already_initialized");
            return Ok(Arc::clone(existing));
        }

        self.container
            .get_or_try_init(|| -> Result<Arc<ReactContainer>, ContainerError> {
                let started_at = Instant::now();
                let container = ReactContainer::new(app, config, plugins, factory)
                    .map_err(|err| log_init_failure(started_at, err))?;
                container
                    .runtime_manager()
                    .map_err(|err| log_init_failure(started_at, err))?
                    .create_context_in_background();

                info!(
                    "event=container_init module=container status=ok duration_ms={} plugins={} config={}",
                    started_at.elapsed().as_millis(),
                    container.plugin_names.len(),
                    container.config
                );
                Ok(Arc::new(container))
            })
            .map(Arc::clone)
    }

    /// Returns the container, or `None` before a successful `initialize`.
    pub fn get_instance(&self) -> Option<Arc<ReactContainer>> {
        self.container.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.container.get().is_some()
    }

    /// Foreground activity of the initialized container's runtime, if any.
    pub fn current_activity(&self) -> Option<ActivityHandle> {
        self.container.get()?.current_activity()
    }
}

fn log_init_failure(started_at: Instant, err: ContainerError) -> ContainerError {
    error!(
        "event=container_init module=container status=error duration_ms={} error={}",
        started_at.elapsed().as_millis(),
        err
    );
    err
}

/// Configured container around one runtime manager.
pub struct ReactContainer {
    config: ContainerConfig,
    app_name: String,
    plugin_names: Vec<String>,
    builder: RuntimeManagerBuilder,
    runtime_manager: OnceCell<Arc<dyn RuntimeManager>>,
}

impl ReactContainer {
    fn new(
        app: Arc<dyn HostApplication>,
        config: ContainerConfig,
        plugins: PluginRegistry,
        factory: Arc<dyn RuntimeFactory>,
    ) -> Result<Self, ContainerError> {
        if config.react_native_developer_support
            && app.requires_overlay_permission()
            && !app.can_draw_overlays()
        {
            info!(
                "event=overlay_permission module=container status=requested app={}",
                app.name()
            );
            app.request_overlay_permission();
        }

        let mut builder = RuntimeManagerBuilder::new(app.name(), factory);
        builder
            .bundle_asset_name(config.bundle_asset_name.as_str())
            .js_main_module_name(config.js_main_module_name.as_str())
            .use_developer_support(config.react_native_developer_support)
            .initial_lifecycle_state(config.initial_lifecycle_state);

        plugins.apply_all(&*app, &mut builder)?;

        Ok(Self {
            app_name: app.name().to_string(),
            plugin_names: plugins.names(),
            config,
            builder,
            runtime_manager: OnceCell::new(),
        })
    }

    /// Returns the runtime manager, building it on first call.
    pub fn runtime_manager(&self) -> Result<Arc<dyn RuntimeManager>, ContainerError> {
        self.runtime_manager
            .get_or_try_init(|| -> Result<Arc<dyn RuntimeManager>, ContainerError> {
                let started_at = Instant::now();
                let manager = self.builder.build()?;
                info!(
                    "event=runtime_build module=container status=ok duration_ms={} packages={}",
                    started_at.elapsed().as_millis(),
                    self.builder.settings().packages.len()
                );
                Ok(manager)
            })
            .map(Arc::clone)
    }

    /// Foreground activity when the runtime has an active context.
    pub fn current_activity(&self) -> Option<ActivityHandle> {
        self.runtime_manager
            .get()?
            .current_context()?
            .current_activity()
    }

    pub fn is_react_native_developer_support(&self) -> bool {
        self.config.react_native_developer_support
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Hooked plugin names in hook order.
    pub fn plugin_names(&self) -> &[String] {
        &self.plugin_names
    }

    /// Packages the runtime was (or will be) built with.
    pub fn packages(&self) -> &[String] {
        &self.builder.settings().packages
    }
}

/// Fatal container initialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    Plugin(PluginError),
    Runtime(RuntimeError),
}

impl Display for ContainerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plugin(err) => write!(f, "container plugin wiring failed: {err}"),
            Self::Runtime(err) => write!(f, "container runtime unavailable: {err}"),
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Plugin(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

impl From<PluginError> for ContainerError {
    fn from(value: PluginError) -> Self {
        Self::Plugin(value)
    }
}

impl From<RuntimeError> for ContainerError {
    fn from(value: RuntimeError) -> Self {
        Self::Runtime(value)
    }
}
