//! In-process runtime used without a real JS engine.
//!
//! Backs the CLI smoke probe and the container tests. Context creation runs
//! on a named background thread the same way a device runtime would.

use crate::container::runtime::{
    ActivityHandle, HostApplication, RuntimeContext, RuntimeError, RuntimeFactory,
    RuntimeManager, RuntimeSettings,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

const CONTEXT_THREAD_NAME: &str = "ern-runtime-context";

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Host application stub with a switchable overlay permission.
#[derive(Debug)]
pub struct HeadlessHostApplication {
    name: String,
    requires_overlay_permission: bool,
    overlay_granted: AtomicBool,
    permission_requests: AtomicUsize,
}

impl HeadlessHostApplication {
    /// Host whose platform does not gate overlays.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_overlay_permission: false,
            overlay_granted: AtomicBool::new(true),
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// Host that gates overlays and has not granted the permission yet.
    pub fn with_overlay_gate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_overlay_permission: true,
            overlay_granted: AtomicBool::new(false),
            permission_requests: AtomicUsize::new(0),
        }
    }

    pub fn grant_overlay(&self) {
        self.overlay_granted.store(true, Ordering::SeqCst);
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

impl HostApplication for HeadlessHostApplication {
    fn name(&self) -> &str {
        &self.name
    }

    fn requires_overlay_permission(&self) -> bool {
        self.requires_overlay_permission
    }

    fn can_draw_overlays(&self) -> bool {
        self.overlay_granted.load(Ordering::SeqCst)
    }

    fn request_overlay_permission(&self) {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Context holding the activity currently attached by the host.
#[derive(Debug, Default)]
pub struct HeadlessContext {
    activity: Mutex<Option<ActivityHandle>>,
}

impl HeadlessContext {
    pub fn attach_activity(&self, activity: ActivityHandle) {
        *lock_or_recover(&self.activity) = Some(activity);
    }

    pub fn detach_activity(&self) {
        *lock_or_recover(&self.activity) = None;
    }
}

impl RuntimeContext for HeadlessContext {
    fn current_activity(&self) -> Option<ActivityHandle> {
        lock_or_recover(&self.activity).clone()
    }
}

/// Runtime manager whose context is created on a background thread.
pub struct HeadlessRuntimeManager {
    settings: RuntimeSettings,
    context: Arc<OnceCell<Arc<HeadlessContext>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    background_requests: AtomicUsize,
}

impl HeadlessRuntimeManager {
    pub fn new(settings: RuntimeSettings) -> Self {
        Self {
            settings,
            context: Arc::new(OnceCell::new()),
            worker: Mutex::new(None),
            background_requests: AtomicUsize::new(0),
        }
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// Number of `create_context_in_background` calls received.
    pub fn background_requests(&self) -> usize {
        self.background_requests.load(Ordering::SeqCst)
    }

    /// Blocks until background context creation finishes, if it was started.
    pub fn wait_until_ready(&self) -> Option<Arc<HeadlessContext>> {
        let handle = lock_or_recover(&self.worker).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("event=runtime_context module=headless status=error error_code=worker_panicked");
            }
        }
        self.context.get().cloned()
    }
}

impl RuntimeManager for HeadlessRuntimeManager {
    fn create_context_in_background(&self) {
        self.background_requests.fetch_add(1, Ordering::SeqCst);
        if self.context.get().is_some() {
            return;
        }
        let mut worker = lock_or_recover(&self.worker);
        if worker.is_some() {
            return;
        }

        let context = Arc::clone(&self.context);
        let bundle = self.settings.bundle_asset_name.clone();
        let spawned = std::thread::Builder::new()
            .name(CONTEXT_THREAD_NAME.to_string())
            .spawn(move || {
                context.get_or_init(|| Arc::new(HeadlessContext::default()));
                info!(
                    "event=runtime_context module=headless status=ok bundle={}",
                    bundle
                );
            });
        match spawned {
            Ok(handle) => *worker = Some(handle),
            Err(err) => error!(
                "event=runtime_context module=headless status=error error_code=spawn_failed error={}",
                err
            ),
        }
    }

    fn current_context(&self) -> Option<Arc<dyn RuntimeContext>> {
        self.context
            .get()
            .map(|context| Arc::clone(context) as Arc<dyn RuntimeContext>)
    }
}

/// Factory producing `HeadlessRuntimeManager`s and counting builds.
#[derive(Default)]
pub struct HeadlessRuntimeFactory {
    builds: AtomicUsize,
    build_delay: Option<Duration>,
    failure: Option<String>,
    last_manager: Mutex<Option<Arc<HeadlessRuntimeManager>>>,
}

impl HeadlessRuntimeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps inside every build; widens the window for concurrent callers.
    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = Some(delay);
        self
    }

    /// Factory whose builds always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of `create` calls, successful or not.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn last_manager(&self) -> Option<Arc<HeadlessRuntimeManager>> {
        lock_or_recover(&self.last_manager).clone()
    }
}

impl RuntimeFactory for HeadlessRuntimeFactory {
    fn create(&self, settings: &RuntimeSettings) -> Result<Arc<dyn RuntimeManager>, RuntimeError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.build_delay {
            std::thread::sleep(delay);
        }
        if let Some(message) = &self.failure {
            return Err(RuntimeError::BuildFailed(message.clone()));
        }

        let manager = Arc::new(HeadlessRuntimeManager::new(settings.clone()));
        *lock_or_recover(&self.last_manager) = Some(Arc::clone(&manager));
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessHostApplication, HeadlessRuntimeFactory, HeadlessRuntimeManager};
    use crate::container::runtime::{
        ActivityHandle, HostApplication, RuntimeManager, RuntimeManagerBuilder,
    };
    use std::sync::Arc;

    fn manager() -> HeadlessRuntimeManager {
        let builder =
            RuntimeManagerBuilder::new("headless", Arc::new(HeadlessRuntimeFactory::new()));
        HeadlessRuntimeManager::new(builder.settings().clone())
    }

    #[test]
    fn context_appears_after_background_creation() {
        let manager = manager();
        assert!(manager.current_context().is_none());

        manager.create_context_in_background();
        let context = manager.wait_until_ready().expect("context created");
        assert!(manager.current_context().is_some());

        context.attach_activity(ActivityHandle::new("MainActivity"));
        let current = manager
            .current_context()
            .and_then(|context| context.current_activity());
        assert_eq!(current, Some(ActivityHandle::new("MainActivity")));
    }

    #[test]
    fn repeated_background_requests_create_one_context() {
        let manager = manager();
        manager.create_context_in_background();
        let first = manager.wait_until_ready().expect("first context");
        manager.create_context_in_background();
        let second = manager.wait_until_ready().expect("same context");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.background_requests(), 2);
    }

    #[test]
    fn failing_factory_counts_attempts() {
        let factory = Arc::new(HeadlessRuntimeFactory::failing("no engine"));
        let builder = RuntimeManagerBuilder::new("headless", factory.clone());
        assert!(builder.build().is_err());
        assert_eq!(factory.builds(), 1);
        assert!(factory.last_manager().is_none());
    }

    #[test]
    fn overlay_gate_tracks_requests_and_grants() {
        let app = HeadlessHostApplication::with_overlay_gate("headless");
        assert!(app.requires_overlay_permission());
        assert!(!app.can_draw_overlays());

        app.request_overlay_permission();
        app.grant_overlay();
        assert_eq!(app.permission_requests(), 1);
        assert!(app.can_draw_overlays());
    }
}
