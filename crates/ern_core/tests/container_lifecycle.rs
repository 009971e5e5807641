use ern_core::container::headless::{HeadlessHostApplication, HeadlessRuntimeFactory};
use ern_core::{
    ActivityHandle, ContainerConfig, ContainerError, ContainerHost, HostApplication,
    PluginConfig, PluginDescriptor, PluginError, PluginHook, PluginRegistry, RuntimeError,
    RuntimeManagerBuilder,
};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

struct CodePushPlugin {
    descriptor: PluginDescriptor,
}

impl CodePushPlugin {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            descriptor: PluginDescriptor::new("CodePushPlugin", true),
        })
    }
}

impl PluginHook for CodePushPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn hook(
        &self,
        _app: &dyn HostApplication,
        builder: &mut RuntimeManagerBuilder,
        config: Option<&PluginConfig>,
    ) -> Result<(), PluginError> {
        let key = config
            .and_then(|config| config.get("deployment_key"))
            .ok_or_else(|| PluginError::HookFailed {
                plugin: self.descriptor.name.clone(),
                message: "deployment_key missing".to_string(),
            })?;
        builder.add_package(format!("CodePush:{key}"));
        Ok(())
    }
}

fn app() -> Arc<HeadlessHostApplication> {
    Arc::new(HeadlessHostApplication::new("weather"))
}

#[test]
fn get_instance_is_none_until_initialized() {
    let host = ContainerHost::new();
    assert!(host.get_instance().is_none());

    let container = host
        .initialize(
            app(),
            ContainerConfig::new(),
            PluginRegistry::new(),
            Arc::new(HeadlessRuntimeFactory::new()),
        )
        .expect("initialize");

    let instance = host.get_instance().expect("instance after initialize");
    assert!(Arc::ptr_eq(&container, &instance));
}

#[test]
fn second_initialize_returns_first_container() {
    let host = ContainerHost::new();
    let first_factory = Arc::new(HeadlessRuntimeFactory::new());
    let second_factory = Arc::new(HeadlessRuntimeFactory::new());

    let first = host
        .initialize(
            app(),
            ContainerConfig::new().react_native_developer_support(false),
            PluginRegistry::new(),
            first_factory.clone(),
        )
        .expect("first initialize");
    let second = host
        .initialize(
            Arc::new(HeadlessHostApplication::new("other")),
            ContainerConfig::new().react_native_developer_support(true),
            PluginRegistry::new(),
            second_factory.clone(),
        )
        .expect("second initialize");

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!second.is_react_native_developer_support());
    assert_eq!(second.app_name(), "weather");
    assert_eq!(first_factory.builds(), 1);
    assert_eq!(second_factory.builds(), 0);
    assert!(Arc::ptr_eq(&host.get_instance().unwrap(), &first));
}

#[test]
fn concurrent_first_initialize_calls_build_runtime_once() {
    const CALLERS: usize = 8;
    let host = Arc::new(ContainerHost::new());
    let factory =
        Arc::new(HeadlessRuntimeFactory::new().with_build_delay(Duration::from_millis(20)));

    // The runtime slot is only reachable through initialize, which builds
    // eagerly, so the race runs on initialize itself.
    let barrier = Arc::new(Barrier::new(CALLERS));
    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let host = Arc::clone(&host);
            let factory = Arc::clone(&factory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let container = host
                    .initialize(app(), ContainerConfig::new(), PluginRegistry::new(), factory)
                    .expect("initialize");
                container.runtime_manager().expect("runtime manager")
            })
        })
        .collect();

    let managers: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("caller thread"))
        .collect();

    assert_eq!(factory.builds(), 1);
    for manager in &managers[1..] {
        assert!(Arc::ptr_eq(&managers[0], manager));
    }
}

#[test]
fn runtime_manager_is_cached_after_first_build() {
    let host = ContainerHost::new();
    let factory = Arc::new(HeadlessRuntimeFactory::new());
    let container = host
        .initialize(
            app(),
            ContainerConfig::new(),
            PluginRegistry::new(),
            factory.clone(),
        )
        .unwrap();

    let first = container.runtime_manager().unwrap();
    let second = container.runtime_manager().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.builds(), 1);
}

#[test]
fn developer_support_requests_overlay_permission_when_gated() {
    let host = ContainerHost::new();
    let gated = Arc::new(HeadlessHostApplication::with_overlay_gate("weather"));

    let container = host
        .initialize(
            gated.clone(),
            ContainerConfig::new().react_native_developer_support(true),
            PluginRegistry::new(),
            Arc::new(HeadlessRuntimeFactory::new()),
        )
        .unwrap();

    assert!(container.is_react_native_developer_support());
    assert_eq!(gated.permission_requests(), 1);
}

#[test]
fn overlay_permission_is_not_requested_without_developer_support_or_when_granted() {
    let without_dev = Arc::new(HeadlessHostApplication::with_overlay_gate("weather"));
    ContainerHost::new()
        .initialize(
            without_dev.clone(),
            ContainerConfig::new(),
            PluginRegistry::new(),
            Arc::new(HeadlessRuntimeFactory::new()),
        )
        .unwrap();
    assert_eq!(without_dev.permission_requests(), 0);

    let granted = Arc::new(HeadlessHostApplication::with_overlay_gate("weather"));
    granted.grant_overlay();
    ContainerHost::new()
        .initialize(
            granted.clone(),
            ContainerConfig::new().react_native_developer_support(true),
            PluginRegistry::new(),
            Arc::new(HeadlessRuntimeFactory::new()),
        )
        .unwrap();
    assert_eq!(granted.permission_requests(), 0);
}

#[test]
fn plugins_and_config_flow_into_runtime_settings() {
    let host = ContainerHost::new();
    let factory = Arc::new(HeadlessRuntimeFactory::new());
    let mut plugins = PluginRegistry::new();
    plugins
        .register(
            CodePushPlugin::new(),
            Some(PluginConfig::new().with("deployment_key", "abc")),
        )
        .unwrap();

    let container = host
        .initialize(
            app(),
            ContainerConfig::new()
                .react_native_developer_support(true)
                .bundle_asset_name("weather.bundle"),
            plugins,
            factory.clone(),
        )
        .unwrap();

    assert_eq!(container.plugin_names().to_vec(), vec!["CodePushPlugin".to_string()]);
    let manager = factory.last_manager().expect("manager built");
    let settings = manager.settings();
    assert_eq!(settings.application_name, "weather");
    assert_eq!(settings.bundle_asset_name, "weather.bundle");
    assert_eq!(settings.js_main_module_name, "index.android");
    assert!(settings.use_developer_support);
    assert_eq!(
        settings.packages,
        vec!["MainReactPackage".to_string(), "CodePush:abc".to_string()]
    );
}

#[test]
fn failing_plugin_hook_leaves_host_uninitialized() {
    let host = ContainerHost::new();
    let factory = Arc::new(HeadlessRuntimeFactory::new());
    let mut plugins = PluginRegistry::new();
    plugins
        .register(CodePushPlugin::new(), Some(PluginConfig::new()))
        .unwrap();

    let err = host
        .initialize(app(), ContainerConfig::new(), plugins, factory.clone())
        .err()
        .expect("hook failure must surface");

    assert!(matches!(
        err,
        ContainerError::Plugin(PluginError::HookFailed { .. })
    ));
    assert!(host.get_instance().is_none());
    assert_eq!(factory.builds(), 0);
}

#[test]
fn runtime_build_failure_is_fatal_and_not_retried() {
    let host = ContainerHost::new();
    let factory = Arc::new(HeadlessRuntimeFactory::failing("engine missing"));

    let err = host
        .initialize(
            app(),
            ContainerConfig::new(),
            PluginRegistry::new(),
            factory.clone(),
        )
        .err()
        .expect("build failure must surface");

    assert_eq!(
        err,
        ContainerError::Runtime(RuntimeError::BuildFailed("engine missing".to_string()))
    );
    assert!(host.get_instance().is_none());
    assert_eq!(factory.builds(), 1);
}

#[test]
fn current_activity_follows_runtime_context() {
    let host = ContainerHost::new();
    let factory = Arc::new(HeadlessRuntimeFactory::new());
    let container = host
        .initialize(
            app(),
            ContainerConfig::new(),
            PluginRegistry::new(),
            factory.clone(),
        )
        .unwrap();

    let manager = factory.last_manager().expect("manager built");
    let context = manager.wait_until_ready().expect("context created");
    assert_eq!(container.current_activity(), None);

    context.attach_activity(ActivityHandle::new("MainActivity"));
    assert_eq!(
        host.current_activity(),
        Some(ActivityHandle::new("MainActivity"))
    );

    context.detach_activity();
    assert_eq!(container.current_activity(), None);
}
