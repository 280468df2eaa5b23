//! Application contract and the standalone implementation
//!
//! The [`Application`] trait is the minimal capability set the runtime context
//! manages; [`StandaloneApp`] composes those capabilities from parts supplied
//! by the embedding caller.

use super::environment::{Environment, Mode};
use super::resources::ResourceScope;
use super::shutdown::{ShutdownHook, ShutdownHooks, ShutdownReport};
use crate::config::Config;
use crate::di::{Container, Injector};
use crate::worker::WorkerPool;
use async_trait::async_trait;
use std::fs::File;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Capabilities any runtime instance exposes to the context manager.
///
/// Implementations supply the primitives; the file and resource helpers are
/// derived from them and may be overridden. None of the lookups raise on a
/// missing target — absence is represented, not thrown.
#[async_trait]
pub trait Application: Send + Sync {
    /// Stable identity assigned at construction, used to key cached instances.
    fn id(&self) -> Uuid;

    fn root_path(&self) -> &Path;

    /// The resource-resolution scope for this instance.
    fn scope(&self) -> &ResourceScope;

    fn mode(&self) -> Mode;

    fn config(&self) -> &Config;

    /// Capability to resolve typed singletons for this instance.
    fn injector(&self) -> Arc<dyn Injector>;

    /// Stop the application, resolving once every registered shutdown hook
    /// has resolved or failed.
    async fn stop(&self) -> ShutdownReport;

    /// Path under the application root. Existence is not checked.
    fn file(&self, relative: &str) -> PathBuf {
        self.root_path().join(relative)
    }

    /// Path under the application root, present only if the entry exists.
    fn existing_file(&self, relative: &str) -> Option<PathBuf> {
        let path = self.file(relative);
        path.exists().then_some(path)
    }

    /// Locate a named resource through the application's scope.
    fn resource(&self, name: &str) -> Option<PathBuf> {
        self.scope().resolve(name)
    }

    /// Open a named resource for reading.
    fn resource_as_stream(&self, name: &str) -> Option<File> {
        self.scope().open(name)
    }
}

/// A ready-to-use application composed from its constituent parts.
///
/// Holds no lifecycle logic of its own: `stop` delegates entirely to the
/// shutdown-hook registry, and the worker pool is carried opaquely for
/// collaborators that need CPU-bound work off the async runtime.
pub struct StandaloneApp {
    id: Uuid,
    environment: Environment,
    config: Config,
    injector: Arc<dyn Injector>,
    worker: WorkerPool,
    hooks: ShutdownHooks,
}

impl StandaloneApp {
    pub fn builder() -> StandaloneAppBuilder {
        StandaloneAppBuilder::new()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn worker(&self) -> &WorkerPool {
        &self.worker
    }

    /// Registry collaborators add their stop callbacks to.
    pub fn hooks(&self) -> &ShutdownHooks {
        &self.hooks
    }
}

#[async_trait]
impl Application for StandaloneApp {
    fn id(&self) -> Uuid {
        self.id
    }

    fn root_path(&self) -> &Path {
        self.environment.root_path()
    }

    fn scope(&self) -> &ResourceScope {
        self.environment.scope()
    }

    fn mode(&self) -> Mode {
        self.environment.mode()
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn injector(&self) -> Arc<dyn Injector> {
        Arc::clone(&self.injector)
    }

    async fn stop(&self) -> ShutdownReport {
        self.hooks.drain().await
    }
}

/// Builder for [`StandaloneApp`]
///
/// Every part has a default suitable for tests: the environment roots at the
/// working directory in `Test` mode, the injector is an empty container, and
/// the worker pool sizes itself to the host.
pub struct StandaloneAppBuilder {
    environment: Environment,
    config: Config,
    injector: Option<Arc<dyn Injector>>,
    worker: Option<WorkerPool>,
    hooks: ShutdownHooks,
}

impl Default for StandaloneAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StandaloneAppBuilder {
    pub fn new() -> Self {
        Self {
            environment: Environment::simple(".", Mode::Test),
            config: Config::new(),
            injector: None,
            worker: None,
            hooks: ShutdownHooks::new(),
        }
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn injector(mut self, injector: Arc<dyn Injector>) -> Self {
        self.injector = Some(injector);
        self
    }

    pub fn worker(mut self, worker: WorkerPool) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Register a shutdown hook.
    pub fn on_stop<H>(self, name: impl Into<String>, hook: H) -> Self
    where
        H: ShutdownHook + 'static,
    {
        self.hooks.register(hook, name);
        self
    }

    /// Register a closure-shaped shutdown hook.
    pub fn on_stop_fn<F, Fut>(self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.hooks.register_fn(name, hook);
        self
    }

    pub fn build(self) -> StandaloneApp {
        StandaloneApp {
            id: Uuid::new_v4(),
            environment: self.environment,
            config: self.config,
            injector: self
                .injector
                .unwrap_or_else(|| Arc::new(Container::new())),
            worker: self.worker.unwrap_or_default(),
            hooks: self.hooks,
        }
    }
}
