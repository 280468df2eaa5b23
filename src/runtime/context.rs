//! Runtime context
//!
//! Owns the single "current application" slot and orchestrates start/stop
//! ordering, resource-scope swapping, and error containment during shutdown.

use super::application::Application;
use super::environment::Mode;
use super::error::{Result, RuntimeError};
use super::resources::{ResourceScope, ScopeSlot};
use crate::config::Config;
use crate::di::InstanceCache;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Process-lifecycle manager for at most one active application.
///
/// An explicit value: embedding callers construct one and thread it wherever
/// "the current application" is needed. The slot is swapped atomically — the
/// write guard spans the stop-old/install-new sequence, so readers never
/// observe a transiently empty slot between the two steps and concurrent
/// starts serialize instead of interleaving.
///
/// # Example
///
/// ```rust,ignore
/// let context = RuntimeContext::new();
/// context.start(Arc::new(app)).await;
///
/// let config = context.config().await?;
/// let pool: Arc<ConnectionPool> = context.cache().resolve(&*context.current().await?)?;
///
/// let current = context.current().await?;
/// context.stop(Some(current)).await;
/// ```
pub struct RuntimeContext {
    slot: RwLock<Option<Arc<dyn Application>>>,
    scope_slot: ScopeSlot,
    cache: InstanceCache,
    shutdown_timeout: Option<Duration>,
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            scope_slot: ScopeSlot::new(),
            cache: InstanceCache::new(),
            shutdown_timeout: None,
        }
    }

    /// Bound the wait on an application's stop signal.
    ///
    /// Without one the context waits indefinitely; shutdown latency is then
    /// bounded only by the slowest registered hook.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = Some(timeout);
        self
    }

    /// Install `app` as the current application, fully stopping any previous
    /// one first. Never fails on its own account: failures while stopping the
    /// previous application are contained inside the stop procedure.
    ///
    /// The slot guard is held for the whole transition, so shutdown hooks must
    /// not read back through [`RuntimeContext::current`].
    pub async fn start(&self, app: Arc<dyn Application>) {
        let mut slot = self.slot.write().await;
        if let Some(previous) = slot.take() {
            self.shutdown(&previous).await;
        }

        let mode = app.mode();
        *slot = Some(app);

        if mode != Mode::Test {
            info!("Application started ({})", mode);
        }
    }

    /// Stop `app` and clear the current slot, whatever the outcome of its
    /// hooks. `None` is a no-op. Holds the slot guard for the duration, like
    /// [`RuntimeContext::start`].
    pub async fn stop(&self, app: Option<Arc<dyn Application>>) {
        let Some(app) = app else { return };

        let mut slot = self.slot.write().await;
        self.shutdown(&app).await;
        *slot = None;
    }

    /// The full stop procedure: scope swap, bounded wait, warn-and-swallow,
    /// cache eviction. Never propagates.
    async fn shutdown(&self, app: &Arc<dyn Application>) {
        // Resource lookups during hook teardown resolve against the stopping
        // application's scope; the guard restores the prior scope on every
        // exit path.
        let _scope = self.scope_slot.enter(app.scope().clone());

        let report = match self.shutdown_timeout {
            Some(limit) => match tokio::time::timeout(limit, app.stop()).await {
                Ok(report) => Some(report),
                Err(_) => {
                    warn!(
                        "Error while stopping the application: {}",
                        RuntimeError::ShutdownTimeout { waited: limit }
                    );
                    None
                }
            },
            None => Some(app.stop().await),
        };

        if let Some(report) = report {
            for failure in report.failures() {
                warn!("Error while stopping the application: {}", failure);
            }
        }

        self.cache.evict(app.id());
    }

    /// The current application, or the fixed no-started-application error.
    pub async fn current(&self) -> Result<Arc<dyn Application>> {
        self.slot
            .read()
            .await
            .clone()
            .ok_or(RuntimeError::NoStartedApplication)
    }

    /// Memoized typed-instance resolution for started applications.
    pub fn cache(&self) -> &InstanceCache {
        &self.cache
    }

    /// Scope swapped in while a stop is in flight, if any.
    pub fn active_scope(&self) -> Option<ResourceScope> {
        self.scope_slot.current()
    }

    // Derived accessors below carry no logic of their own; they delegate to
    // the current application's contract.

    pub async fn file(&self, relative: &str) -> Result<PathBuf> {
        Ok(self.current().await?.file(relative))
    }

    pub async fn existing_file(&self, relative: &str) -> Result<Option<PathBuf>> {
        Ok(self.current().await?.existing_file(relative))
    }

    pub async fn resource(&self, name: &str) -> Result<Option<PathBuf>> {
        Ok(self.current().await?.resource(name))
    }

    pub async fn resource_as_stream(&self, name: &str) -> Result<Option<File>> {
        Ok(self.current().await?.resource_as_stream(name))
    }

    pub async fn config(&self) -> Result<Config> {
        Ok(self.current().await?.config().clone())
    }

    pub async fn mode(&self) -> Result<Mode> {
        Ok(self.current().await?.mode())
    }

    pub async fn scope(&self) -> Result<ResourceScope> {
        Ok(self.current().await?.scope().clone())
    }
}
