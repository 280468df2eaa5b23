//! Shutdown-hook registry
//!
//! Holds the ordered callbacks an application runs when it stops and drains
//! them into an aggregate outcome.

use super::error::RuntimeError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// A callback invoked when an application stops.
///
/// Hooks are registered by collaborators while the application is being
/// assembled; the registry owns them afterwards.
#[async_trait]
pub trait ShutdownHook: Send + Sync {
    async fn on_stop(&self) -> anyhow::Result<()>;
}

struct FnHook<F>(F);

#[async_trait]
impl<F, Fut> ShutdownHook for FnHook<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn on_stop(&self) -> anyhow::Result<()> {
        (self.0)().await
    }
}

struct RegisteredHook {
    hook: Box<dyn ShutdownHook>,
    name: String,
}

/// Ordered shutdown-hook registry owned by one application.
///
/// Hooks drain exactly once, in reverse registration order so dependents stop
/// before the services they rely on. The drain resolves only after every
/// hook's own future has resolved or failed; failures are collected into the
/// report, never propagated.
#[derive(Default)]
pub struct ShutdownHooks {
    hooks: Mutex<Vec<RegisteredHook>>,
}

impl ShutdownHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&self, hook: H, name: impl Into<String>)
    where
        H: ShutdownHook + 'static,
    {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RegisteredHook {
                hook: Box::new(hook),
                name: name.into(),
            });
    }

    /// Register a closure-shaped hook.
    pub fn register_fn<F, Fut>(&self, name: impl Into<String>, hook: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.register(FnHook(hook), name);
    }

    pub fn len(&self) -> usize {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every registered hook, newest first.
    ///
    /// A second drain sees an empty registry and reports zero hooks run.
    pub async fn drain(&self) -> ShutdownReport {
        let hooks = std::mem::take(
            &mut *self.hooks.lock().unwrap_or_else(PoisonError::into_inner),
        );

        let mut report = ShutdownReport::default();
        for registered in hooks.iter().rev() {
            debug!("Stopping: {}", registered.name);
            if let Err(error) = registered.hook.on_stop().await {
                report
                    .failures
                    .push(RuntimeError::hook_failed(&registered.name, error.to_string()));
            }
            report.ran += 1;
        }
        report
    }
}

/// Aggregate outcome of draining an application's shutdown hooks.
#[derive(Debug, Default)]
pub struct ShutdownReport {
    ran: usize,
    failures: Vec<RuntimeError>,
}

impl ShutdownReport {
    /// Number of hooks that ran, failing or not.
    pub fn ran(&self) -> usize {
        self.ran
    }

    pub fn failures(&self) -> &[RuntimeError] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hooks_drain_in_reverse_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let hooks = ShutdownHooks::new();

        for id in 0..3 {
            let order = Arc::clone(&order);
            hooks.register_fn(format!("hook-{id}"), move || {
                let order = Arc::clone(&order);
                async move {
                    order.lock().unwrap().push(id);
                    Ok(())
                }
            });
        }

        let report = hooks.drain().await;

        assert_eq!(report.ran(), 3);
        assert!(report.is_clean());
        assert_eq!(*order.lock().unwrap(), vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn test_failures_are_collected_not_propagated() {
        let hooks = ShutdownHooks::new();
        hooks.register_fn("closes-cleanly", || async { Ok(()) });
        hooks.register_fn("refuses-to-close", || async {
            Err(anyhow::anyhow!("connection pool still draining"))
        });

        let report = hooks.drain().await;

        assert_eq!(report.ran(), 2);
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(
            &report.failures()[0],
            RuntimeError::HookFailed { hook, .. } if hook == "refuses-to-close"
        ));
    }

    #[tokio::test]
    async fn test_second_drain_is_empty() {
        let hooks = ShutdownHooks::new();
        hooks.register_fn("once", || async { Ok(()) });

        assert_eq!(hooks.drain().await.ran(), 1);
        assert_eq!(hooks.drain().await.ran(), 0);
    }
}
