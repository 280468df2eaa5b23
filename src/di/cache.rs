use crate::di::InjectorExt;
use crate::error::Result;
use crate::runtime::Application;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use uuid::Uuid;

/// Memoizes typed singleton resolution per (application, type) pair.
///
/// Entries are keyed by the identity an application receives at construction
/// and dropped explicitly when the runtime context stops that application, so
/// retired applications never pin resolved values.
#[derive(Default)]
pub struct InstanceCache {
    entries: DashMap<(Uuid, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `T` for `app`, reusing a previously cached instance when one is
    /// live.
    ///
    /// Deliberately unsynchronized across lookup and insert: two threads
    /// racing on the same pair may each resolve through the injector. Last
    /// write wins and both results are behaviorally equivalent for a
    /// singleton injector, so the race costs redundant work, not correctness.
    pub fn resolve<T: 'static + Send + Sync>(&self, app: &dyn Application) -> Result<Arc<T>> {
        let key = (app.id(), TypeId::of::<T>());
        if let Some(entry) = self.entries.get(&key) {
            if let Ok(instance) = entry.value().clone().downcast::<T>() {
                return Ok(instance);
            }
        }

        let instance = app.injector().resolve::<T>()?;
        self.entries.insert(key, instance.clone());
        Ok(instance)
    }

    /// Drop every entry belonging to `app_id`.
    pub fn evict(&self, app_id: Uuid) {
        self.entries.retain(|(id, _), _| *id != app_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
