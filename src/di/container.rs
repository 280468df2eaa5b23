use crate::error::{Result, SolistraError};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Type alias for a type-erased singleton instance.
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

type FactoryFn = Arc<dyn Fn() -> AnyInstance + Send + Sync>;

/// Capability to resolve a typed singleton instance.
///
/// The trait is object-safe through the type-erased [`Injector::resolve_any`];
/// the typed front [`InjectorExt::resolve`] performs the downcast.
pub trait Injector: Send + Sync {
    fn resolve_any(&self, type_id: TypeId, type_name: &'static str) -> Result<AnyInstance>;
}

/// Typed resolution for any [`Injector`].
pub trait InjectorExt {
    fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>>;
}

impl<I: Injector + ?Sized> InjectorExt for I {
    fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        self.resolve_any(TypeId::of::<T>(), type_name)?
            .downcast::<T>()
            .map_err(|_| SolistraError::DowncastFailed {
                type_name: type_name.to_string(),
            })
    }
}

#[derive(Clone)]
enum ServiceEntry {
    Instance(AnyInstance),
    Factory(FactoryFn),
}

/// Thread-safe dependency injection container.
///
/// Services are registered either as ready instances or as factories that are
/// run once on first resolution. Two threads racing on the same first
/// resolution may each run the factory; last write wins and both results are
/// behaviorally equivalent for a correctly written singleton factory.
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
        }
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.services
            .insert(TypeId::of::<T>(), ServiceEntry::Instance(Arc::new(instance)));
        self
    }

    /// Register a factory run lazily on the first resolution of `T`.
    pub fn register_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move || Arc::new(factory()) as AnyInstance);
        self.services
            .insert(TypeId::of::<T>(), ServiceEntry::Factory(factory));
        self
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector for Container {
    fn resolve_any(&self, type_id: TypeId, type_name: &'static str) -> Result<AnyInstance> {
        // The map guard is released before the factory runs so a factory can
        // resolve its own dependencies through the container.
        let pending = match self.services.get(&type_id) {
            Some(entry) => match entry.value() {
                ServiceEntry::Instance(instance) => return Ok(instance.clone()),
                ServiceEntry::Factory(factory) => factory.clone(),
            },
            None => {
                return Err(SolistraError::DependencyNotFound {
                    type_name: type_name.to_string(),
                });
            }
        };

        let instance = pending();
        self.services
            .insert(type_id, ServiceEntry::Instance(instance.clone()));
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestService {
        value: i32,
    }

    #[test]
    fn test_register_and_resolve() {
        let mut container = Container::new();
        container.register(TestService { value: 42 });
        let service = container.resolve::<TestService>().unwrap();
        assert_eq!(service.value, 42);
    }

    #[test]
    fn test_missing_dependency_is_an_error() {
        let container = Container::new();
        assert!(matches!(
            container.resolve::<TestService>(),
            Err(SolistraError::DependencyNotFound { .. })
        ));
    }

    #[test]
    fn test_factory_runs_once() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        let mut container = Container::new();
        container.register_factory(|| {
            BUILT.fetch_add(1, Ordering::SeqCst);
            TestService { value: 7 }
        });

        let first = container.resolve::<TestService>().unwrap();
        let second = container.resolve::<TestService>().unwrap();

        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_resolve_through_injector_object() {
        let mut container = Container::new();
        container.register(TestService { value: 3 });

        let injector: Arc<dyn Injector> = Arc::new(container);
        let service = injector.resolve::<TestService>().unwrap();
        assert_eq!(service.value, 3);
    }
}
