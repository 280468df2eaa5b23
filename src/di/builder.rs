use crate::di::Container;

/// Builder for constructing a dependency injection container
///
/// Use this to configure and register services before building the final
/// immutable container.
///
/// # Example
/// ```
/// use solistra::di::ContainerBuilder;
///
/// struct Pool;
///
/// let container = ContainerBuilder::new()
///     .register(Pool)
///     .build();
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Register a service instance
    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    /// Register a factory run lazily on the first resolution of `T`.
    pub fn register_factory<T, F>(mut self, factory: F) -> Self
    where
        T: 'static + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.container.register_factory(factory);
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
