mod builder;
mod cache;
mod container;

pub use builder::ContainerBuilder;
pub use cache::InstanceCache;
pub use container::{AnyInstance, Container, Injector, InjectorExt};
