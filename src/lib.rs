//! # Solistra
//!
//! A minimal standalone runtime context with built-in dependency injection for
//! Rust.
//!
//! Solistra reproduces just enough of a full framework's application-lifecycle
//! contract — a single current application, ordered start/stop, resource and
//! file resolution, and a cache for dependency-resolved singletons — for a
//! database-access layer to run outside that framework, in tests or small
//! tools.
//!
//! ## Features
//!
//! - **Runtime Context**: one globally-visible current application with
//!   atomic start/stop ordering
//! - **Application Contract**: a small trait your own runtime instances can
//!   implement, with derived file/resource helpers
//! - **Shutdown Hooks**: ordered async callbacks drained on stop, with
//!   failures contained and reported
//! - **Instance Cache**: memoized typed-singleton resolution per application,
//!   evicted when the application stops
//! - **Dependency Injection**: a thread-safe container with instance and lazy
//!   factory registration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solistra::prelude::*;
//! use solistra::anyhow;
//!
//! // The typed singletons your data-access layer needs.
//! struct ConnectionPool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let container = ContainerBuilder::new()
//!         .register(ConnectionPool)
//!         .build();
//!
//!     let config = Config::new();
//!     config.set("db.default.driver", "org.h2.Driver");
//!     config.set("db.default.url", "jdbc:h2:mem:standalone");
//!
//!     let app = StandaloneApp::builder()
//!         .environment(Environment::simple(".", Mode::Dev))
//!         .config(config)
//!         .injector(Arc::new(container))
//!         .on_stop_fn("pool", || async { anyhow::Ok(()) })
//!         .build();
//!
//!     let context = RuntimeContext::new();
//!     context.start(Arc::new(app)).await;
//!
//!     // Consumers read the current application through the context.
//!     let current = context.current().await.unwrap();
//!     let _pool: Arc<ConnectionPool> = context.cache().resolve(&*current).unwrap();
//!
//!     context.stop(Some(current)).await;
//! }
//! ```

pub mod config;
pub mod di;
pub mod error;
pub mod runtime;
pub mod worker;

// Re-export core types
pub use config::Config;
pub use di::{Container, ContainerBuilder, Injector, InjectorExt, InstanceCache};
pub use error::{Result, SolistraError};
pub use runtime::{
    Application, Environment, Mode, RuntimeContext, RuntimeError, StandaloneApp,
    StandaloneAppBuilder,
};
pub use worker::WorkerPool;

// Re-export commonly used types from dependencies
pub use anyhow;
pub use async_trait::async_trait;

/// Prelude module for convenient imports
///
/// ```
/// use solistra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::di::{Container, ContainerBuilder, Injector, InjectorExt, InstanceCache};
    pub use crate::error::{Result, SolistraError};
    pub use crate::runtime::{
        Application, Environment, Mode, ResourceScope, RuntimeContext, RuntimeError, ScopeGuard,
        ScopeSlot, ShutdownHook, ShutdownHooks, ShutdownReport, StandaloneApp,
        StandaloneAppBuilder,
    };
    pub use crate::worker::WorkerPool;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
