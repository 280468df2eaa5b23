//! Application Lifecycle & Runtime Context
//!
//! Reproduces just enough of a full framework's application-lifecycle contract
//! for a data-access layer to run outside it: one current application, ordered
//! start/stop, resource resolution, and containment of shutdown failures.
//!
//! # Lifecycle
//!
//! ```text
//! 1. Caller assembles a StandaloneApp
//!    (environment, config, injector, worker pool, shutdown hooks)
//!    ↓
//! 2. RuntimeContext::start
//!    ├─ previous application fully stopped (hooks drained, cache evicted)
//!    └─ new application installed as current
//!    ↓
//! [Running: accessors, resources, cached instances]
//!    ↓
//! 3. RuntimeContext::stop
//!    ├─ resource scope swapped to the stopping application
//!    ├─ shutdown hooks drained, newest first
//!    ├─ failures logged and swallowed
//!    └─ slot cleared, cache entries evicted
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use solistra::prelude::*;
//!
//! let app = StandaloneApp::builder()
//!     .environment(Environment::simple("/srv/app", Mode::Prod))
//!     .config(Config::from_env())
//!     .on_stop_fn("pool", || async { anyhow::Ok(()) })
//!     .build();
//!
//! let context = RuntimeContext::new();
//! context.start(Arc::new(app)).await;
//! ```

mod application;
mod context;
mod environment;
mod error;
mod resources;
mod shutdown;

pub use application::{Application, StandaloneApp, StandaloneAppBuilder};
pub use context::RuntimeContext;
pub use environment::{Environment, Mode};
pub use error::{Result, RuntimeError};
pub use resources::{ResourceScope, ScopeGuard, ScopeSlot};
pub use shutdown::{ShutdownHook, ShutdownHooks, ShutdownReport};
