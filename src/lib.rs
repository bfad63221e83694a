//! # wiring
//!
//! Runtime dependency injection for Rust: register constructors, resolve by
//! type or by token, and let the container build the dependency graph on
//! demand.
//!
//! ## Features
//!
//! - **Constructor injection**: constructor parameters are resolved by type, recursively
//! - **Two identity spaces**: recipes keyed by produced type or by string token
//! - **Lifecycles**: singleton (constructed once, cached) and transient (constructed every time)
//! - **Record filling**: populate a struct's public fields, with per-field token and ignore tags
//! - **Layered containers**: request-scoped children that fall back to a parent
//! - **Thread-safe**: register and resolve through `&self` from any thread
//!
//! ## Quick Start
//!
//! ```rust
//! use wiring::{ContainerExt, WireContainer};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let container = WireContainer::new();
//! container
//!     .singleton(|| {
//!         Arc::new(Database {
//!             connection_string: "postgres://localhost".to_string(),
//!         })
//!     })
//!     .unwrap();
//! container.transient(|db: Arc<Database>| Arc::new(UserService { db })).unwrap();
//!
//! let users = container.get::<Arc<UserService>>().unwrap();
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//!
//! // Singletons are shared, transients are fresh
//! let db = container.get::<Arc<Database>>().unwrap();
//! assert!(Arc::ptr_eq(&db, &users.db));
//! ```
//!
//! ## Tokens
//!
//! ```rust
//! use wiring::{ContainerExt, WireContainer};
//!
//! let container = WireContainer::new();
//! container.singleton_token("primary_db", || "postgres://primary".to_string()).unwrap();
//! container.singleton_token("replica_db", || "postgres://replica".to_string()).unwrap();
//!
//! let mut url = String::new();
//! container.resolve_token("replica_db", &mut url).unwrap();
//! assert_eq!(url, "postgres://replica");
//! ```
//!
//! ## Trait Objects
//!
//! Values leave the container by `Clone`, so shared services are
//! registered as `Arc<T>` or `Arc<dyn Trait>`. A destination of type
//! `Arc<dyn Trait>` resolves the recipe that produces exactly that type.
//!
//! ```rust
//! use wiring::{ContainerExt, WireContainer};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) -> String {
//!         format!("[LOG] {}", message)
//!     }
//! }
//!
//! let container = WireContainer::new();
//! container.singleton(|| Arc::new(ConsoleLogger) as Arc<dyn Logger>).unwrap();
//!
//! let logger = container.get::<Arc<dyn Logger>>().unwrap();
//! assert_eq!(logger.log("Hello, World!"), "[LOG] Hello, World!");
//! ```

// Module declarations
pub mod constructor;
pub mod container;
pub mod error;
pub mod instance;
pub mod key;
pub mod lifecycle;
pub mod observer;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-exports
pub use constructor::{Constructor, RawConstructor, RawFunction, ReturnSlot, Signature, TryConstructor};
pub use container::{
    derived, nested, CompositeContainer, DerivedContainer, Directive, Field, Must, NestedContainer, Record,
    Slot, WireContainer,
};
pub use error::{BoxError, DiError, DiResult};
pub use instance::Instance;
pub use key::{key_of_type, Key};
pub use lifecycle::Lifecycle;
pub use observer::{LoggingObserver, ResolutionObserver};
pub use traits::{Container, ContainerExt};
