//! Recipe lifecycle definitions.

/// Lifecycle controlling whether a recipe caches what it produces
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use wiring::{ContainerExt, WireContainer};
///
/// #[derive(Clone)]
/// struct Database { url: String }
/// #[derive(Clone)]
/// struct RequestId(usize);
///
/// let container = WireContainer::new();
/// let counter = Arc::new(AtomicUsize::new(0));
/// let next = counter.clone();
///
/// // Singleton: one shared instance
/// container.singleton(|| Arc::new(Database { url: "postgres://localhost".into() })).unwrap();
/// // Transient: constructed on every resolution
/// container.transient(move || RequestId(next.fetch_add(1, Ordering::SeqCst))).unwrap();
///
/// let db1 = container.get::<Arc<Database>>().unwrap();
/// let db2 = container.get::<Arc<Database>>().unwrap();
/// assert!(Arc::ptr_eq(&db1, &db2));
///
/// let a = container.get::<RequestId>().unwrap();
/// let b = container.get::<RequestId>().unwrap();
/// assert_ne!(a.0, b.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed on first successful resolution, then cached
    ///
    /// The constructor runs at most once per recipe, even under
    /// concurrent first resolutions. Failed or empty constructions are
    /// not cached, so a later call retries.
    Singleton,
    /// Constructed fresh on every resolution, never cached
    Transient,
}
