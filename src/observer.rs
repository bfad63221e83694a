//! Diagnostic observers for resolution events.
//!
//! Observers are registered on a container during setup and are called
//! synchronously for every resolution by type or token, including the
//! transitive resolutions of constructor arguments. When none are
//! registered the hooks cost a single branch.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;

/// Hooks for resolution events.
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use wiring::{ContainerExt, DiError, Key, ResolutionObserver, WireContainer};
///
/// #[derive(Default)]
/// struct Counter {
///     resolved: AtomicUsize,
///     failed: AtomicUsize,
/// }
///
/// impl ResolutionObserver for Counter {
///     fn resolving(&self, _key: &Key) {}
///
///     fn resolved(&self, _key: &Key, _duration: Duration) {
///         self.resolved.fetch_add(1, Ordering::SeqCst);
///     }
///
///     fn failed(&self, _key: &Key, _error: &DiError) {
///         self.failed.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let counter = Arc::new(Counter::default());
/// let mut container = WireContainer::new();
/// container.add_observer(counter.clone());
///
/// container.singleton(|| 1u8).unwrap();
/// container.get::<u8>().unwrap();
/// assert!(container.get::<u16>().is_err());
///
/// assert_eq!(counter.resolved.load(Ordering::SeqCst), 1);
/// assert_eq!(counter.failed.load(Ordering::SeqCst), 1);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called before the recipe is looked up.
    fn resolving(&self, key: &Key);

    /// Called after an instance was produced.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when the lookup or the construction failed.
    fn failed(&self, key: &Key, error: &DiError);
}

#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }
}

/// Built-in observer that emits `tracing` events.
///
/// Lookups are logged at `TRACE`, completions at `DEBUG` and failures at
/// `WARN`, all under the `wiring` target.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{LoggingObserver, WireContainer};
///
/// let mut container = WireContainer::new();
/// container.add_observer(Arc::new(LoggingObserver::with_label("request")));
/// ```
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    label: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::with_label("wiring")
    }

    /// Tags every event with `label`, to tell containers apart.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        tracing::trace!(target: "wiring", container = %self.label, key = key.display_name(), "resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::debug!(
            target: "wiring",
            container = %self.label,
            key = key.display_name(),
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(target: "wiring", container = %self.label, key = key.display_name(), %error, "resolution failed");
    }
}
