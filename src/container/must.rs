//! Panicking facade over a container.

use std::any::Any;

use super::Record;
use crate::constructor::{Constructor, TryConstructor};
use crate::error::DiResult;
use crate::traits::{Container, ContainerExt};

/// Wraps a container and panics instead of returning errors.
///
/// Meant for prototypes and for wiring that is known to be complete;
/// the panic message is the error's display text.
///
/// # Examples
///
/// ```rust
/// use wiring::{Must, WireContainer};
///
/// let container = Must::new(WireContainer::new());
/// container.singleton(|| 3u8);
/// assert_eq!(container.get::<u8>(), 3);
/// ```
///
/// ```rust,should_panic
/// use wiring::{Must, WireContainer};
///
/// let container = Must::new(WireContainer::new());
/// container.get::<u8>(); // no recipe for u8
/// ```
#[derive(Debug)]
pub struct Must<C> {
    inner: C,
}

#[track_caller]
fn must<T>(result: DiResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

impl<C: Container> Must<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    #[track_caller]
    pub fn singleton<Args, F: Constructor<Args>>(&self, ctor: F) {
        must(self.inner.singleton(ctor))
    }

    #[track_caller]
    pub fn transient<Args, F: Constructor<Args>>(&self, ctor: F) {
        must(self.inner.transient(ctor))
    }

    #[track_caller]
    pub fn try_singleton<Args, F: TryConstructor<Args>>(&self, ctor: F) {
        must(self.inner.try_singleton(ctor))
    }

    #[track_caller]
    pub fn try_transient<Args, F: TryConstructor<Args>>(&self, ctor: F) {
        must(self.inner.try_transient(ctor))
    }

    #[track_caller]
    pub fn singleton_token<Args, F: Constructor<Args>>(&self, token: &str, ctor: F) {
        must(self.inner.singleton_token(token, ctor))
    }

    #[track_caller]
    pub fn transient_token<Args, F: Constructor<Args>>(&self, token: &str, ctor: F) {
        must(self.inner.transient_token(token, ctor))
    }

    #[track_caller]
    pub fn try_singleton_token<Args, F: TryConstructor<Args>>(&self, token: &str, ctor: F) {
        must(self.inner.try_singleton_token(token, ctor))
    }

    #[track_caller]
    pub fn try_transient_token<Args, F: TryConstructor<Args>>(&self, token: &str, ctor: F) {
        must(self.inner.try_transient_token(token, ctor))
    }

    #[track_caller]
    pub fn resolve<T: Any>(&self, dest: &mut T) {
        must(self.inner.resolve(dest))
    }

    #[track_caller]
    pub fn resolve_token<T: Any>(&self, token: &str, dest: &mut T) {
        must(self.inner.resolve_token(token, dest))
    }

    #[track_caller]
    pub fn fill<R: Record>(&self, record: &mut R) {
        must(self.inner.fill(record))
    }

    #[track_caller]
    pub fn get<T: Clone + 'static>(&self) -> T {
        must(self.inner.get::<T>())
    }

    #[track_caller]
    pub fn get_token<T: Clone + 'static>(&self, token: &str) -> T {
        must(self.inner.get_token::<T>(token))
    }

    pub fn has<T: ?Sized + 'static>(&self) -> bool {
        self.inner.has::<T>()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.inner.has_token(token)
    }
}
