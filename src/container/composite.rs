//! Containers layered over a parent.

use std::fmt;
use std::sync::Arc;

use super::{Slot, WireContainer};
use crate::constructor::RawConstructor;
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::Key;
use crate::lifecycle::Lifecycle;
use crate::observer::ResolutionObserver;
use crate::traits::Container;

/// A child container that falls back to a parent.
///
/// Registrations always land in the child, so a composite can shadow or
/// extend the parent for a short-lived context such as one request,
/// without touching the parent. Reads try the child first and fall back
/// to the parent on any failure. Constructor arguments of child recipes
/// are resolved through the composite, so they see child recipes first
/// and parent recipes second; parent recipes only ever see the parent.
/// This differs from resolving against the child alone, where a child
/// recipe with a parent-only argument would fail with `ResolverNotSet`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{derived, ContainerExt, WireContainer};
///
/// struct Pool;
///
/// #[derive(Clone)]
/// struct RequestId(u64);
///
/// let app = WireContainer::new();
/// app.singleton(|| Arc::new(Pool)).unwrap();
///
/// let request = derived(&app);
/// request.singleton(|| RequestId(42)).unwrap();
/// request
///     .transient(|_pool: Arc<Pool>, id: RequestId| format!("request {}", id.0))
///     .unwrap();
///
/// assert_eq!(request.get::<String>().unwrap(), "request 42");
/// assert!(request.get::<Arc<Pool>>().is_ok());
/// assert!(!app.has::<RequestId>());
/// ```
pub struct CompositeContainer<'p> {
    parent: &'p dyn Container,
    child: WireContainer,
}

/// A container inheriting recipes from a parent.
pub type DerivedContainer<'p> = CompositeContainer<'p>;

/// Same behavior as [`DerivedContainer`].
pub type NestedContainer<'p> = CompositeContainer<'p>;

/// Creates a composite with an empty child over `parent`.
pub fn derived(parent: &dyn Container) -> DerivedContainer<'_> {
    CompositeContainer::new(parent)
}

/// Creates a composite with an empty child over `parent`.
pub fn nested(parent: &dyn Container) -> NestedContainer<'_> {
    CompositeContainer::new(parent)
}

impl<'p> CompositeContainer<'p> {
    pub fn new(parent: &'p dyn Container) -> Self {
        Self::with_child(parent, WireContainer::new())
    }

    /// Layers an existing container over `parent`.
    pub fn with_child(parent: &'p dyn Container, child: WireContainer) -> Self {
        Self { parent, child }
    }

    pub fn parent(&self) -> &'p dyn Container {
        self.parent
    }

    pub fn child(&self) -> &WireContainer {
        &self.child
    }

    /// Adds an observer to the child container.
    pub fn add_observer(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.child.add_observer(observer);
    }

    /// Releases the parent borrow, keeping the child's recipes.
    pub fn into_child(self) -> WireContainer {
        self.child
    }
}

fn fall_back<T>(child: DiResult<T>, parent: impl FnOnce() -> DiResult<T>) -> DiResult<T> {
    child.or_else(|err: DiError| {
        tracing::trace!(error = %err, "child container failed, trying parent");
        parent()
    })
}

impl Container for CompositeContainer<'_> {
    fn register_type(&self, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
        self.child.register_type(lifecycle, ctor)
    }

    fn register_token(&self, token: &str, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
        self.child.register_token(token, lifecycle, ctor)
    }

    fn resolve_into(&self, dest: &mut Slot<'_>) -> DiResult<()> {
        fall_back(self.child.resolve_in(dest, self), || self.parent.resolve_into(dest))
    }

    fn resolve_token_into(&self, token: &str, dest: &mut Slot<'_>) -> DiResult<()> {
        fall_back(self.child.resolve_token_in(token, dest, self), || {
            self.parent.resolve_token_into(token, dest)
        })
    }

    fn fill_into(&self, target: &mut Slot<'_>) -> DiResult<()> {
        fall_back(self.child.fill_in(target, self), || self.parent.fill_into(target))
    }

    fn has_type(&self, key: &Key) -> bool {
        self.child.has_type(key) || self.parent.has_type(key)
    }

    fn has_token(&self, token: &str) -> bool {
        self.child.has_token(token) || self.parent.has_token(token)
    }

    fn resolve_instance(&self, key: &Key) -> DiResult<Instance> {
        fall_back(self.child.resolve_type_in(key, self), || self.parent.resolve_instance(key))
    }

    fn resolve_token_instance(&self, token: &str) -> DiResult<Instance> {
        fall_back(self.child.resolve_token_instance_in(token, self), || {
            self.parent.resolve_token_instance(token)
        })
    }
}

impl fmt::Debug for CompositeContainer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeContainer")
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}
