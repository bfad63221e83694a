//! The concrete container and its destination types.

mod composite;
mod fill;
mod must;
mod slot;

pub use composite::{derived, nested, CompositeContainer, DerivedContainer, NestedContainer};
pub use fill::{Directive, Field, Record};
pub use must::Must;
pub use slot::Slot;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::constructor::RawConstructor;
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::Key;
use crate::lifecycle::Lifecycle;
use crate::observer::{Observers, ResolutionObserver};
use crate::registration::{Recipe, Registry};
use crate::traits::Container;

/// Runtime dependency injection container.
///
/// Recipes are registered by the type their constructor produces or by a
/// string token, and are resolved on demand: constructor parameters are
/// resolved by type, recursively, at the moment an instance is needed.
/// Registration and resolution both work through `&self` and may happen
/// from any thread.
///
/// There is no global container; create one with [`WireContainer::new`]
/// and pass it where it is needed.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{ContainerExt, WireContainer};
///
/// trait Greeter: Send + Sync {
///     fn greet(&self, name: &str) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self, name: &str) -> String {
///         format!("Hello, {name}!")
///     }
/// }
///
/// let container = WireContainer::new();
/// container.singleton(|| Arc::new(English) as Arc<dyn Greeter>).unwrap();
///
/// let mut greeter: Arc<dyn Greeter> = Arc::new(English);
/// container.resolve(&mut greeter).unwrap();
/// assert_eq!(greeter.greet("Ferris"), "Hello, Ferris!");
/// ```
pub struct WireContainer {
    registry: Registry,
    observers: Observers,
}

impl WireContainer {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::default(),
        }
    }

    /// Adds an observer for every resolution made through this container.
    pub fn add_observer(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.add(observer);
    }

    fn observed<T>(&self, key: impl FnOnce() -> Key, run: impl FnOnce() -> DiResult<T>) -> DiResult<T> {
        if !self.observers.has_observers() {
            return run();
        }

        let key = key();
        self.observers.resolving(&key);
        let start = Instant::now();
        let result = run();
        match &result {
            Ok(_) => self.observers.resolved(&key, start.elapsed()),
            Err(err) => self.observers.failed(&key, err),
        }
        result
    }

    /// Resolves a type identity, running recipes with `ctx` as the
    /// argument source.
    pub(crate) fn resolve_type_in(&self, key: &Key, ctx: &dyn Container) -> DiResult<Instance> {
        self.observed(
            || key.clone(),
            || {
                let recipe = self
                    .registry
                    .lookup_type(key)
                    .ok_or(DiError::ResolverNotSet(key.type_name()))?;
                recipe.resolve(ctx)
            },
        )
    }

    pub(crate) fn resolve_token_instance_in(&self, token: &str, ctx: &dyn Container) -> DiResult<Instance> {
        self.observed(
            || Key::Token(token.to_owned()),
            || {
                let recipe = self
                    .registry
                    .lookup_token(token)
                    .ok_or_else(|| DiError::TokenNotSet(token.to_owned()))?;
                recipe.resolve(ctx)
            },
        )
    }

    pub(crate) fn resolve_in(&self, dest: &mut Slot<'_>, ctx: &dyn Container) -> DiResult<()> {
        dest.ensure_writable()?;
        let instance = self.resolve_type_in(&dest.key(), ctx)?;
        dest.write(&instance)
    }

    pub(crate) fn resolve_token_in(&self, token: &str, dest: &mut Slot<'_>, ctx: &dyn Container) -> DiResult<()> {
        dest.ensure_writable()?;
        let instance = self.resolve_token_instance_in(token, ctx)?;
        dest.write(&instance)
    }

    pub(crate) fn fill_in(&self, target: &mut Slot<'_>, ctx: &dyn Container) -> DiResult<()> {
        let record = target.record_mut()?;
        fill::fill_fields(record, |token, slot| match token {
            Some(token) => self.resolve_token_in(token, slot, ctx),
            None => self.resolve_in(slot, ctx),
        })
    }
}

impl Default for WireContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WireContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireContainer")
            .field("types", &self.registry.type_count())
            .field("tokens", &self.registry.token_count())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Container for WireContainer {
    fn register_type(&self, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
        let recipe = Recipe::new(lifecycle, ctor)?;
        let key = recipe.produces().clone();
        if self.registry.register_type(key.clone(), recipe).is_some() {
            tracing::debug!(key = key.display_name(), ?lifecycle, "replaced recipe");
        }
        Ok(())
    }

    fn register_token(&self, token: &str, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
        let recipe = Recipe::new(lifecycle, ctor)?;
        if self.registry.register_token(token.to_owned(), recipe).is_some() {
            tracing::debug!(token, ?lifecycle, "replaced recipe");
        }
        Ok(())
    }

    fn resolve_into(&self, dest: &mut Slot<'_>) -> DiResult<()> {
        self.resolve_in(dest, self)
    }

    fn resolve_token_into(&self, token: &str, dest: &mut Slot<'_>) -> DiResult<()> {
        self.resolve_token_in(token, dest, self)
    }

    fn fill_into(&self, target: &mut Slot<'_>) -> DiResult<()> {
        self.fill_in(target, self)
    }

    fn has_type(&self, key: &Key) -> bool {
        self.registry.has_type(key)
    }

    fn has_token(&self, token: &str) -> bool {
        self.registry.has_token(token)
    }

    fn resolve_instance(&self, key: &Key) -> DiResult<Instance> {
        self.resolve_type_in(key, self)
    }

    fn resolve_token_instance(&self, token: &str) -> DiResult<Instance> {
        self.resolve_token_instance_in(token, self)
    }
}
