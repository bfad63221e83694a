//! Recipes and the identity registry that stores them.

use std::fmt;
use std::sync::Arc;

use crate::constructor::{Invoke, RawConstructor};
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::internal::{Map, RwLock};
use crate::key::Key;
use crate::lifecycle::Lifecycle;
use crate::traits::Container;

#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;

#[cfg(feature = "once-cell")]
type SingletonCell = OnceCell<Instance>;
#[cfg(not(feature = "once-cell"))]
type SingletonCell = crate::internal::Mutex<Option<Instance>>;

/// A validated constructor with its lifecycle.
pub(crate) struct Recipe {
    lifecycle: Lifecycle,
    produces: Key,
    params: Vec<Key>,
    invoke: Invoke,
    /// Singleton cache, `None` for transient recipes
    single_runtime: Option<SingletonCell>,
}

impl Recipe {
    /// Validates the constructor shape; nothing is executed here.
    pub(crate) fn new(lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<Self> {
        let function = match ctor {
            RawConstructor::Function(function) => function,
            RawConstructor::Value(value) => {
                return Err(DiError::InvalidRecipeKind(value.type_name()));
            }
        };

        let returns = function.signature.return_slots();
        if returns.is_empty() || returns.len() > 2 {
            return Err(DiError::InvalidReturnArity(returns.len()));
        }
        let primary = &returns[0];
        if primary.is_error() {
            return Err(DiError::ErrorAsPrimaryReturn(primary.type_name()));
        }
        if let Some(second) = returns.get(1) {
            if !second.is_error() {
                return Err(DiError::SecondReturnNotError(second.type_name()));
            }
        }

        let produces = primary.key().clone();
        let single_runtime = match lifecycle {
            Lifecycle::Singleton => Some(SingletonCell::default()),
            Lifecycle::Transient => None,
        };

        Ok(Self {
            lifecycle,
            produces,
            params: function.signature.params().to_vec(),
            invoke: function.invoke,
            single_runtime,
        })
    }

    pub(crate) fn produces(&self) -> &Key {
        &self.produces
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Produces an instance, resolving arguments through `ctx`.
    pub(crate) fn resolve(&self, ctx: &dyn Container) -> DiResult<Instance> {
        match &self.single_runtime {
            Some(cell) => self.resolve_singleton(cell, ctx),
            None => self.construct(ctx),
        }
    }

    #[cfg(feature = "once-cell")]
    fn resolve_singleton(&self, cell: &SingletonCell, ctx: &dyn Container) -> DiResult<Instance> {
        // Lock-free once initialized; concurrent first calls block on the cell.
        cell.get_or_try_init(|| self.construct(ctx)).cloned()
    }

    #[cfg(not(feature = "once-cell"))]
    fn resolve_singleton(&self, cell: &SingletonCell, ctx: &dyn Container) -> DiResult<Instance> {
        let mut guard = cell.lock();
        if let Some(instance) = guard.as_ref() {
            return Ok(instance.clone());
        }
        let instance = self.construct(ctx)?;
        *guard = Some(instance.clone());
        Ok(instance)
    }

    fn construct(&self, ctx: &dyn Container) -> DiResult<Instance> {
        let mut args = Vec::with_capacity(self.params.len());
        for param in &self.params {
            args.push(ctx.resolve_instance(param)?);
        }

        match (self.invoke)(&args)? {
            Some(instance) => Ok(instance),
            None => {
                tracing::warn!(produces = self.produces.display_name(), "resolver returned no instance");
                Err(DiError::NilInstance(self.produces.type_name()))
            }
        }
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("lifecycle", &self.lifecycle())
            .field("produces", &self.produces.display_name())
            .field("params", &self.params.len())
            .finish()
    }
}

/// Identity registry: one mapping per identity space
pub(crate) struct Registry {
    types: RwLock<Map<Key, Arc<Recipe>>>,
    tokens: RwLock<Map<String, Arc<Recipe>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            types: RwLock::new(Map::default()),
            tokens: RwLock::new(Map::default()),
        }
    }

    /// Upserts; returns the replaced recipe, if any.
    pub(crate) fn register_type(&self, key: Key, recipe: Recipe) -> Option<Arc<Recipe>> {
        self.types.write().insert(key, Arc::new(recipe))
    }

    /// Upserts; returns the replaced recipe, if any.
    pub(crate) fn register_token(&self, token: String, recipe: Recipe) -> Option<Arc<Recipe>> {
        self.tokens.write().insert(token, Arc::new(recipe))
    }

    // Lookups hand out the Arc so no lock is held while constructors run.
    pub(crate) fn lookup_type(&self, key: &Key) -> Option<Arc<Recipe>> {
        self.types.read().get(key).cloned()
    }

    pub(crate) fn lookup_token(&self, token: &str) -> Option<Arc<Recipe>> {
        self.tokens.read().get(token).cloned()
    }

    pub(crate) fn has_type(&self, key: &Key) -> bool {
        self.types.read().contains_key(key)
    }

    pub(crate) fn has_token(&self, token: &str) -> bool {
        self.tokens.read().contains_key(token)
    }

    pub(crate) fn type_count(&self) -> usize {
        self.types.read().len()
    }

    pub(crate) fn token_count(&self) -> usize {
        self.tokens.read().len()
    }
}
