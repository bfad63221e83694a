//! The container contract.

use std::any::Any;
use std::sync::Arc;

use crate::constructor::{Constructor, RawConstructor, TryConstructor};
use crate::container::{Record, Slot};
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::{key_of_type, Key};
use crate::lifecycle::Lifecycle;

/// Object-safe container operations.
///
/// This is the contract shared by [`WireContainer`](crate::WireContainer)
/// and the composite containers, so a composite can sit on top of any
/// other container (including another composite) as `&dyn Container`.
///
/// Most code should go through [`ContainerExt`], which adds the typed
/// registration and resolution methods on top of this trait.
pub trait Container: Send + Sync {
    /// Registers a recipe under the type its constructor produces.
    ///
    /// Validation runs before anything is stored; on failure the registry
    /// is unchanged. A later registration for the same type replaces the
    /// earlier one.
    fn register_type(&self, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()>;

    /// Registers a recipe under `token`, regardless of the produced type.
    fn register_token(&self, token: &str, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()>;

    /// Resolves the destination's type and writes the instance into it.
    fn resolve_into(&self, dest: &mut Slot<'_>) -> DiResult<()>;

    /// Resolves `token` and writes the instance into the destination.
    fn resolve_token_into(&self, token: &str, dest: &mut Slot<'_>) -> DiResult<()>;

    /// Populates every eligible field of a record destination.
    ///
    /// Stops at the first failing field; fields already written keep
    /// their new values.
    fn fill_into(&self, target: &mut Slot<'_>) -> DiResult<()>;

    fn has_type(&self, key: &Key) -> bool;

    fn has_token(&self, token: &str) -> bool;

    /// Produces an instance for a type identity.
    ///
    /// Used for transitive constructor arguments.
    fn resolve_instance(&self, key: &Key) -> DiResult<Instance>;

    /// Produces an instance for a token.
    fn resolve_token_instance(&self, token: &str) -> DiResult<Instance>;
}

/// Typed convenience methods for every [`Container`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{ContainerExt, WireContainer};
///
/// struct Config {
///     greeting: String,
/// }
///
/// struct Greeter {
///     config: Arc<Config>,
/// }
///
/// let container = WireContainer::new();
/// container.singleton(|| Arc::new(Config { greeting: "hello".into() })).unwrap();
/// container.transient(|config: Arc<Config>| Arc::new(Greeter { config })).unwrap();
///
/// let greeter = container.get::<Arc<Greeter>>().unwrap();
/// assert_eq!(greeter.config.greeting, "hello");
/// assert!(container.has::<Arc<Config>>());
/// ```
pub trait ContainerExt: Container {
    fn singleton<Args, F: Constructor<Args>>(&self, ctor: F) -> DiResult<()> {
        self.register_type(Lifecycle::Singleton, ctor.into_raw())
    }

    fn transient<Args, F: Constructor<Args>>(&self, ctor: F) -> DiResult<()> {
        self.register_type(Lifecycle::Transient, ctor.into_raw())
    }

    /// Registers a fallible constructor with the singleton lifecycle.
    ///
    /// A failed construction is not cached; the next request runs the
    /// constructor again.
    fn try_singleton<Args, F: TryConstructor<Args>>(&self, ctor: F) -> DiResult<()> {
        self.register_type(Lifecycle::Singleton, ctor.into_raw())
    }

    fn try_transient<Args, F: TryConstructor<Args>>(&self, ctor: F) -> DiResult<()> {
        self.register_type(Lifecycle::Transient, ctor.into_raw())
    }

    fn singleton_token<Args, F: Constructor<Args>>(&self, token: &str, ctor: F) -> DiResult<()> {
        self.register_token(token, Lifecycle::Singleton, ctor.into_raw())
    }

    fn transient_token<Args, F: Constructor<Args>>(&self, token: &str, ctor: F) -> DiResult<()> {
        self.register_token(token, Lifecycle::Transient, ctor.into_raw())
    }

    fn try_singleton_token<Args, F: TryConstructor<Args>>(&self, token: &str, ctor: F) -> DiResult<()> {
        self.register_token(token, Lifecycle::Singleton, ctor.into_raw())
    }

    fn try_transient_token<Args, F: TryConstructor<Args>>(&self, token: &str, ctor: F) -> DiResult<()> {
        self.register_token(token, Lifecycle::Transient, ctor.into_raw())
    }

    /// Resolves `T` by type and overwrites `dest` with the instance.
    fn resolve<T: Any>(&self, dest: &mut T) -> DiResult<()> {
        self.resolve_into(&mut Slot::of(dest))
    }

    /// Resolves `token` and overwrites `dest` with the instance.
    ///
    /// Fails with [`DiError::WrongResolverType`] when the token's recipe
    /// produces something other than `T`.
    fn resolve_token<T: Any>(&self, token: &str, dest: &mut T) -> DiResult<()> {
        self.resolve_token_into(token, &mut Slot::of(dest))
    }

    fn fill<R: Record>(&self, record: &mut R) -> DiResult<()> {
        self.fill_into(&mut Slot::record(record))
    }

    /// Resolves `T` by type and returns it.
    fn get<T: Clone + 'static>(&self) -> DiResult<T> {
        let instance = self.resolve_instance(&key_of_type::<T>())?;
        take::<T>(&instance)
    }

    fn get_token<T: Clone + 'static>(&self, token: &str) -> DiResult<T> {
        let instance = self.resolve_token_instance(token)?;
        take::<T>(&instance)
    }

    /// True if a recipe is registered for `T`.
    fn has<T: ?Sized + 'static>(&self) -> bool {
        self.has_type(&key_of_type::<T>())
    }
}

impl<C: Container + ?Sized> ContainerExt for C {}

fn take<T: Clone + 'static>(instance: &Instance) -> DiResult<T> {
    instance.downcast::<T>().ok_or(DiError::WrongResolverType {
        expected: std::any::type_name::<T>(),
        found: instance.type_name(),
    })
}

macro_rules! forward_container {
    ($($ty:ty),*) => {$(
        impl<C: Container + ?Sized> Container for $ty {
            fn register_type(&self, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
                (**self).register_type(lifecycle, ctor)
            }

            fn register_token(&self, token: &str, lifecycle: Lifecycle, ctor: RawConstructor) -> DiResult<()> {
                (**self).register_token(token, lifecycle, ctor)
            }

            fn resolve_into(&self, dest: &mut Slot<'_>) -> DiResult<()> {
                (**self).resolve_into(dest)
            }

            fn resolve_token_into(&self, token: &str, dest: &mut Slot<'_>) -> DiResult<()> {
                (**self).resolve_token_into(token, dest)
            }

            fn fill_into(&self, target: &mut Slot<'_>) -> DiResult<()> {
                (**self).fill_into(target)
            }

            fn has_type(&self, key: &Key) -> bool {
                (**self).has_type(key)
            }

            fn has_token(&self, token: &str) -> bool {
                (**self).has_token(token)
            }

            fn resolve_instance(&self, key: &Key) -> DiResult<Instance> {
                (**self).resolve_instance(key)
            }

            fn resolve_token_instance(&self, token: &str) -> DiResult<Instance> {
                (**self).resolve_token_instance(token)
            }
        }
    )*};
}

forward_container!(&C, Arc<C>);
