//! Constructor descriptions and the typed function adapters.
//!
//! Every registration lowers its constructor to a [`RawConstructor`]: the
//! declared parameter identities, the declared return slots, and an erased
//! body. Typed closures get there through [`Constructor`] (single return
//! value) and [`TryConstructor`] (value plus failure), implemented for
//! functions of up to eight parameters. Hosts that only learn a
//! constructor's shape at runtime build the `RawConstructor` directly.

use std::any::TypeId;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, DiError, DiResult};
use crate::instance::Instance;
use crate::key::{key_of_type, Key};

/// Erased constructor body: receives resolved arguments in declaration order.
pub(crate) type Invoke = Arc<dyn Fn(&[Instance]) -> DiResult<Option<Instance>> + Send + Sync>;

/// One declared return value of a constructor.
#[derive(Debug, Clone)]
pub struct ReturnSlot {
    key: Key,
    is_error: bool,
}

impl ReturnSlot {
    /// A return value of type `T`.
    ///
    /// Flagged as an error carrier when `T` is one of the standard error
    /// types (`DiError`, boxed or shared `dyn Error`, `io::Error`,
    /// `fmt::Error`).
    pub fn value<T: ?Sized + 'static>() -> Self {
        Self {
            key: key_of_type::<T>(),
            is_error: is_error_type(TypeId::of::<T>()),
        }
    }

    /// A return value declared as the failure indicator.
    pub fn error<E: ?Sized + 'static>() -> Self {
        Self {
            key: key_of_type::<E>(),
            is_error: true,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.key.type_name()
    }
}

fn is_error_type(id: TypeId) -> bool {
    [
        TypeId::of::<DiError>(),
        TypeId::of::<dyn Error>(),
        TypeId::of::<dyn Error + Send + Sync>(),
        TypeId::of::<Box<dyn Error>>(),
        TypeId::of::<Box<dyn Error + Send>>(),
        TypeId::of::<BoxError>(),
        TypeId::of::<Arc<dyn Error + Send + Sync>>(),
        TypeId::of::<std::io::Error>(),
        TypeId::of::<fmt::Error>(),
    ]
    .contains(&id)
}

/// Declared shape of a constructor.
///
/// # Examples
///
/// ```rust
/// use wiring::{ReturnSlot, Signature};
///
/// let signature = Signature::new()
///     .param::<u16>()
///     .returns(ReturnSlot::value::<String>())
///     .returns(ReturnSlot::error::<std::io::Error>());
///
/// assert_eq!(signature.params().len(), 1);
/// assert_eq!(signature.return_slots().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Key>,
    returns: Vec<ReturnSlot>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter resolved by the type `T`.
    pub fn param<T: 'static>(mut self) -> Self {
        self.params.push(key_of_type::<T>());
        self
    }

    /// Appends a declared return value.
    pub fn returns(mut self, slot: ReturnSlot) -> Self {
        self.returns.push(slot);
        self
    }

    pub fn params(&self) -> &[Key] {
        &self.params
    }

    pub fn return_slots(&self) -> &[ReturnSlot] {
        &self.returns
    }
}

/// A function constructor described at runtime.
pub struct RawFunction {
    pub(crate) signature: Signature,
    pub(crate) invoke: Invoke,
}

impl RawFunction {
    /// Builds a function from its signature and body.
    ///
    /// The body receives one [`Instance`] per declared parameter. Returning
    /// `Ok(None)` reports success without an instance, which resolution
    /// treats as a failure.
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[Instance]) -> DiResult<Option<Instance>> + Send + Sync + 'static,
    {
        Self {
            signature,
            invoke: Arc::new(body),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl fmt::Debug for RawFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Anything offered to the container as a recipe source.
///
/// Only functions make valid recipes; a ready value is rejected at
/// registration with [`DiError::InvalidRecipeKind`].
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, DiError, Instance, Lifecycle, RawConstructor, ReturnSlot, Signature,
///     WireContainer};
///
/// let container = WireContainer::new();
///
/// let ctor = RawConstructor::function(
///     Signature::new().returns(ReturnSlot::value::<u32>()),
///     |_args| Ok(Some(Instance::new(7u32))),
/// );
/// container.register_type(Lifecycle::Transient, ctor).unwrap();
///
/// let err = container
///     .register_type(Lifecycle::Singleton, RawConstructor::value(7u32))
///     .unwrap_err();
/// assert!(matches!(err, DiError::InvalidRecipeKind("u32")));
/// ```
#[derive(Debug)]
pub enum RawConstructor {
    Function(RawFunction),
    Value(Instance),
}

impl RawConstructor {
    pub fn function<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[Instance]) -> DiResult<Option<Instance>> + Send + Sync + 'static,
    {
        RawConstructor::Function(RawFunction::new(signature, body))
    }

    pub fn value<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        RawConstructor::Value(Instance::new(value))
    }
}

/// A function returning a single value, usable as a recipe.
///
/// Implemented for `Fn(A1, .., An) -> T` with up to eight parameters. Each
/// parameter is resolved from the container by its type.
pub trait Constructor<Args>: Send + Sync + 'static {
    fn into_raw(self) -> RawConstructor;
}

/// A function returning `Result<T, E>`, usable as a recipe.
///
/// `Err` is reported as [`DiError::Constructor`] with the host error as
/// its source.
pub trait TryConstructor<Args>: Send + Sync + 'static {
    fn into_raw(self) -> RawConstructor;
}

fn take_arg<A: Clone + 'static>(arg: Option<&Instance>) -> DiResult<A> {
    let expected = std::any::type_name::<A>();
    let instance = arg.ok_or(DiError::ResolverNotSet(expected))?;
    instance.downcast::<A>().ok_or(DiError::WrongResolverType {
        expected,
        found: instance.type_name(),
    })
}

macro_rules! impl_constructors {
    ($($arg:ident),*) => {
        impl<F, T, $($arg,)*> Constructor<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> T + Send + Sync + 'static,
            T: Clone + Send + Sync + 'static,
            $($arg: Clone + Send + Sync + 'static,)*
        {
            fn into_raw(self) -> RawConstructor {
                let signature = Signature::new()
                    $(.param::<$arg>())*
                    .returns(ReturnSlot::value::<T>());
                RawConstructor::function(signature, move |args: &[Instance]| {
                    #[allow(unused_mut, unused_variables)]
                    let mut args = args.iter();
                    $(
                        #[allow(non_snake_case)]
                        let $arg = take_arg::<$arg>(args.next())?;
                    )*
                    Ok(Some(Instance::new((self)($($arg),*))))
                })
            }
        }

        impl<F, T, E, $($arg,)*> TryConstructor<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> Result<T, E> + Send + Sync + 'static,
            T: Clone + Send + Sync + 'static,
            E: Into<BoxError> + 'static,
            $($arg: Clone + Send + Sync + 'static,)*
        {
            fn into_raw(self) -> RawConstructor {
                let signature = Signature::new()
                    $(.param::<$arg>())*
                    .returns(ReturnSlot::value::<T>())
                    .returns(ReturnSlot::error::<E>());
                RawConstructor::function(signature, move |args: &[Instance]| {
                    #[allow(unused_mut, unused_variables)]
                    let mut args = args.iter();
                    $(
                        #[allow(non_snake_case)]
                        let $arg = take_arg::<$arg>(args.next())?;
                    )*
                    match (self)($($arg),*) {
                        Ok(value) => Ok(Some(Instance::new(value))),
                        Err(err) => Err(DiError::constructor(std::any::type_name::<T>(), err)),
                    }
                })
            }
        }
    };
}

impl_constructors!();
impl_constructors!(A1);
impl_constructors!(A1, A2);
impl_constructors!(A1, A2, A3);
impl_constructors!(A1, A2, A3, A4);
impl_constructors!(A1, A2, A3, A4, A5);
impl_constructors!(A1, A2, A3, A4, A5, A6);
impl_constructors!(A1, A2, A3, A4, A5, A6, A7);
impl_constructors!(A1, A2, A3, A4, A5, A6, A7, A8);
