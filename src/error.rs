//! Error types for the dependency resolution engine.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Boxed failure returned by a host constructor.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Dependency resolution errors
///
/// Covers the three phases a caller can fail in: registering a recipe,
/// looking one up, and writing the produced instance into a destination.
///
/// # Examples
///
/// ```rust
/// use wiring::{ContainerExt, DiError, WireContainer};
///
/// let container = WireContainer::new();
/// match container.get::<String>() {
///     Err(DiError::ResolverNotSet(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use wiring::DiError;
///
/// let missing = DiError::TokenNotSet("db_url".to_string());
/// let arity = DiError::InvalidReturnArity(3);
///
/// println!("Error: {}", missing);
/// println!("Error: {}", arity);
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// Recipe source is not a function (direct value registration)
    InvalidRecipeKind(&'static str),
    /// Constructor declares fewer than 1 or more than 2 return values
    InvalidReturnArity(usize),
    /// Constructor's primary return value is itself an error carrier
    ErrorAsPrimaryReturn(&'static str),
    /// Constructor's second return value is not an error carrier
    SecondReturnNotError(&'static str),
    /// No recipe registered for the type
    ResolverNotSet(&'static str),
    /// No recipe registered for the token
    TokenNotSet(String),
    /// Destination is not a reference
    NotAPointer(&'static str),
    /// Destination is a reference that cannot be written
    NotSettable(&'static str),
    /// Fill target is not a record
    NotAStructPointer(&'static str),
    /// Produced instance does not conform to the destination type
    WrongResolverType {
        expected: &'static str,
        found: &'static str,
    },
    /// Constructor reported success without producing an instance
    NilInstance(&'static str),
    /// Failure reported by a host constructor
    Constructor {
        produces: &'static str,
        source: Arc<dyn Error + Send + Sync>,
    },
    /// Failure while filling a record field
    Field {
        field: &'static str,
        source: Box<DiError>,
    },
}

impl DiError {
    /// Wraps a host constructor failure.
    pub fn constructor(produces: &'static str, err: impl Into<BoxError>) -> Self {
        DiError::Constructor {
            produces,
            source: Arc::from(err.into()),
        }
    }

    pub(crate) fn in_field(self, field: &'static str) -> Self {
        DiError::Field {
            field,
            source: Box::new(self),
        }
    }

    /// The error underneath any field context.
    ///
    /// ```rust
    /// use wiring::DiError;
    ///
    /// let err = DiError::Field {
    ///     field: "Logger",
    ///     source: Box::new(DiError::ResolverNotSet("app::Logger")),
    /// };
    /// assert!(matches!(err.root(), DiError::ResolverNotSet("app::Logger")));
    /// ```
    pub fn root(&self) -> &DiError {
        match self {
            DiError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for lookup misses, the only failures that registering the
    /// missing recipe can fix.
    pub fn is_not_set(&self) -> bool {
        matches!(
            self.root(),
            DiError::ResolverNotSet(_) | DiError::TokenNotSet(_)
        )
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::InvalidRecipeKind(name) => {
                write!(f, "Invalid recipe: {} is not a function", name)
            }
            DiError::InvalidReturnArity(count) => {
                write!(f, "Invalid recipe: expected 1 or 2 return values, got {}", count)
            }
            DiError::ErrorAsPrimaryReturn(name) => {
                write!(f, "Invalid recipe: error type {} cannot be the primary return value", name)
            }
            DiError::SecondReturnNotError(name) => {
                write!(f, "Invalid recipe: second return value {} is not an error", name)
            }
            DiError::ResolverNotSet(name) => write!(f, "Resolver for type '{}' not set", name),
            DiError::TokenNotSet(token) => write!(f, "Resolver for token '{}' not set", token),
            DiError::NotAPointer(name) => {
                write!(f, "Destination {} must be a mutable reference", name)
            }
            DiError::NotSettable(name) => write!(f, "Destination {} cannot be set", name),
            DiError::NotAStructPointer(name) => {
                write!(f, "Fill requires a record reference, got {}", name)
            }
            DiError::WrongResolverType { expected, found } => {
                write!(f, "Wrong resolver for type {}: produced {}", expected, found)
            }
            DiError::NilInstance(name) => write!(f, "Resolver for {} returned no instance", name),
            DiError::Constructor { produces, source } => {
                write!(f, "Resolver for {} failed: {}", produces, source)
            }
            DiError::Field { field, source } => {
                write!(f, "Error resolving field '{}': {}", field, source)
            }
        }
    }
}

impl Error for DiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiError::Constructor { source, .. } => Some(source.as_ref()),
            DiError::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for container operations
///
/// # Examples
///
/// ```rust
/// use wiring::{DiError, DiResult};
///
/// fn lookup() -> DiResult<u16> {
///     Err(DiError::TokenNotSet("port".to_string()))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
