//! Identity keys for recipe storage and lookup.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Identity of a recipe.
///
/// Types and tokens are disjoint identity spaces: the same produced type
/// may be registered under its type and, separately, under any number of
/// tokens.
///
/// # Examples
///
/// ```rust
/// use wiring::{key_of_type, Key};
///
/// let by_type = key_of_type::<u32>();
/// let by_token = Key::Token("config_port".to_string());
///
/// assert_eq!(by_type.display_name(), "u32");
/// assert_eq!(by_token.display_name(), "config_port");
/// assert_ne!(by_type, by_token);
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    /// Produced type, with its name for diagnostics
    ///
    /// Only the `TypeId` takes part in equality and hashing.
    Type(TypeId, &'static str),
    /// Caller-chosen string token
    Token(String),
}

impl Key {
    /// Type name or token, for display and error messages.
    pub fn display_name(&self) -> &str {
        match self {
            Key::Type(_, name) => name,
            Key::Token(token) => token,
        }
    }

    /// The `TypeId` of a type key.
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Key::Type(id, _) => Some(*id),
            Key::Token(_) => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Token(_) => "token",
        }
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Token(a), Key::Token(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Token(token) => {
                1u8.hash(state);
                token.hash(state);
            }
        }
    }
}

#[inline(always)]
pub fn key_of_type<T: 'static + ?Sized>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}
