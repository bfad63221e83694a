//! Type-erased produced values.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Writes a clone of the stored value into a destination of the same type.
type Assign = fn(&(dyn Any + Send + Sync), &mut dyn Any) -> bool;

/// A value produced by a recipe.
///
/// Cloning an `Instance` is cheap and shares the underlying value; a
/// singleton hands out clones of one `Instance` for its whole lifetime.
/// Values leave the container by `Clone`, so recipes that should share
/// state produce an `Arc<_>` (or an `Arc<dyn Trait>`).
///
/// # Examples
///
/// ```rust
/// use wiring::Instance;
///
/// let instance = Instance::new(8080u16);
/// assert_eq!(instance.downcast::<u16>(), Some(8080));
/// assert_eq!(instance.downcast::<u32>(), None);
/// assert_eq!(instance.type_name(), "u16");
/// ```
#[derive(Clone)]
pub struct Instance {
    value: AnyArc,
    type_name: &'static str,
    assign: Assign,
}

impl Instance {
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            assign: assign_clone::<T>,
        }
    }

    /// Name of the produced type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the produced value.
    pub fn produced_type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    /// Clones the value out if it is a `T`.
    pub fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }

    /// Borrows the value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// True if both instances share one stored value.
    pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }

    /// Writes a clone of the value into `dest`.
    ///
    /// Returns `false`, leaving `dest` untouched, when `dest` is not of the
    /// produced type.
    pub(crate) fn assign_to(&self, dest: &mut dyn Any) -> bool {
        (self.assign)(&*self.value, dest)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn assign_clone<T: Clone + 'static>(value: &(dyn Any + Send + Sync), dest: &mut dyn Any) -> bool {
    match (value.downcast_ref::<T>(), dest.downcast_mut::<T>()) {
        (Some(value), Some(dest)) => {
            *dest = value.clone();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_matching_type() {
        let instance = Instance::new("hello".to_string());
        let mut dest = String::new();
        assert!(instance.assign_to(&mut dest));
        assert_eq!(dest, "hello");
    }

    #[test]
    fn test_assign_mismatched_type_leaves_dest() {
        let instance = Instance::new(7u8);
        let mut dest = 42u32;
        assert!(!instance.assign_to(&mut dest));
        assert_eq!(dest, 42);
    }

    #[test]
    fn test_clones_share_value() {
        let a = Instance::new(Arc::new(5i32));
        let b = a.clone();
        assert!(Instance::ptr_eq(&a, &b));
        assert!(!Instance::ptr_eq(&a, &Instance::new(Arc::new(5i32))));
        assert_eq!(a.produced_type_id(), TypeId::of::<Arc<i32>>());
    }
}
