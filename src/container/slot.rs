//! Type-erased destinations for resolved instances.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use super::fill::Record;
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::key::Key;

enum Target<'a> {
    Writable(&'a mut (dyn Any + 'static)),
    ReadOnly(PhantomData<&'a ()>),
    Value,
    Record(&'a mut (dyn Record + 'static)),
}

/// Where a resolved instance is written.
///
/// A slot carries the destination's type identity, which is also the
/// identity looked up when resolving by type. Only slots built from a
/// mutable reference can receive a value.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, ContainerExt, DiError, Slot, WireContainer};
///
/// let container = WireContainer::new();
/// container.singleton(|| 8080u16).unwrap();
///
/// let mut port = 0u16;
/// container.resolve_into(&mut Slot::of(&mut port)).unwrap();
/// assert_eq!(port, 8080);
///
/// let err = container.resolve_into(&mut Slot::read_only(&port)).unwrap_err();
/// assert!(matches!(err, DiError::NotSettable("u16")));
///
/// let err = container.resolve_into(&mut Slot::value(port)).unwrap_err();
/// assert!(matches!(err, DiError::NotAPointer("u16")));
/// ```
pub struct Slot<'a> {
    type_id: TypeId,
    type_name: &'static str,
    target: Target<'a>,
}

impl<'a> Slot<'a> {
    /// A writable destination.
    pub fn of<T: Any>(dest: &'a mut T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            target: Target::Writable(dest),
        }
    }

    /// A destination that can be inspected but not written.
    pub fn read_only<T: Any>(_dest: &'a T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            target: Target::ReadOnly(PhantomData),
        }
    }

    /// A fillable record, also writable as a whole.
    pub fn record<R: Record>(record: &'a mut R) -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            type_name: std::any::type_name::<R>(),
            target: Target::Record(record),
        }
    }
}

impl Slot<'static> {
    /// A destination passed by value, which can never receive anything.
    pub fn value<T: Any>(value: T) -> Self {
        drop(value);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            target: Target::Value,
        }
    }
}

impl Slot<'_> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type identity of the destination.
    pub fn key(&self) -> Key {
        Key::Type(self.type_id, self.type_name)
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.target, Target::Writable(_) | Target::Record(_))
    }

    /// Checked before any lookup so a bad destination never triggers
    /// construction.
    pub(crate) fn ensure_writable(&self) -> DiResult<()> {
        match self.target {
            Target::Writable(_) | Target::Record(_) => Ok(()),
            Target::ReadOnly(_) => Err(DiError::NotSettable(self.type_name)),
            Target::Value => Err(DiError::NotAPointer(self.type_name)),
        }
    }

    pub(crate) fn record_mut(&mut self) -> DiResult<&mut (dyn Record + 'static)> {
        match &mut self.target {
            Target::Record(record) => Ok(&mut **record),
            _ => Err(DiError::NotAStructPointer(self.type_name)),
        }
    }

    /// Writes a clone of `instance`, leaving the destination untouched on
    /// a type mismatch.
    pub(crate) fn write(&mut self, instance: &Instance) -> DiResult<()> {
        let dest: &mut dyn Any = match &mut self.target {
            Target::Writable(dest) => &mut **dest,
            Target::Record(record) => &mut **record,
            Target::ReadOnly(_) => return Err(DiError::NotSettable(self.type_name)),
            Target::Value => return Err(DiError::NotAPointer(self.type_name)),
        };

        if instance.assign_to(dest) {
            Ok(())
        } else {
            Err(DiError::WrongResolverType {
                expected: self.type_name,
                found: instance.type_name(),
            })
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.target {
            Target::Writable(_) => "writable",
            Target::ReadOnly(_) => "read-only",
            Target::Value => "value",
            Target::Record(_) => "record",
        };
        f.debug_struct("Slot")
            .field("type_name", &self.type_name)
            .field("kind", &kind)
            .finish()
    }
}
