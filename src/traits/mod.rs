//! Core traits for the dependency injection container.

mod container;

pub use container::{Container, ContainerExt};
