//! Internal implementation details.

pub(crate) mod sync;

#[cfg_attr(feature = "once-cell", allow(unused_imports))]
pub(crate) use sync::{Map, Mutex, RwLock};
