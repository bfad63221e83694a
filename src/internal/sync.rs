//! Lock and map types behind the `parking-lot` and `ahash` features.

use std::collections::HashMap;

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, RwLock};

#[cfg(not(feature = "parking-lot"))]
pub(crate) use self::std_locks::{Mutex, RwLock};

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = HashMap<K, V, ahash::RandomState>;

#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = HashMap<K, V>;

/// std locks with the parking_lot calling convention.
///
/// A poisoned lock only means a constructor panicked while another thread
/// held the guard; the protected maps are never left half-written, so the
/// guard is recovered.
#[cfg(not(feature = "parking-lot"))]
mod std_locks {
    use std::sync::{self, MutexGuard, PoisonError, RwLockReadGuard, RwLockWriteGuard};

    #[derive(Default)]
    pub(crate) struct RwLock<T>(sync::RwLock<T>);

    impl<T> RwLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(sync::RwLock::new(value))
        }

        pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
            self.0.read().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
            self.0.write().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[derive(Default)]
    #[cfg_attr(feature = "once-cell", allow(dead_code))]
    pub(crate) struct Mutex<T>(sync::Mutex<T>);

    #[allow(dead_code)]
    impl<T> Mutex<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(sync::Mutex::new(value))
        }

        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rwlock_read_after_write() {
        let lock = RwLock::new(Map::<u8, &str>::default());
        lock.write().insert(1, "one");
        assert_eq!(lock.read().get(&1), Some(&"one"));
    }

    #[test]
    fn test_mutex_recovers_after_panic() {
        let mutex = std::sync::Arc::new(Mutex::new(0u32));
        let poisoner = mutex.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("constructor blew up");
        })
        .join();
        *mutex.lock() += 1;
        assert_eq!(*mutex.lock(), 1);
    }
}
