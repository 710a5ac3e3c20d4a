//! Exclusive shared access to one cursor
//!
//! Reads depend on the cursor position, so every call takes the one mutex.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::cursor::Cursor;

/// Cloneable handle to a cursor shared between threads
#[derive(Clone, Debug, Default)]
pub struct SharedCursor {
    inner: Arc<Mutex<Cursor>>,
}

impl SharedCursor {
    pub fn new(cursor: Cursor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cursor)),
        }
    }

    /// Run `f` with exclusive access to the cursor
    pub fn with<R>(&self, f: impl FnOnce(&mut Cursor) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Hold exclusive access across several calls
    pub fn lock(&self) -> MutexGuard<'_, Cursor> {
        self.inner.lock()
    }

    /// Take the cursor back if this is the last handle
    pub fn try_unwrap(self) -> Result<Cursor, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Cursor> for SharedCursor {
    fn from(cursor: Cursor) -> Self {
        Self::new(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_threads_serialize_through_handle() {
        let shared = SharedCursor::new(Cursor::new());
        shared.with(|c| {
            c.add_tag("counter");
        });

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|c| {
                            let n = c.get_value("counter", 0i32, 0);
                            c.set_value("counter", n + 1);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }

        assert_eq!(shared.lock().get_value("counter", 0i32, 0), 100);
    }

    #[test]
    fn test_try_unwrap() {
        let shared = SharedCursor::from(Cursor::new());
        let other = shared.clone();
        let Err(shared) = shared.try_unwrap() else {
            panic!("two handles are alive");
        };
        drop(other);
        assert!(shared.try_unwrap().is_ok());
    }
}
