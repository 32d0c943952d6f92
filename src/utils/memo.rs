// src/utils/memo.rs
// =============================================================================
// A per-instance cache slot for expensive accessors.
//
// A struct that wants a lazily computed, cached value keeps a Memo<T> field
// and routes its accessor through it:
//
//     pub async fn org(&self) -> Result<&Value, ClientError> {
//         self.org.get_or_try_init(|| self.fetch_org()).await
//     }
//
// The first call runs the closure and stores the result. Every later call
// returns the stored value without running anything. A closure that fails
// stores nothing, so the next call tries again.
//
// Rust concepts:
// - Interior mutability: filling the slot only needs &self
// - Generics: Memo<T> caches any type
// - Closures returning futures: the work only starts if the slot is empty
// =============================================================================

use std::fmt;
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

// One lazily filled slot. Owned by the struct whose accessor it caches, so
// two instances never share a value.
pub struct Memo<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    // `name` only shows up in log events
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    // The slot name, as shown in log events and Debug output
    pub fn name(&self) -> &'static str {
        self.name
    }

    // Returns the cached value without computing it.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_populated(&self) -> bool {
        self.cell.initialized()
    }

    // Returns the cached value, computing it with `init` on first use.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> &T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(value) = self.cell.get() {
            trace!(slot = self.name, "cache hit");
            return value;
        }

        self.cell
            .get_or_init(|| async {
                debug!(slot = self.name, "computing cached value");
                init().await
            })
            .await
    }

    // Like `get_or_init`, but `init` may fail.
    //
    // An error is handed back to the caller and the slot stays empty.
    pub async fn get_or_try_init<E, F, Fut>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.cell.get() {
            trace!(slot = self.name, "cache hit");
            return Ok(value);
        }

        self.cell
            .get_or_try_init(|| async {
                debug!(slot = self.name, "computing cached value");
                let result = init().await;
                if result.is_err() {
                    debug!(slot = self.name, "computation failed, slot left empty");
                }
                result
            })
            .await
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("name", &self.name())
            .field("value", &self.cell.get())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why OnceCell instead of Option<T>?
//    - Option<T> would need &mut self (or a Mutex) to fill in
//    - OnceCell fills in through &self and then hands out plain &T
//    - If two tasks race on an empty slot, one waits for the other
//
// 2. Why FnOnce() -> Fut instead of a future directly?
//    - A future passed in would already be built, even on a cache hit
//    - The closure is only called when the slot is empty
//
// 3. What does get_or_try_init do on Err?
//    - Returns the error as-is and leaves the slot empty
//    - A failed network call is never remembered
// -----------------------------------------------------------------------------
