//! UserStore - generic in-process per-user state
//!
//! Keeps one value per user id behind a `get`/`mutate` interface so callers
//! never touch the backing map directly. The store makes no ordering
//! guarantee across concurrent mutations of the same user id; callers must
//! keep their mutations additive (monotonic merge) for that to be safe.
//!
//! # Example
//!
//! ```
//! use userstore::{MemoryStore, UserStore};
//!
//! let store: MemoryStore<Vec<String>> = MemoryStore::new();
//! store.mutate("u-1", &mut |tags| {
//!     if !tags.contains(&"hiking".to_string()) {
//!         tags.push("hiking".to_string());
//!     }
//! });
//! assert_eq!(store.get("u-1"), vec!["hiking".to_string()]);
//! ```

mod store;

pub use store::{MemoryStore, UserStore};
