//! Low-level file storage.

mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
