//! C ABI for the person provider.
//!
//! This crate exposes [`person_core::Person`] to native callers through an
//! opaque handle. A caller:
//!
//! - creates a handle with [`person_new`]
//! - mutates it with [`person_cap_first_name`] and [`person_update_last_name`],
//!   passing a [`PersonUpdateCb`] that is told about the new value
//! - reads it back with [`person_first_name`] and [`person_last_name`]
//! - releases it with [`person_free`]
//!
//! ```text
//! native caller                         person-ffi
//! -------------                         ----------
//! person_new("original F Name","Name") -> PERSON_STATUS_SUCCESS, handle
//! person_cap_first_name(handle, cb)    -> cb("First name", "Original F Name")
//! person_update_last_name(handle, "Brown", cb)
//!                                      -> cb("Last name", "Brown")
//! person_free(handle)
//! ```
//!
//! [`CPerson`] is a second, transparent representation whose fields the
//! caller may read and overwrite directly. It bypasses every invariant of
//! the handle API and exists only for callers that need the raw layout.
//!
//! # Safety
//!
//! All exported functions use the `extern "C"` ABI and follow these rules:
//!
//! 1. Every pointer argument is checked for null before use
//! 2. Strings are NUL-terminated and must be valid UTF-8
//! 3. Every call returns a [`PersonStatus`]; nothing panics across the boundary
//! 4. Callbacks run exactly once per successful mutation, synchronously, on
//!    the calling thread; their arguments are valid only for the call
//! 5. A callback must not call back into the handle being mutated; other
//!    handles may be used freely
//! 6. Handles are not thread-safe: one handle must not be used from two
//!    threads at the same time

mod callback;
mod error;
mod handle;
mod status;
mod transparent;

pub use callback::PersonUpdateCb;
pub use error::{FfiError, FfiResult};
pub use handle::*;
pub use status::{person_status_message, PersonStatus};
pub use transparent::*;
