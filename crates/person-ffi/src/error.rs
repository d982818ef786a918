//! Errors raised while servicing a call from the native side.

use crate::PersonStatus;
use person_core::{NameError, NameField, PersonError};
use std::ffi::{c_char, CStr};
use thiserror::Error;

/// Error type for FFI operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FfiError {
    #[error("null pointer passed as {arg}")]
    NullPointer { arg: &'static str },

    #[error("invalid UTF-8 in {arg}")]
    InvalidUtf8 { arg: &'static str },

    #[error(transparent)]
    Person(#[from] PersonError),
}

/// Result type for FFI operations.
pub type FfiResult<T> = Result<T, FfiError>;

impl FfiError {
    /// Creates a null pointer error for the named argument.
    pub fn null_pointer(arg: &'static str) -> Self {
        Self::NullPointer { arg }
    }

    /// Returns the status code reported to the caller for this error.
    pub fn status(&self) -> PersonStatus {
        match self {
            FfiError::NullPointer { .. } => PersonStatus::NullPointer,
            FfiError::InvalidUtf8 { .. } => PersonStatus::InvalidUtf8,
            FfiError::Person(e) => match e.name_error() {
                NameError::AllocationFailure { .. } => PersonStatus::AllocationFailure,
                NameError::Empty | NameError::InteriorNul { .. } => PersonStatus::InvalidInput,
            },
        }
    }
}

/// Borrows a caller-provided C string as `&str`.
///
/// # Safety
///
/// - `ptr` must be null or point to a NUL-terminated string that stays valid
///   and unmodified for `'a`
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char, arg: &'static str) -> FfiResult<&'a str> {
    if ptr.is_null() {
        return Err(FfiError::null_pointer(arg));
    }

    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| FfiError::InvalidUtf8 { arg })
}

/// Borrows a caller-provided name.
///
/// Unlike [`borrow_str`], a null pointer is a missing name rather than a
/// misuse of the API, so it is reported like an empty one.
///
/// # Safety
///
/// Same as [`borrow_str`].
pub(crate) unsafe fn borrow_name<'a>(
    ptr: *const c_char,
    field: NameField,
    arg: &'static str,
) -> FfiResult<&'a str> {
    if ptr.is_null() {
        return Err(PersonError::invalid_name(field, NameError::Empty).into());
    }
    borrow_str(ptr, arg)
}
