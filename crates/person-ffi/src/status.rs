//! Status codes returned by every exported function.

use crate::error::FfiResult;
use std::ffi::{c_char, CStr};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Outcome of a provider call.
///
/// Discriminants are part of the ABI and never change.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonStatus {
    /// The call succeeded.
    Success = 0,
    /// A handle, out-pointer or callback argument was null.
    NullPointer = 1,
    /// A name was null, empty or otherwise rejected.
    InvalidInput = 2,
    /// A string argument was not valid UTF-8.
    InvalidUtf8 = 3,
    /// Storage for a name could not be allocated.
    AllocationFailure = 4,
    /// The provider failed unexpectedly; the handle was not modified.
    Internal = 5,
}

impl PersonStatus {
    /// Returns true for [`PersonStatus::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, PersonStatus::Success)
    }

    /// Returns the static description of this status.
    pub const fn message(&self) -> &'static CStr {
        match self {
            PersonStatus::Success => c"success",
            PersonStatus::NullPointer => c"null pointer argument",
            PersonStatus::InvalidInput => c"invalid input",
            PersonStatus::InvalidUtf8 => c"string is not valid UTF-8",
            PersonStatus::AllocationFailure => c"allocation failure",
            PersonStatus::Internal => c"internal error",
        }
    }

    /// Converts a `Result` into a status, treating `Ok` as success.
    pub fn from_result(result: &FfiResult<()>) -> Self {
        match result {
            Ok(()) => PersonStatus::Success,
            Err(e) => e.status(),
        }
    }
}

impl fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message().to_string_lossy())
    }
}

/// Returns a static, NUL-terminated description of `status`.
///
/// The returned pointer is never null and must not be freed.
#[no_mangle]
pub extern "C" fn person_status_message(status: PersonStatus) -> *const c_char {
    status.message().as_ptr()
}

/// Runs the body of an exported function and turns its outcome into a status.
///
/// Errors are logged at warn level; a panic is caught so it never unwinds
/// into the caller and is reported as [`PersonStatus::Internal`].
pub(crate) fn boundary<F>(op: &'static str, body: F) -> PersonStatus
where
    F: FnOnce() -> FfiResult<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => {
            if let Err(ref e) = result {
                log::warn!("{op}: {e}");
            } else {
                log::debug!("{op}: ok");
            }
            PersonStatus::from_result(&result)
        }
        Err(_) => {
            log::error!("{op}: panicked inside the provider");
            PersonStatus::Internal
        }
    }
}
