//! Verification helpers for testing the person FFI provider
//!
//! Provides a recording callback and assertion helpers for callback
//! invocations and C strings returned by accessors

use std::cell::RefCell;
use std::ffi::{c_char, CStr};
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Expected {expected} callback invocations, recorded {actual}")]
    CallCountMismatch { expected: usize, actual: usize },

    #[error("Callback name mismatch: expected '{expected}', got '{actual}'")]
    NameMismatch { expected: String, actual: String },

    #[error("Callback prefix mismatch: expected '{expected}', got '{actual}'")]
    PrefixMismatch { expected: String, actual: String },

    #[error("Expected a C string, got a null pointer")]
    NullString,

    #[error("C string is not valid UTF-8")]
    InvalidUtf8,
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// One invocation of [`recording_callback`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRecord {
    pub prefix: String,
    pub name: String,
}

thread_local! {
    static RECORDED: RefCell<Vec<CallbackRecord>> = const { RefCell::new(Vec::new()) };
}

/// Callback with the provider's C signature that records its arguments.
///
/// Invocations are stored per thread, matching the provider's guarantee that
/// callbacks run synchronously on the calling thread. Null arguments are
/// recorded as `"<null>"`.
///
/// # Safety
///
/// - `prefix` and `name` must be null or valid NUL-terminated C strings
pub unsafe extern "C" fn recording_callback(prefix: *const c_char, name: *const c_char) {
    let record = CallbackRecord {
        prefix: lossy(prefix),
        name: lossy(name),
    };
    RECORDED.with(|cell| cell.borrow_mut().push(record));
}

unsafe fn lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "<null>".to_string();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// View over the invocations recorded on the current thread
#[derive(Debug)]
pub struct CallbackRecorder {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl CallbackRecorder {
    /// Create a recorder, discarding anything recorded earlier on this thread
    pub fn new() -> Self {
        RECORDED.with(|cell| cell.borrow_mut().clear());
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// The callback to hand to the provider
    pub fn callback(&self) -> unsafe extern "C" fn(*const c_char, *const c_char) {
        recording_callback
    }

    /// All invocations recorded so far
    pub fn records(&self) -> Vec<CallbackRecord> {
        RECORDED.with(|cell| cell.borrow().clone())
    }

    /// Number of invocations recorded so far
    pub fn count(&self) -> usize {
        RECORDED.with(|cell| cell.borrow().len())
    }

    /// Forget recorded invocations
    pub fn reset(&self) {
        RECORDED.with(|cell| cell.borrow_mut().clear());
    }

    /// Verify that nothing was recorded
    pub fn assert_not_called(&self) -> VerifyResult<()> {
        self.assert_count(0)
    }

    /// Verify the number of invocations
    pub fn assert_count(&self, expected: usize) -> VerifyResult<()> {
        let actual = self.count();
        if actual != expected {
            return Err(VerificationError::CallCountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Verify exactly one invocation carrying `name`, and return it
    pub fn assert_called_once_with(&self, name: &str) -> VerifyResult<CallbackRecord> {
        self.assert_count(1)?;
        let record = self.records().remove(0);
        if record.name != name {
            return Err(VerificationError::NameMismatch {
                expected: name.to_string(),
                actual: record.name,
            });
        }
        Ok(record)
    }

    /// Verify exactly one invocation carrying both `prefix` and `name`
    pub fn assert_called_once_with_prefix(
        &self,
        prefix: &str,
        name: &str,
    ) -> VerifyResult<CallbackRecord> {
        let record = self.assert_called_once_with(name)?;
        if record.prefix != prefix {
            return Err(VerificationError::PrefixMismatch {
                expected: prefix.to_string(),
                actual: record.prefix,
            });
        }
        Ok(record)
    }
}

impl Default for CallbackRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a C string returned by the provider into an owned `String`
///
/// # Safety
///
/// - `ptr` must be null or a valid NUL-terminated C string
pub unsafe fn read_c_string(ptr: *const c_char) -> VerifyResult<String> {
    if ptr.is_null() {
        return Err(VerificationError::NullString);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|_| VerificationError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::CString;

    #[test]
    fn test_recorder_captures_arguments() {
        let recorder = CallbackRecorder::new();
        let prefix = CString::new("Last name").unwrap();
        let name = CString::new("Brown").unwrap();

        unsafe { (recorder.callback())(prefix.as_ptr(), name.as_ptr()) };

        let record = recorder
            .assert_called_once_with_prefix("Last name", "Brown")
            .unwrap();
        assert_eq!(record.name, "Brown");
    }

    #[test]
    fn test_recorder_starts_empty() {
        let recorder = CallbackRecorder::new();
        assert!(recorder.assert_not_called().is_ok());
    }

    #[test]
    fn test_count_mismatch() {
        let recorder = CallbackRecorder::new();
        assert_eq!(
            recorder.assert_called_once_with("Brown"),
            Err(VerificationError::CallCountMismatch {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_null_arguments_recorded() {
        let recorder = CallbackRecorder::new();
        unsafe { recording_callback(std::ptr::null(), std::ptr::null()) };
        assert_eq!(recorder.records()[0].name, "<null>");
    }

    #[test]
    fn test_read_c_string() {
        let text = CString::new("Ada").unwrap();
        assert_eq!(unsafe { read_c_string(text.as_ptr()) }.unwrap(), "Ada");
        assert_eq!(
            unsafe { read_c_string(std::ptr::null()) },
            Err(VerificationError::NullString)
        );
    }
}
