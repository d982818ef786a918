//! Test fixtures for common person scenarios
//!
//! Provides reusable inputs for provider and caller tests

use person_core::NameError;
use std::ffi::CString;

/// Input pair for creating a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFixture {
    /// First name passed to the factory
    pub first_name: String,
    /// Last name passed to the factory
    pub last_name: String,
}

impl PersonFixture {
    /// Create a fixture from two names
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Replace the first name
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Replace the last name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// NUL-terminated copies of both names, ready to pass across the C ABI
    ///
    /// Panics if a name contains a NUL byte; build those inputs by hand.
    pub fn c_names(&self) -> (CString, CString) {
        (
            CString::new(self.first_name.as_str()).expect("fixture first name contains NUL"),
            CString::new(self.last_name.as_str()).expect("fixture last name contains NUL"),
        )
    }
}

/// Common person fixtures
pub mod person_fixtures {
    use super::*;

    /// The person created by the reference demo sequence
    pub fn original() -> PersonFixture {
        PersonFixture::new("original F Name", "Name")
    }

    /// First name expected after capitalizing [`original`]
    pub const ORIGINAL_CAPITALIZED: &str = "Original F Name";

    /// Last name applied by the reference demo sequence
    pub const UPDATED_LAST_NAME: &str = "Brown";

    /// A person whose first name is already capitalized
    pub fn capitalized() -> PersonFixture {
        PersonFixture::new("Ada", "Lovelace")
    }

    /// A person with non-ASCII names
    pub fn unicode() -> PersonFixture {
        PersonFixture::new("élodie", "Straße")
    }

    /// The transparent struct used by the reference demo sequence
    pub fn transparent() -> PersonFixture {
        PersonFixture::new("A", "B")
    }
}

/// Inputs that must be rejected, with the reason they fail
pub fn invalid_names() -> Vec<(&'static str, NameError)> {
    vec![
        ("", NameError::Empty),
        (" ", NameError::Empty),
        ("\t\n", NameError::Empty),
    ]
}

/// Byte strings that are not valid UTF-8 (NUL terminated)
pub fn invalid_utf8() -> Vec<&'static [u8]> {
    vec![&b"\xff\xfe\0"[..], &b"caf\xc3\0"[..], &b"\xc0\xaf\0"[..]]
}
