//! Validated name text.

use crate::NameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A first or last name.
///
/// A name is non-empty, is not made only of whitespace, and contains no NUL
/// byte, so it can always be copied into a C string. Surrounding whitespace
/// is kept verbatim.
///
/// # Examples
///
/// ```
/// use person_core::Name;
///
/// let name = Name::new("original F Name").unwrap();
/// assert_eq!(name.capitalized().as_str(), "Original F Name");
///
/// assert!(Name::new("").is_err());
/// assert!(Name::new("a\0b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Creates a name from borrowed text, copying it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, whitespace only, contains a
    /// NUL byte, or the copy cannot be allocated.
    pub fn new(text: &str) -> Result<Self, NameError> {
        validate(text)?;

        let mut owned = String::new();
        owned
            .try_reserve_exact(text.len())
            .map_err(|_| NameError::AllocationFailure { len: text.len() })?;
        owned.push_str(text);

        Ok(Name(owned))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name with its first character in uppercase.
    ///
    /// The first character is replaced by its full Unicode uppercase mapping
    /// (`'ß'` becomes `"SS"`); the rest of the text is unchanged. Applying
    /// this twice gives the same result as applying it once.
    pub fn capitalized(&self) -> Name {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => Name(first.to_uppercase().chain(chars).collect()),
            None => self.clone(),
        }
    }
}

fn validate(text: &str) -> Result<(), NameError> {
    if text.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(position) = text.bytes().position(|b| b == 0) {
        return Err(NameError::InteriorNul { position });
    }
    Ok(())
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        validate(&text)?;
        Ok(Name(text))
    }
}

impl From<Name> for String {
    fn from(name: Name) -> String {
        name.0
    }
}
