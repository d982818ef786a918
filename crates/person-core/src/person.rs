//! The person entity owned by the provider.

use crate::{Name, PersonError, PersonResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two name fields of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    /// The `first_name` field.
    First,
    /// The `last_name` field.
    Last,
}

impl NameField {
    /// Returns the field name as used in C structs and config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NameField::First => "first_name",
            NameField::Last => "last_name",
        }
    }

    /// Returns the human readable label passed as callback prefix.
    pub const fn label(&self) -> &'static str {
        match self {
            NameField::First => "First name",
            NameField::Last => "Last name",
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person with a first and last name.
///
/// Mutation happens in place through the mutators; the fields are never
/// exposed mutably so the [`Name`] invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    first_name: Name,
    last_name: Name,
}

impl Person {
    /// Creates a person, validating both names.
    ///
    /// # Errors
    ///
    /// Returns [`PersonError::InvalidName`] naming the first field that fails
    /// validation.
    pub fn new(first_name: &str, last_name: &str) -> PersonResult<Self> {
        let first_name =
            Name::new(first_name).map_err(|e| PersonError::invalid_name(NameField::First, e))?;
        let last_name =
            Name::new(last_name).map_err(|e| PersonError::invalid_name(NameField::Last, e))?;

        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// Returns the first name.
    pub fn first_name(&self) -> &Name {
        &self.first_name
    }

    /// Returns the last name.
    pub fn last_name(&self) -> &Name {
        &self.last_name
    }

    /// Capitalizes the first name in place and returns the new value.
    pub fn capitalize_first_name(&mut self) -> &Name {
        self.first_name = self.first_name.capitalized();
        &self.first_name
    }

    /// Validates `text` and replaces the last name with it.
    ///
    /// The person is left untouched when validation fails.
    pub fn update_last_name(&mut self, text: &str) -> PersonResult<&Name> {
        let name = Name::new(text).map_err(|e| PersonError::invalid_name(NameField::Last, e))?;
        self.last_name = name;
        Ok(&self.last_name)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
