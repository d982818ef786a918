//! Domain model behind the person FFI provider.
//!
//! This crate holds everything that can be expressed without raw pointers:
//!
//! - [`Name`]: validated, non-empty text that can always be handed back to C
//! - [`Person`]: the entity owned by the provider behind an opaque handle
//! - [`PersonError`]: why a name or person could not be built
//!
//! The `person-ffi` crate wraps these types in the C ABI.

mod name;
mod person;

pub use name::Name;
pub use person::{NameField, Person};

/// Reasons a piece of text is not a valid [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name contains a NUL byte at offset {position}")]
    InteriorNul { position: usize },

    #[error("could not reserve {len} bytes for name")]
    AllocationFailure { len: usize },
}

/// Errors produced while building or mutating a [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonError {
    #[error("invalid {field}: {source}")]
    InvalidName {
        /// Which name was rejected.
        field: NameField,
        #[source]
        source: NameError,
    },
}

impl PersonError {
    /// Attaches the field name to a [`NameError`].
    pub fn invalid_name(field: NameField, source: NameError) -> Self {
        Self::InvalidName { field, source }
    }

    /// Returns the underlying name error.
    pub fn name_error(&self) -> &NameError {
        match self {
            PersonError::InvalidName { source, .. } => source,
        }
    }

    /// Returns true if the failure came from the allocator rather than the input.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.name_error(), NameError::AllocationFailure { .. })
    }
}

/// Result type alias for person operations.
pub type PersonResult<T> = Result<T, PersonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = PersonError::invalid_name(NameField::Last, NameError::Empty);
        assert_eq!(err.to_string(), "invalid last_name: name is empty");
    }

    #[test]
    fn test_interior_nul_display() {
        let err = PersonError::invalid_name(NameField::First, NameError::InteriorNul { position: 3 });
        assert_eq!(
            err.to_string(),
            "invalid first_name: name contains a NUL byte at offset 3"
        );
    }

    #[test]
    fn test_is_allocation_failure() {
        let oom = PersonError::invalid_name(NameField::First, NameError::AllocationFailure { len: 8 });
        assert!(oom.is_allocation_failure());
        assert!(!PersonError::invalid_name(NameField::First, NameError::Empty).is_allocation_failure());
    }
}
