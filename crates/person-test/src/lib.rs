//! Test infrastructure for the person FFI provider
//!
//! Provides:
//! - Name and person fixtures shared by the provider and caller tests
//! - A C-ABI callback that records every invocation on the current thread
//! - Verification helpers for callback and accessor results

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;
