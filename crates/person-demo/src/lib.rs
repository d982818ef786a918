//! Native caller for the person provider.
//!
//! Drives the exported C ABI of `person-ffi` through a fixed sequence and
//! reports what it observed:
//!
//! 1. `person_new` with the configured names
//! 2. `person_cap_first_name`
//! 3. `person_update_last_name`
//! 4. optionally `cperson_new`, a direct write to `CPerson::first_name`,
//!    and `person_from_cperson`
//!
//! Every status is checked and the sequence stops at the first failure.
//!
//! # Example
//!
//! ```no_run
//! use person_demo::{run, DemoConfig};
//!
//! let report = run(&DemoConfig::default()).unwrap();
//! assert_eq!(report.updated.last_name, "Brown");
//! ```

mod caller;
mod config;
mod error;

pub use caller::{run, CallbackEvent, DemoReport, Snapshot, TransparentReport};
pub use config::{DemoConfig, PersonConfig, TransparentConfig, UpdateConfig};
pub use error::{DemoError, DemoResult};
