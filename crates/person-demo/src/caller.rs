//! The native caller sequence.
//!
//! Everything here goes through the exported C functions of `person-ffi`,
//! the same way `demos/c-caller/main.c` does, and checks every status.

use crate::config::{DemoConfig, TransparentConfig};
use crate::error::{DemoError, DemoResult};
use log::{debug, info};
use person_ffi::{
    cperson_free, cperson_new, person_cap_first_name, person_first_name, person_free,
    person_from_cperson, person_last_name, person_new, person_update_last_name, CPerson,
    PersonHandle, PersonStatus,
};
use serde::Serialize;
use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::io::Write;
use std::ptr::{self, NonNull};

/// Both names of a person at one point of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub first_name: String,
    pub last_name: String,
}

/// One invocation of the update callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackEvent {
    pub prefix: String,
    pub name: String,
}

/// Observations from the transparent struct part of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransparentReport {
    /// Fields right after `cperson_new`.
    pub original: Snapshot,
    /// Fields after writing `first_name` directly.
    pub after_direct_write: Snapshot,
    /// Handle built from the struct with `person_from_cperson`.
    pub reentered: Snapshot,
}

/// Everything the caller observed while running the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub created: Snapshot,
    pub capitalized: Snapshot,
    pub updated: Snapshot,
    /// Diagnostic callback invocations in the order they happened, both
    /// from the provider and from the caller's own reads.
    pub callbacks: Vec<CallbackEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<TransparentReport>,
}

thread_local! {
    static CALLBACK_EVENTS: RefCell<Vec<CallbackEvent>> = const { RefCell::new(Vec::new()) };
}

fn take_callback_events() -> Vec<CallbackEvent> {
    CALLBACK_EVENTS.with(|cell| std::mem::take(&mut *cell.borrow_mut()))
}

unsafe fn lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "(null)".to_string();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Diagnostic callback handed to every mutator: prints `<prefix>: <name>`
/// to stderr and keeps a copy for the report.
unsafe extern "C" fn update_done_cb(prefix: *const c_char, name: *const c_char) {
    let event = CallbackEvent {
        prefix: lossy(prefix),
        name: lossy(name),
    };
    let _ = writeln!(std::io::stderr(), "{}: {}", event.prefix, event.name);
    debug!("update callback: {:?}", event);
    CALLBACK_EVENTS.with(|cell| cell.borrow_mut().push(event));
}

/// Reports a value read by the caller through the diagnostic callback.
fn report(prefix: &CStr, name: *const c_char) {
    // Safety: prefix is NUL-terminated; update_done_cb accepts a null name.
    unsafe { update_done_cb(prefix.as_ptr(), name) }
}

fn check(step: &'static str, status: PersonStatus) -> DemoResult<()> {
    if status.is_success() {
        debug!("{step}: {status}");
        Ok(())
    } else {
        Err(DemoError::step_failed(step, status))
    }
}

fn c_string(field: &'static str, text: &str) -> DemoResult<CString> {
    CString::new(text).map_err(|_| DemoError::InteriorNul { field })
}

unsafe fn read_string(step: &'static str, ptr: *const c_char) -> DemoResult<String> {
    if ptr.is_null() {
        return Err(DemoError::UnreadableString { step });
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_owned)
        .map_err(|_| DemoError::UnreadableString { step })
}

/// A handle owned by the caller, released on drop.
struct OwnedPerson(NonNull<PersonHandle>);

impl OwnedPerson {
    fn create(first_name: &CStr, last_name: &CStr) -> DemoResult<Self> {
        let mut raw = ptr::null_mut();
        check("person_new", unsafe {
            person_new(first_name.as_ptr(), last_name.as_ptr(), &mut raw)
        })?;
        Self::from_raw("person_new", raw)
    }

    fn from_cperson(cperson: &OwnedCPerson) -> DemoResult<Self> {
        let mut raw = ptr::null_mut();
        check("person_from_cperson", unsafe {
            person_from_cperson(cperson.0.as_ptr(), &mut raw)
        })?;
        Self::from_raw("person_from_cperson", raw)
    }

    fn from_raw(step: &'static str, raw: *mut PersonHandle) -> DemoResult<Self> {
        NonNull::new(raw)
            .map(Self)
            .ok_or(DemoError::step_failed(step, PersonStatus::Internal))
    }

    fn snapshot(&self) -> DemoResult<Snapshot> {
        unsafe {
            Ok(Snapshot {
                first_name: read_string("person_first_name", person_first_name(self.0.as_ptr()))?,
                last_name: read_string("person_last_name", person_last_name(self.0.as_ptr()))?,
            })
        }
    }

    fn report_first_name(&self, prefix: &CStr) {
        report(prefix, unsafe { person_first_name(self.0.as_ptr()) });
    }

    fn report_last_name(&self, prefix: &CStr) {
        report(prefix, unsafe { person_last_name(self.0.as_ptr()) });
    }

    fn capitalize_first_name(&mut self) -> DemoResult<()> {
        check("person_cap_first_name", unsafe {
            person_cap_first_name(self.0.as_ptr(), Some(update_done_cb))
        })
    }

    fn update_last_name(&mut self, last_name: &CStr) -> DemoResult<()> {
        check("person_update_last_name", unsafe {
            person_update_last_name(self.0.as_ptr(), last_name.as_ptr(), Some(update_done_cb))
        })
    }
}

impl Drop for OwnedPerson {
    fn drop(&mut self) {
        unsafe { person_free(self.0.as_ptr()) };
    }
}

/// A transparent person owned by the caller, released on drop.
struct OwnedCPerson(NonNull<CPerson>);

impl OwnedCPerson {
    fn create(first_name: &CStr, last_name: &CStr) -> DemoResult<Self> {
        let mut raw = ptr::null_mut();
        check("cperson_new", unsafe {
            cperson_new(first_name.as_ptr(), last_name.as_ptr(), &mut raw)
        })?;
        NonNull::new(raw)
            .map(Self)
            .ok_or(DemoError::step_failed("cperson_new", PersonStatus::Internal))
    }

    fn report_first_name(&self, prefix: &CStr) {
        report(prefix, unsafe { self.0.as_ref().first_name });
    }

    fn snapshot(&self) -> DemoResult<Snapshot> {
        unsafe {
            let fields = self.0.as_ref();
            Ok(Snapshot {
                first_name: read_string("cperson.first_name", fields.first_name)?,
                last_name: read_string("cperson.last_name", fields.last_name)?,
            })
        }
    }
}

impl Drop for OwnedCPerson {
    fn drop(&mut self) {
        unsafe { cperson_free(self.0.as_ptr()) };
    }
}

fn run_transparent(config: &TransparentConfig) -> DemoResult<TransparentReport> {
    let first = c_string("transparent.first_name", &config.first_name)?;
    let last = c_string("transparent.last_name", &config.last_name)?;
    // declared before the struct so it outlives every read through it
    let replacement = c_string(
        "transparent.replacement_first_name",
        &config.replacement_first_name,
    )?;

    let mut cperson = OwnedCPerson::create(&first, &last)?;
    cperson.report_first_name(c"Original CPerson f name");
    let original = cperson.snapshot()?;
    info!(
        "Original CPerson: {} {}",
        original.first_name, original.last_name
    );

    // bypasses the handle API entirely
    unsafe { cperson.0.as_mut().first_name = replacement.as_ptr() };
    cperson.report_first_name(c"Updated CPerson f name");
    let after_direct_write = cperson.snapshot()?;
    info!(
        "Updated CPerson first name directly: {}",
        after_direct_write.first_name
    );

    let person = OwnedPerson::from_cperson(&cperson)?;
    person.report_first_name(c"Re-entered person f name");
    let reentered = person.snapshot()?;
    info!(
        "Person rebuilt from CPerson: {} {}",
        reentered.first_name, reentered.last_name
    );

    Ok(TransparentReport {
        original,
        after_direct_write,
        reentered,
    })
}

/// Runs the full caller sequence, stopping at the first failed step.
///
/// create → capitalize first name → update last name → (optionally) the
/// transparent struct round trip. Every handle is released before returning,
/// on success and on failure.
pub fn run(config: &DemoConfig) -> DemoResult<DemoReport> {
    take_callback_events();

    let first = c_string("person.first_name", &config.person.first_name)?;
    let last = c_string("person.last_name", &config.person.last_name)?;
    let new_last = c_string("update.last_name", &config.update.last_name)?;

    let mut person = OwnedPerson::create(&first, &last)?;
    let created = person.snapshot()?;
    info!("Created person: {} {}", created.first_name, created.last_name);

    person.capitalize_first_name()?;
    let capitalized = person.snapshot()?;
    info!("Capitalized first name: {}", capitalized.first_name);

    person.update_last_name(&new_last)?;
    let updated = person.snapshot()?;
    info!("Updated last name: {}", updated.last_name);
    person.report_first_name(c"Person");
    person.report_last_name(c"Person");
    drop(person);

    let transparent = if config.transparent.enabled {
        Some(run_transparent(&config.transparent)?)
    } else {
        info!("Transparent struct demonstration disabled");
        None
    };
    let callbacks = take_callback_events();

    Ok(DemoReport {
        created,
        capitalized,
        updated,
        callbacks,
        transparent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check() {
        assert!(check("step", PersonStatus::Success).is_ok());
        let err = check("step", PersonStatus::NullPointer).unwrap_err();
        assert_eq!(err.status(), Some(PersonStatus::NullPointer));
    }

    #[test]
    fn test_c_string_rejects_nul() {
        assert!(matches!(
            c_string("person.first_name", "a\0b"),
            Err(DemoError::InteriorNul {
                field: "person.first_name"
            })
        ));
    }

    #[test]
    fn test_callback_records_events() {
        take_callback_events();
        unsafe { update_done_cb(c"Last name".as_ptr(), c"Brown".as_ptr()) };
        assert_eq!(
            take_callback_events(),
            vec![CallbackEvent {
                prefix: "Last name".to_string(),
                name: "Brown".to_string(),
            }]
        );
    }

    #[test]
    fn test_report_passes_null_through() {
        take_callback_events();
        report(c"Person", ptr::null());
        assert_eq!(
            take_callback_events(),
            vec![CallbackEvent {
                prefix: "Person".to_string(),
                name: "(null)".to_string(),
            }]
        );
    }

    #[test]
    fn test_owned_person_releases_on_error_path() {
        let mut person = OwnedPerson::create(c"ada", c"Name").unwrap();
        let err = person.update_last_name(c"").unwrap_err();
        assert_eq!(err.status(), Some(PersonStatus::InvalidInput));
        assert_eq!(person.snapshot().unwrap().last_name, "Name");
    }
}
