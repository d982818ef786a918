//! Transparent person struct for callers that need direct field access.
//!
//! Unlike [`PersonHandle`], the layout of [`CPerson`] is public: C code may
//! read `first_name`/`last_name` and assign new pointers to them without
//! going through any setter. Nothing is validated on such writes. Use
//! [`person_from_cperson`] to get back to the checked API.

use crate::error::{borrow_name, FfiError, FfiResult};
use crate::handle::{c_name, PersonHandle};
use crate::status::{boundary, PersonStatus};
use person_core::{NameField, Person};
use std::ffi::{c_char, CString};
use std::ptr;

/// Person with directly assignable string fields.
///
/// Escape hatch: writes to the public fields bypass all validation. A
/// pointer assigned by the caller stays owned by the caller and must remain
/// valid while the struct is used. The `owned_*` fields belong to the
/// provider and must not be touched.
#[repr(C)]
pub struct CPerson {
    /// First name, NUL-terminated.
    pub first_name: *const c_char,
    /// Last name, NUL-terminated.
    pub last_name: *const c_char,
    /// Provider copy of the initial first name, released by `cperson_free`.
    owned_first_name: *mut c_char,
    /// Provider copy of the initial last name, released by `cperson_free`.
    owned_last_name: *mut c_char,
}

impl CPerson {
    fn from_person(person: &Person) -> FfiResult<Self> {
        let first_name = c_name(NameField::First, person.first_name())?;
        let last_name = c_name(NameField::Last, person.last_name())?;
        let owned_first_name = first_name.into_raw();
        let owned_last_name = last_name.into_raw();
        Ok(Self {
            first_name: owned_first_name,
            last_name: owned_last_name,
            owned_first_name,
            owned_last_name,
        })
    }
}

impl Drop for CPerson {
    fn drop(&mut self) {
        for owned in [self.owned_first_name, self.owned_last_name] {
            if !owned.is_null() {
                // Safety: produced by CString::into_raw in from_person and released only here.
                drop(unsafe { CString::from_raw(owned) });
            }
        }
    }
}

/// Creates a transparent person.
///
/// Names are validated exactly like [`person_new`](crate::person_new). On
/// success `*out_cperson` receives a struct that must be released with
/// [`cperson_free`]; on failure it is set to null.
///
/// # Safety
///
/// - `first_name` and `last_name` must be null or valid NUL-terminated strings
/// - `out_cperson` must be null or valid for writing one pointer
#[no_mangle]
pub unsafe extern "C" fn cperson_new(
    first_name: *const c_char,
    last_name: *const c_char,
    out_cperson: *mut *mut CPerson,
) -> PersonStatus {
    if out_cperson.is_null() {
        log::warn!("cperson_new: {}", FfiError::null_pointer("out_cperson"));
        return PersonStatus::NullPointer;
    }
    *out_cperson = ptr::null_mut();

    boundary("cperson_new", || {
        let first = borrow_name(first_name, NameField::First, "first_name")?;
        let last = borrow_name(last_name, NameField::Last, "last_name")?;
        let cperson = CPerson::from_person(&Person::new(first, last)?)?;
        *out_cperson = Box::into_raw(Box::new(cperson));
        Ok(())
    })
}

/// Releases a transparent person. Null is ignored.
///
/// Only the strings allocated by [`cperson_new`] are freed; pointers the
/// caller assigned to the public fields are left alone.
///
/// # Safety
///
/// - `cperson` must be null or a live struct from [`cperson_new`], not freed before
#[no_mangle]
pub unsafe extern "C" fn cperson_free(cperson: *mut CPerson) {
    if cperson.is_null() {
        return;
    }
    log::debug!("cperson_free: releasing transparent person");
    drop(Box::from_raw(cperson));
}

/// Creates an opaque handle from the current fields of a transparent person.
///
/// The field values are validated as if passed to
/// [`person_new`](crate::person_new), so a field cleared to null is
/// [`PersonStatus::InvalidInput`]. The transparent struct is not modified.
///
/// # Safety
///
/// - `cperson` must be null or point to a `CPerson` whose fields are null or
///   valid NUL-terminated strings
/// - `out_person` must be null or valid for writing one pointer
#[no_mangle]
pub unsafe extern "C" fn person_from_cperson(
    cperson: *const CPerson,
    out_person: *mut *mut PersonHandle,
) -> PersonStatus {
    if out_person.is_null() {
        log::warn!("person_from_cperson: {}", FfiError::null_pointer("out_person"));
        return PersonStatus::NullPointer;
    }
    *out_person = ptr::null_mut();

    boundary("person_from_cperson", || {
        let cperson = cperson.as_ref().ok_or(FfiError::null_pointer("cperson"))?;
        let first = borrow_name(cperson.first_name, NameField::First, "cperson.first_name")?;
        let last = borrow_name(cperson.last_name, NameField::Last, "cperson.last_name")?;
        let handle = PersonHandle::new(Person::new(first, last)?)?;
        *out_person = handle.into_raw();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{person_first_name, person_free, person_last_name};
    use pretty_assertions::assert_eq;
    use std::ffi::CStr;

    fn new_cperson(first: &CStr, last: &CStr) -> *mut CPerson {
        let mut cperson = ptr::null_mut();
        let status = unsafe { cperson_new(first.as_ptr(), last.as_ptr(), &mut cperson) };
        assert_eq!(status, PersonStatus::Success);
        cperson
    }

    #[test]
    fn test_cperson_fields_readable() {
        let cperson = new_cperson(c"A", c"B");
        unsafe {
            assert_eq!(CStr::from_ptr((*cperson).first_name), c"A");
            assert_eq!(CStr::from_ptr((*cperson).last_name), c"B");
            cperson_free(cperson);
        }
    }

    #[test]
    fn test_direct_write_keeps_caller_string() {
        let replacement = CString::new("C").unwrap();
        let cperson = new_cperson(c"A", c"B");
        unsafe {
            (*cperson).first_name = replacement.as_ptr();
            assert_eq!(CStr::from_ptr((*cperson).first_name), c"C");
            cperson_free(cperson);
        }
        // still owned by us after the struct is gone
        assert_eq!(replacement.as_c_str(), c"C");
    }

    #[test]
    fn test_cperson_new_validates() {
        let mut cperson = ptr::null_mut();
        let status = unsafe { cperson_new(c"A".as_ptr(), c" ".as_ptr(), &mut cperson) };
        assert_eq!(status, PersonStatus::InvalidInput);
        assert!(cperson.is_null());

        let status = unsafe { cperson_new(ptr::null(), c"B".as_ptr(), &mut cperson) };
        assert_eq!(status, PersonStatus::InvalidInput);
        assert!(cperson.is_null());

        let status = unsafe { cperson_new(c"A".as_ptr(), c"B".as_ptr(), ptr::null_mut()) };
        assert_eq!(status, PersonStatus::NullPointer);
    }

    #[test]
    fn test_person_from_cperson_uses_current_fields() {
        let cperson = new_cperson(c"A", c"B");
        let mut handle = ptr::null_mut();
        unsafe {
            (*cperson).first_name = c"C".as_ptr();
            assert_eq!(person_from_cperson(cperson, &mut handle), PersonStatus::Success);
            assert_eq!(CStr::from_ptr(person_first_name(handle)), c"C");
            assert_eq!(CStr::from_ptr(person_last_name(handle)), c"B");
            person_free(handle);
            cperson_free(cperson);
        }
    }

    #[test]
    fn test_person_from_cperson_rejects_cleared_field() {
        let cperson = new_cperson(c"A", c"B");
        let mut handle = ptr::null_mut();
        unsafe {
            (*cperson).last_name = ptr::null();
            assert_eq!(
                person_from_cperson(cperson, &mut handle),
                PersonStatus::InvalidInput
            );
            assert!(handle.is_null());
            cperson_free(cperson);
        }
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { cperson_free(ptr::null_mut()) };
    }
}
