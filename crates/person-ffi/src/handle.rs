//! Opaque person handle and the functions operating on it.

use crate::callback::{self, PersonUpdateCb};
use crate::error::{borrow_name, FfiError, FfiResult};
use crate::status::{boundary, PersonStatus};
use person_core::{Name, NameError, NameField, Person, PersonError};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Provider-owned person, only ever seen by C as an opaque pointer.
///
/// Next to the person itself the handle keeps NUL-terminated copies of both
/// names, so accessors and callbacks can hand out `const char *` without
/// allocating. The copies are refreshed on every mutation.
pub struct PersonHandle {
    person: Person,
    first_name: CString,
    last_name: CString,
}

impl PersonHandle {
    /// Wraps a person, building the C copies of its names.
    pub fn new(person: Person) -> FfiResult<Self> {
        let first_name = c_name(NameField::First, person.first_name())?;
        let last_name = c_name(NameField::Last, person.last_name())?;
        Ok(Self {
            person,
            first_name,
            last_name,
        })
    }

    /// Returns the wrapped person.
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Returns the NUL-terminated first name.
    pub fn first_name(&self) -> &CStr {
        &self.first_name
    }

    /// Returns the NUL-terminated last name.
    pub fn last_name(&self) -> &CStr {
        &self.last_name
    }

    /// Capitalizes the first name and returns its C copy.
    pub fn capitalize_first_name(&mut self) -> FfiResult<&CStr> {
        self.first_name = c_name(NameField::First, self.person.capitalize_first_name())?;
        Ok(&self.first_name)
    }

    /// Replaces the last name and returns its C copy.
    ///
    /// The handle is unchanged if `text` is rejected.
    pub fn update_last_name(&mut self, text: &str) -> FfiResult<&CStr> {
        self.last_name = c_name(NameField::Last, self.person.update_last_name(text)?)?;
        Ok(&self.last_name)
    }

    /// Moves the handle to the heap and hands ownership to the caller.
    pub(crate) fn into_raw(self) -> *mut PersonHandle {
        Box::into_raw(Box::new(self))
    }
}

pub(crate) fn c_name(field: NameField, name: &Name) -> FfiResult<CString> {
    CString::new(name.as_str()).map_err(|e| {
        FfiError::from(PersonError::invalid_name(
            field,
            NameError::InteriorNul {
                position: e.nul_position(),
            },
        ))
    })
}

unsafe fn handle_ref<'a>(person: *const PersonHandle) -> FfiResult<&'a PersonHandle> {
    person.as_ref().ok_or(FfiError::null_pointer("person"))
}

unsafe fn handle_mut<'a>(person: *mut PersonHandle) -> FfiResult<&'a mut PersonHandle> {
    person.as_mut().ok_or(FfiError::null_pointer("person"))
}

/// Creates a person.
///
/// On success `*out_person` receives a new handle that must be released with
/// [`person_free`]. On failure `*out_person` is set to null.
///
/// A null or empty name fails with [`PersonStatus::InvalidInput`]; only a null
/// `out_person` is reported as [`PersonStatus::NullPointer`].
///
/// # Safety
///
/// - `first_name` and `last_name` must be null or valid NUL-terminated strings
/// - `out_person` must be null or valid for writing one pointer
#[no_mangle]
pub unsafe extern "C" fn person_new(
    first_name: *const c_char,
    last_name: *const c_char,
    out_person: *mut *mut PersonHandle,
) -> PersonStatus {
    if out_person.is_null() {
        log::warn!("person_new: {}", FfiError::null_pointer("out_person"));
        return PersonStatus::NullPointer;
    }
    *out_person = ptr::null_mut();

    boundary("person_new", || {
        let first = borrow_name(first_name, NameField::First, "first_name")?;
        let last = borrow_name(last_name, NameField::Last, "last_name")?;
        let handle = PersonHandle::new(Person::new(first, last)?)?;
        *out_person = handle.into_raw();
        Ok(())
    })
}

/// Capitalizes the first name in place.
///
/// `on_done` is called once with `("First name", <new first name>)` before
/// this function returns. Nothing changes and the callback is not called
/// when the status is not success.
///
/// # Safety
///
/// - `person` must be null or a live handle from [`person_new`]
#[no_mangle]
pub unsafe extern "C" fn person_cap_first_name(
    person: *mut PersonHandle,
    on_done: Option<PersonUpdateCb>,
) -> PersonStatus {
    boundary("person_cap_first_name", || {
        let handle = handle_mut(person)?;
        let on_done = on_done.ok_or(FfiError::null_pointer("on_done"))?;
        let first_name = handle.capitalize_first_name()?;
        callback::notify(on_done, NameField::First, first_name);
        Ok(())
    })
}

/// Replaces the last name.
///
/// `on_done` is called once with `("Last name", <new last name>)` before this
/// function returns. Nothing changes and the callback is not called when the
/// status is not success. A null or empty `last_name` is
/// [`PersonStatus::InvalidInput`].
///
/// # Safety
///
/// - `person` must be null or a live handle from [`person_new`]
/// - `last_name` must be null or a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn person_update_last_name(
    person: *mut PersonHandle,
    last_name: *const c_char,
    on_done: Option<PersonUpdateCb>,
) -> PersonStatus {
    boundary("person_update_last_name", || {
        let handle = handle_mut(person)?;
        let on_done = on_done.ok_or(FfiError::null_pointer("on_done"))?;
        let text = borrow_name(last_name, NameField::Last, "last_name")?;
        let updated = handle.update_last_name(text)?;
        callback::notify(on_done, NameField::Last, updated);
        Ok(())
    })
}

/// Returns the first name, or null for a null handle.
///
/// The string is owned by the handle and stays valid until the next mutation
/// of the handle or [`person_free`].
///
/// # Safety
///
/// - `person` must be null or a live handle from [`person_new`]
#[no_mangle]
pub unsafe extern "C" fn person_first_name(person: *const PersonHandle) -> *const c_char {
    handle_ref(person)
        .map(|h| h.first_name().as_ptr())
        .unwrap_or(ptr::null())
}

/// Returns the last name, or null for a null handle.
///
/// Same lifetime rules as [`person_first_name`].
///
/// # Safety
///
/// - `person` must be null or a live handle from [`person_new`]
#[no_mangle]
pub unsafe extern "C" fn person_last_name(person: *const PersonHandle) -> *const c_char {
    handle_ref(person)
        .map(|h| h.last_name().as_ptr())
        .unwrap_or(ptr::null())
}

/// Releases a handle. Null is ignored.
///
/// # Safety
///
/// - `person` must be null or a live handle from [`person_new`] or
///   [`person_from_cperson`](crate::person_from_cperson), not freed before
#[no_mangle]
pub unsafe extern "C" fn person_free(person: *mut PersonHandle) {
    if person.is_null() {
        return;
    }
    log::debug!("person_free: releasing handle");
    drop(Box::from_raw(person));
}

#[cfg(test)]
mod tests {
    use super::*;
    use person_test::{person_fixtures, CallbackRecorder};
    use pretty_assertions::assert_eq;

    fn new_handle(first: &CStr, last: &CStr) -> *mut PersonHandle {
        let mut handle = ptr::null_mut();
        let status = unsafe { person_new(first.as_ptr(), last.as_ptr(), &mut handle) };
        assert_eq!(status, PersonStatus::Success);
        assert!(!handle.is_null());
        handle
    }

    #[test]
    fn test_handle_caches_c_names() {
        let handle = PersonHandle::new(Person::new("Ada", "Lovelace").unwrap()).unwrap();
        assert_eq!(handle.first_name(), c"Ada");
        assert_eq!(handle.last_name(), c"Lovelace");
        assert_eq!(handle.person().to_string(), "Ada Lovelace");
    }

    #[test]
    fn test_update_rejected_keeps_state() {
        let mut handle = PersonHandle::new(Person::new("Ada", "Lovelace").unwrap()).unwrap();
        assert!(handle.update_last_name(" ").is_err());
        assert_eq!(handle.last_name(), c"Lovelace");
        assert_eq!(handle.person().last_name().as_str(), "Lovelace");
    }

    #[test]
    fn test_person_new_and_accessors() {
        let (first, last) = person_fixtures::original().c_names();
        let handle = new_handle(&first, &last);

        unsafe {
            assert_eq!(CStr::from_ptr(person_first_name(handle)), first.as_c_str());
            assert_eq!(CStr::from_ptr(person_last_name(handle)), last.as_c_str());
            person_free(handle);
        }
    }

    #[test]
    fn test_person_new_null_out_pointer() {
        let status = unsafe { person_new(c"A".as_ptr(), c"B".as_ptr(), ptr::null_mut()) };
        assert_eq!(status, PersonStatus::NullPointer);
    }

    #[test]
    fn test_person_new_failure_clears_out_pointer() {
        let mut handle = ptr::NonNull::<PersonHandle>::dangling().as_ptr();
        let status = unsafe { person_new(c"".as_ptr(), c"B".as_ptr(), &mut handle) };
        assert_eq!(status, PersonStatus::InvalidInput);
        assert!(handle.is_null());
    }

    #[test]
    fn test_person_new_null_name_is_invalid_input() {
        let mut handle = ptr::null_mut();
        let status = unsafe { person_new(ptr::null(), c"Name".as_ptr(), &mut handle) };
        assert_eq!(status, PersonStatus::InvalidInput);
        assert!(handle.is_null());

        let status = unsafe { person_new(c"Ada".as_ptr(), ptr::null(), &mut handle) };
        assert_eq!(status, PersonStatus::InvalidInput);
        assert!(handle.is_null());
    }

    #[test]
    fn test_update_null_last_name_is_invalid_input() {
        let recorder = CallbackRecorder::new();
        let handle = new_handle(c"ada", c"Name");
        unsafe {
            assert_eq!(
                person_update_last_name(handle, ptr::null(), Some(recorder.callback())),
                PersonStatus::InvalidInput
            );
            assert_eq!(CStr::from_ptr(person_last_name(handle)), c"Name");
            person_free(handle);
        }
        recorder.assert_not_called().unwrap();
    }

    #[test]
    fn test_handle_mutators_follow_person() {
        let mut handle = PersonHandle::new(Person::new("élodie", "Name").unwrap()).unwrap();
        assert_eq!(handle.capitalize_first_name().unwrap(), c"Élodie");
        assert_eq!(handle.person().first_name().as_str(), "Élodie");

        assert_eq!(handle.update_last_name("Brown").unwrap(), c"Brown");
        assert_eq!(handle.person().last_name().as_str(), "Brown");
        assert_eq!(handle.last_name(), c"Brown");
    }

    #[test]
    fn test_cap_first_name_notifies() {
        let recorder = CallbackRecorder::new();
        let handle = new_handle(c"original F Name", c"Name");

        let status = unsafe { person_cap_first_name(handle, Some(recorder.callback())) };
        assert_eq!(status, PersonStatus::Success);
        recorder
            .assert_called_once_with_prefix("First name", person_fixtures::ORIGINAL_CAPITALIZED)
            .unwrap();

        unsafe { person_free(handle) };
    }

    #[test]
    fn test_mutators_reject_null_callback() {
        let handle = new_handle(c"ada", c"Name");
        unsafe {
            assert_eq!(person_cap_first_name(handle, None), PersonStatus::NullPointer);
            assert_eq!(
                person_update_last_name(handle, c"Brown".as_ptr(), None),
                PersonStatus::NullPointer
            );
            assert_eq!(CStr::from_ptr(person_first_name(handle)), c"ada");
            assert_eq!(CStr::from_ptr(person_last_name(handle)), c"Name");
            person_free(handle);
        }
    }

    #[test]
    fn test_accessors_null_handle() {
        unsafe {
            assert!(person_first_name(ptr::null()).is_null());
            assert!(person_last_name(ptr::null()).is_null());
            person_free(ptr::null_mut());
        }
    }
}
