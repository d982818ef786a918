//! Update notification passed by the caller to every mutator.

use person_core::NameField;
use std::ffi::{c_char, CStr};

/// Callback invoked after a successful mutation.
///
/// `prefix` names the field that changed (`"First name"` or `"Last name"`),
/// `name` is its new value. Both pointers are valid only for the duration of
/// the call; copy the text to keep it.
///
/// The callback runs while the handle is still borrowed by the mutator. It
/// must not call any function on the same handle, including
/// [`person_free`](crate::person_free); doing so is undefined behavior.
pub type PersonUpdateCb = unsafe extern "C" fn(prefix: *const c_char, name: *const c_char);

/// Prefix handed to the callback for `field`.
pub(crate) const fn prefix(field: NameField) -> &'static CStr {
    match field {
        NameField::First => c"First name",
        NameField::Last => c"Last name",
    }
}

/// Invokes `on_done` once, synchronously, with the field prefix and new value.
pub(crate) fn notify(on_done: PersonUpdateCb, field: NameField, value: &CStr) {
    log::debug!("notifying caller: {} = {:?}", field, value);
    // Safety: both pointers come from live NUL-terminated strings that outlive the call.
    unsafe { on_done(prefix(field).as_ptr(), value.as_ptr()) }
}
