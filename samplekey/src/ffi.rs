//! C ABI adapter for LSM engines with a pluggable comparator.
//!
//! LevelDB's C API creates a custom comparator from a state pointer and three
//! callbacks:
//!
//! ```c
//! leveldb_comparator_t* leveldb_comparator_create(
//!     void* state,
//!     void (*destructor)(void*),
//!     int (*compare)(void*, const char* a, size_t alen,
//!                    const char* b, size_t blen),
//!     const char* (*name)(void*));
//! ```
//!
//! [`ComparatorCallbacks`] carries exactly those four values for any
//! [`KeyComparator`]. For hosts that link this crate as a static or dynamic
//! library, the sample-key callbacks are also exported unmangled as
//! [`samplekey_compare`], [`samplekey_name`] and [`samplekey_destroy`].
//!
//! All callbacks ignore the state pointer: comparators are rebuilt from
//! `Default` on every call, which costs nothing for zero-sized types. A null
//! key pointer is read as an empty key, so it compares like any other
//! undecodable input. A panic cannot unwind into the host: `extern "C"`
//! functions abort instead.

use std::cmp::Ordering;
use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use crate::comparator::{KeyComparator, SampleKeyComparator};

/// `compare` callback signature.
pub type CompareFn = unsafe extern "C" fn(
    state: *mut c_void,
    left: *const c_char,
    left_len: usize,
    right: *const c_char,
    right_len: usize,
) -> c_int;

/// `name` callback signature.
pub type NameFn = unsafe extern "C" fn(state: *mut c_void) -> *const c_char;

/// `destructor` callback signature.
pub type DestructorFn = unsafe extern "C" fn(state: *mut c_void);

/// State pointer and callbacks for `leveldb_comparator_create`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ComparatorCallbacks {
    /// Opaque state handed back to every callback. Always null.
    pub state: *mut c_void,
    /// Called once when the engine destroys the comparator.
    pub destructor: DestructorFn,
    /// Orders two encoded keys, returning a negative, zero or positive value.
    pub compare: CompareFn,
    /// Returns the NUL-terminated comparator name.
    pub name: NameFn,
}

impl ComparatorCallbacks {
    /// Builds the callbacks for comparator type `C`.
    pub fn new<C: KeyComparator + Default>() -> Self {
        Self {
            state: ptr::null_mut(),
            destructor: destroy_with::<C>,
            compare: compare_with::<C>,
            name: name_with::<C>,
        }
    }
}

impl Default for ComparatorCallbacks {
    fn default() -> Self {
        Self::new::<SampleKeyComparator>()
    }
}

/// Maps an ordering onto the C convention.
pub fn ordering_to_c(ordering: Ordering) -> c_int {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Borrows a host key buffer.
///
/// # Safety
///
/// If `data` is non-null it must point to `len` readable bytes that stay
/// valid and unmodified for `'a`.
unsafe fn key_slice<'a>(data: *const c_char, len: usize) -> &'a [u8] {
    if data.is_null() || len == 0 {
        return &[];
    }
    // SAFETY: non-null and `len` readable bytes, guaranteed by the caller.
    unsafe { std::slice::from_raw_parts(data.cast::<u8>(), len) }
}

unsafe extern "C" fn compare_with<C: KeyComparator + Default>(
    _state: *mut c_void,
    left: *const c_char,
    left_len: usize,
    right: *const c_char,
    right_len: usize,
) -> c_int {
    // SAFETY: the engine passes buffers of the stated lengths that outlive
    // this call.
    let (left, right) = unsafe { (key_slice(left, left_len), key_slice(right, right_len)) };
    ordering_to_c(C::default().compare(left, right))
}

unsafe extern "C" fn name_with<C: KeyComparator + Default>(_state: *mut c_void) -> *const c_char {
    C::default().name().as_ptr()
}

unsafe extern "C" fn destroy_with<C: KeyComparator + Default>(_state: *mut c_void) {
    C::default().teardown();
}

/// Compares two encoded sample keys.
///
/// Returns -1, 0 or 1. `state` is ignored and may be null.
///
/// # Safety
///
/// `left` and `right` must each be null or point to `left_len` /
/// `right_len` readable bytes for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn samplekey_compare(
    state: *mut c_void,
    left: *const c_char,
    left_len: usize,
    right: *const c_char,
    right_len: usize,
) -> c_int {
    // SAFETY: forwarded unchanged; the caller upholds this function's contract.
    unsafe { compare_with::<SampleKeyComparator>(state, left, left_len, right, right_len) }
}

/// Returns the comparator name, `"SampleKeyComparator"`.
///
/// The pointer is NUL-terminated and valid for the life of the process.
#[unsafe(no_mangle)]
pub extern "C" fn samplekey_name(_state: *mut c_void) -> *const c_char {
    SampleKeyComparator.name().as_ptr()
}

/// Tears down comparator state. A no-op; safe with any `state`, including null.
#[unsafe(no_mangle)]
pub extern "C" fn samplekey_destroy(_state: *mut c_void) {
    SampleKeyComparator.teardown();
}
