//! Ownership tracking for engine-allocated strings
//!
//! Two string lifetimes cross the boundary. Encoded solve inputs are owned
//! by the host and only *borrowed* by the engine for the duration of a call;
//! they must never be passed to the engine's release operation. The version
//! string is *transferred*: the engine allocates it and the release
//! obligation passes to the host. [`TransferredString`] makes that
//! obligation a destructor, so a transferred buffer is released exactly once
//! and a borrowed one cannot be released at all.

use crate::api::FreeStringFn;
use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr::NonNull;

/// An engine-allocated string whose ownership was transferred to the host
///
/// Pairs the buffer with the engine's release operation. Dropping the value
/// releases the buffer; the raw pointer can never be freed twice because it
/// is not reachable once the wrapper exists.
pub struct TransferredString {
    ptr: NonNull<c_char>,
    free: FreeStringFn,
}

impl TransferredString {
    /// Take ownership of a buffer returned by the engine
    ///
    /// Returns `None` for a null pointer, in which case no release call must
    /// ever be made.
    pub fn from_raw(ptr: *mut c_char, free: FreeStringFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, free })
    }

    /// Borrow the buffer as a C string
    pub fn as_c_str(&self) -> &CStr {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// Decode the buffer as UTF-8 text
    ///
    /// The engine writes UTF-8; anything else is replaced rather than
    /// propagated as an error, since a mangled version string is still more
    /// useful than none.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.as_c_str().to_string_lossy()
    }
}

impl Drop for TransferredString {
    fn drop(&mut self) {
        unsafe { (self.free)(self.ptr.as_ptr()) };
    }
}

impl std::fmt::Debug for TransferredString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TransferredString")
            .field(&self.to_string_lossy())
            .finish()
    }
}
