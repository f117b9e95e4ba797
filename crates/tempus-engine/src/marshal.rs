//! Text marshalling for the NUL-terminated boundary
//!
//! All text crossing the boundary is UTF-8 and NUL-terminated. Rust strings
//! are already UTF-8, so the only representational hazard is an embedded NUL
//! byte: it would silently truncate the payload on the engine side. Such
//! inputs are rejected here, before the boundary is crossed.

use std::ffi::CString;
use thiserror::Error;

/// Input text cannot be represented in the boundary's encoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{input} contains an embedded NUL byte at offset {offset}")]
pub struct EncodingError {
    /// Which input was rejected
    pub input: &'static str,
    /// Byte offset of the first embedded NUL
    pub offset: usize,
}

/// Encode one text input as a NUL-terminated C string
///
/// `input` names the value for error reporting ("domain path", "problem
/// content", ...). The returned `CString` is owned by the caller and only
/// borrowed by the engine for the duration of the call that uses it.
pub fn encode_text(input: &'static str, text: &str) -> Result<CString, EncodingError> {
    CString::new(text).map_err(|e| EncodingError {
        input,
        offset: e.nul_position(),
    })
}
