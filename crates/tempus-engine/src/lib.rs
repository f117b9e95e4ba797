//! Tempus Engine Bridge
//!
//! Safe host-side interface to the Tempus temporal planning engine, which is
//! shipped as a shared library with a C ABI. This crate handles:
//!
//! - Engine artifact resolution and dynamic loading via `libloading`
//! - Binding and type-checking the fixed set of exported entry points
//! - Instance lifecycle with guaranteed release on every exit path
//! - Text/scalar marshalling across the NUL-terminated UTF-8 boundary
//! - Decoding the engine's closed set of integer outcome codes
//! - Ownership tracking for strings allocated on the engine side
//!
//! # Safety
//!
//! Calling into the engine involves `unsafe` code and careful memory
//! management. All unsafe code is isolated in this crate behind safe
//! wrappers: a live [`Planner`] always holds a valid handle, a released
//! handle cannot be named again, and every engine-allocated string is freed
//! exactly once.
//!
//! # Example
//!
//! ```no_run
//! use tempus_engine::{with_planner, EngineApi, Locator};
//!
//! let api = EngineApi::load(&Locator::new())?;
//! let report = with_planner(&api, |planner| {
//!     planner.solve_files("domain.pddl", "problem.pddl")
//! })?;
//! println!("{:?} (plan length {:?})", report.outcome(), report.plan_length());
//! # Ok::<(), tempus_engine::EngineError>(())
//! ```

pub mod api;
pub mod loader;
pub mod marshal;
pub mod outcome;
pub mod planner;
pub mod strings;

use thiserror::Error;

/// Bridge crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised by the boundary layer itself
///
/// Domain outcomes reported by a solve (`FileError`, `ParseError`,
/// `NoSolutionFound`, ...) are not errors: they come back as
/// [`outcome::SolveResult`] values the caller branches on. An `EngineError`
/// always means the boundary could not complete the conversation with the
/// engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine artifact unloadable or a required symbol is missing; fatal to
    /// session setup
    #[error(transparent)]
    Binding(#[from] loader::BindingError),

    /// Engine returned a null handle from its create operation
    #[error("engine returned a null instance handle")]
    Creation,

    /// Input text cannot cross the NUL-terminated boundary; aborts only the
    /// offending call, the handle stays valid
    #[error(transparent)]
    Encoding(#[from] marshal::EncodingError),

    /// Engine returned an outcome code outside the protocol; version skew
    /// between bridge and engine, non-recoverable for the handle
    #[error(transparent)]
    Protocol(#[from] outcome::ProtocolViolation),
}

/// Result type for boundary operations
pub type EngineResult<T> = Result<T, EngineError>;

// Re-export main types
pub use api::{EngineApi, EngineFns, RawEngineHandle};
pub use loader::{BindingError, Locator};
pub use marshal::EncodingError;
pub use outcome::{Outcome, ProtocolViolation, SolveResult};
pub use planner::{with_planner, Planner};
pub use strings::TransferredString;
