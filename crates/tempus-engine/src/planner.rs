//! Engine instance lifecycle
//!
//! A [`Planner`] exclusively owns one live engine handle. Acquisition goes
//! through the bound function table; release happens exactly once, either
//! via the consuming [`Planner::release`] or the destructor, so the handle
//! cannot be named after it is gone and double-destroy is unrepresentable.

use crate::api::{EngineApi, SolveFn};
use crate::marshal::encode_text;
use crate::outcome::{Outcome, SolveResult};
use crate::{EngineError, EngineResult, RawEngineHandle};
use std::os::raw::c_int;
use std::ptr::NonNull;
use std::sync::Arc;
use tracing::trace;

/// Exclusive owner of one live engine instance
///
/// Calls on one planner must be serialized, which `&mut self` enforces; the
/// engine does not lock internally. Distinct planners are fully independent
/// and may run on different threads concurrently.
pub struct Planner {
    handle: NonNull<RawEngineHandle>,
    api: Arc<EngineApi>,
}

// One planner never shares its handle: solve takes `&mut self` and the type
// is !Sync. Moving it to another thread is safe because the engine keeps no
// thread-affine state per instance.
unsafe impl Send for Planner {}

impl Planner {
    /// Acquire a fresh engine instance
    ///
    /// Fails with [`EngineError::Creation`] if the engine returns a null
    /// handle.
    pub fn acquire(api: Arc<EngineApi>) -> EngineResult<Self> {
        let raw = unsafe { (api.fns().create)() };
        let handle = NonNull::new(raw).ok_or(EngineError::Creation)?;
        trace!("acquired engine instance");
        Ok(Self { handle, api })
    }

    /// Solve a planning problem from PDDL files on disk
    ///
    /// The engine itself opens the files; a missing or unreadable file comes
    /// back as [`Outcome::FileError`] and leaves the planner usable.
    pub fn solve_files(&mut self, domain_path: &str, problem_path: &str) -> EngineResult<SolveResult> {
        let solve = self.api.fns().solve_files;
        self.solve_with(solve, "domain path", domain_path, "problem path", problem_path)
    }

    /// Solve a planning problem from PDDL document contents
    pub fn solve_content(&mut self, domain: &str, problem: &str) -> EngineResult<SolveResult> {
        let solve = self.api.fns().solve_content;
        self.solve_with(solve, "domain content", domain, "problem content", problem)
    }

    /// Encode both inputs, cross the boundary, decode the raw outcome
    ///
    /// The encoded strings are owned here and only borrowed by the engine
    /// for the duration of the call. The out-parameter slot is
    /// zero-initialized and populated by the engine.
    fn solve_with(
        &mut self,
        solve: SolveFn,
        first_label: &'static str,
        first: &str,
        second_label: &'static str,
        second: &str,
    ) -> EngineResult<SolveResult> {
        let first = encode_text(first_label, first)?;
        let second = encode_text(second_label, second)?;
        let mut plan_length: c_int = 0;

        let raw = unsafe {
            solve(
                self.handle.as_ptr(),
                first.as_ptr(),
                second.as_ptr(),
                &mut plan_length,
            )
        };

        let outcome = Outcome::decode(raw)?;
        trace!(?outcome, "solve call returned");
        Ok(SolveResult::new(outcome, plan_length))
    }

    /// The function table this planner was acquired from
    pub fn api(&self) -> &Arc<EngineApi> {
        &self.api
    }

    /// Release the engine instance
    ///
    /// Consuming the planner is what makes use-after-release impossible;
    /// dropping it has the same effect.
    pub fn release(self) {}
}

impl Drop for Planner {
    fn drop(&mut self) {
        trace!("releasing engine instance");
        unsafe { (self.api.fns().destroy)(self.handle.as_ptr()) };
    }
}

/// Scoped acquire/use/release
///
/// The sanctioned way to obtain a handle: the instance is released on every
/// exit path, including when `f` fails. Raw
/// [`Planner::acquire`]/[`Planner::release`] remain available for callers
/// who accept the ownership burden.
pub fn with_planner<T>(
    api: &Arc<EngineApi>,
    f: impl FnOnce(&mut Planner) -> EngineResult<T>,
) -> EngineResult<T> {
    let mut planner = Planner::acquire(Arc::clone(api))?;
    let result = f(&mut planner);
    planner.release();
    result
}
