//! Boundary function table
//!
//! Binds the fixed set of entry points the engine exports to a loaded
//! artifact, validating up front that every symbol is present. The resulting
//! [`EngineApi`] is immutable, shared behind an `Arc`, and keeps the loaded
//! artifact resident for as long as any bound function pointer can be
//! called.

use crate::loader::{BindingError, Locator};
use crate::strings::TransferredString;
use libloading::Library;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Opaque engine-owned instance memory
///
/// Only ever used behind `*mut`; the host never inspects or dereferences it.
#[repr(C)]
pub struct RawEngineHandle {
    _private: [u8; 0],
}

/// `temporal_planner_create`
pub type CreateFn = unsafe extern "C" fn() -> *mut RawEngineHandle;
/// `temporal_planner_destroy`
pub type DestroyFn = unsafe extern "C" fn(*mut RawEngineHandle);
/// `temporal_planner_solve_files` / `temporal_planner_solve_content`
pub type SolveFn = unsafe extern "C" fn(
    *mut RawEngineHandle,
    *const c_char,
    *const c_char,
    *mut c_int,
) -> c_int;
/// `temporal_planner_get_version`
pub type GetVersionFn = unsafe extern "C" fn() -> *mut c_char;
/// `temporal_planner_free_string`
pub type FreeStringFn = unsafe extern "C" fn(*mut c_char);

const SYM_CREATE: &str = "temporal_planner_create";
const SYM_DESTROY: &str = "temporal_planner_destroy";
const SYM_SOLVE_FILES: &str = "temporal_planner_solve_files";
const SYM_SOLVE_CONTENT: &str = "temporal_planner_solve_content";
const SYM_GET_VERSION: &str = "temporal_planner_get_version";
const SYM_FREE_STRING: &str = "temporal_planner_free_string";

/// The complete set of engine entry points
///
/// Normally resolved from a loaded artifact by [`EngineApi::load`]. Can also
/// be filled in by hand for an engine linked into the host process.
#[derive(Clone, Copy)]
pub struct EngineFns {
    pub create: CreateFn,
    pub destroy: DestroyFn,
    pub solve_files: SolveFn,
    pub solve_content: SolveFn,
    pub get_version: GetVersionFn,
    pub free_string: FreeStringFn,
}

/// Bound, validated engine entry points
///
/// Read-only after binding; share it freely with `Arc::clone`. All calls
/// through the table are synchronous and block the calling thread until the
/// engine returns.
pub struct EngineApi {
    fns: EngineFns,
    /// Keeps a dynamically loaded artifact resident while the table lives
    _artifact: Option<Library>,
}

impl EngineApi {
    /// Resolve, load, and bind the engine artifact
    ///
    /// All six entry points are resolved eagerly so a missing symbol
    /// surfaces here, at load time, rather than mid-session.
    pub fn load(locator: &Locator) -> Result<Arc<Self>, BindingError> {
        let artifact = locator.resolve()?;
        debug!(artifact = %artifact.display(), "loading engine artifact");

        let library = unsafe { Library::new(&artifact) }.map_err(|e| BindingError::LoadFailed {
            artifact: artifact.clone(),
            reason: e.to_string(),
        })?;

        let fns = unsafe { Self::bind_fns(&library, &artifact) }?;
        debug!(artifact = %artifact.display(), "engine artifact bound");

        Ok(Arc::new(Self {
            fns,
            _artifact: Some(library),
        }))
    }

    /// Bind a function table directly, bypassing dynamic loading
    ///
    /// For engines compiled into the host process. The caller is responsible
    /// for the pointers matching the boundary contract.
    pub fn from_fns(fns: EngineFns) -> Arc<Self> {
        Arc::new(Self {
            fns,
            _artifact: None,
        })
    }

    /// Resolve all six symbols, copying the function pointers out of the
    /// library so the table does not borrow it.
    ///
    /// # Safety
    ///
    /// The artifact must export these symbols with the boundary's exact
    /// C signatures; a mismatch is undefined behavior at call time.
    unsafe fn bind_fns(library: &Library, artifact: &Path) -> Result<EngineFns, BindingError> {
        unsafe fn resolve<T: Copy>(
            library: &Library,
            artifact: &Path,
            symbol: &'static str,
        ) -> Result<T, BindingError> {
            library
                .get::<T>(symbol.as_bytes())
                .map(|sym| *sym)
                .map_err(|_| BindingError::MissingSymbol {
                    artifact: artifact.to_path_buf(),
                    symbol,
                })
        }

        Ok(EngineFns {
            create: resolve::<CreateFn>(library, artifact, SYM_CREATE)?,
            destroy: resolve::<DestroyFn>(library, artifact, SYM_DESTROY)?,
            solve_files: resolve::<SolveFn>(library, artifact, SYM_SOLVE_FILES)?,
            solve_content: resolve::<SolveFn>(library, artifact, SYM_SOLVE_CONTENT)?,
            get_version: resolve::<GetVersionFn>(library, artifact, SYM_GET_VERSION)?,
            free_string: resolve::<FreeStringFn>(library, artifact, SYM_FREE_STRING)?,
        })
    }

    pub(crate) fn fns(&self) -> &EngineFns {
        &self.fns
    }

    /// Query the engine's version string
    ///
    /// The engine transfers ownership of the returned buffer; it is decoded
    /// and released exactly once here. A null pointer decodes to the
    /// sentinel `"Unknown"` and performs no release call.
    pub fn version(&self) -> String {
        let ptr = unsafe { (self.fns.get_version)() };
        match TransferredString::from_raw(ptr, self.fns.free_string) {
            Some(transferred) => transferred.to_string_lossy().into_owned(),
            None => "Unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_missing_artifact() {
        let locator = Locator::with_artifact("/nonexistent/libtemporal_planner.so");
        let result = EngineApi::load(&locator);
        assert!(matches!(result, Err(BindingError::ArtifactNotFound { .. })));
    }

    #[test]
    fn test_load_unloadable_artifact() {
        // An existing file that is not a shared library must fail at load,
        // not at first call
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join(Locator::artifact_file_name());
        std::fs::write(&bogus, b"definitely not ELF").unwrap();

        let result = EngineApi::load(&Locator::with_artifact(&bogus));
        match result {
            Err(BindingError::LoadFailed { artifact, .. }) => assert_eq!(artifact, bogus),
            other => panic!("expected LoadFailed, got {:?}", other.err()),
        }
    }
}
