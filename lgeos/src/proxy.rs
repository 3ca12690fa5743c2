/*
This file is part of the lgeos runtime binding layer
Copyright (C) 2022 Novel-T

The lgeos runtime binding layer is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
//! The live connection to a loaded GEOS library.
//!
//! [`Lgeos`] owns the loaded library, the symbol registry, the capability
//! table and, on reentrant builds, the context token produced by
//! `initGEOS_r`. Every wrapper type in this crate borrows an `Lgeos` and
//! routes its native calls through it, so the library cannot be unloaded
//! while any geometry, reader or writer is alive.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::ptr;

use lgeos_sys::{
    load_default, load_from, CoreFns, GEOSContextHandle_t, GeosVersion, LoadedLibrary, Registry,
    VersionTriple,
};

use crate::capability::CapabilityTable;
use crate::error::{Error, Result};

/// How this process talks to the library.
///
/// `Legacy` uses the pre-3.1 global-state entry points; `Contextual` holds
/// the token threaded through every `"_r"` call. The distinction is fixed at
/// open time by the detected version and never changes afterwards.
enum ContextState {
    Legacy,
    Contextual { handle: GEOSContextHandle_t },
}

pub struct Lgeos {
    pub(crate) registry: Registry,
    pub(crate) core: CoreFns,
    table: CapabilityTable,
    state: ContextState,
    finished: bool,
    loaded: LoadedLibrary,
}

unsafe extern "C" fn notice_handler(message: *const c_char, _userdata: *mut c_void) {
    if !message.is_null() {
        let text = CStr::from_ptr(message).to_string_lossy();
        log::warn!("GEOS notice: {}", text.trim_end());
    }
}

unsafe extern "C" fn error_handler(message: *const c_char, _userdata: *mut c_void) {
    if !message.is_null() {
        let text = CStr::from_ptr(message).to_string_lossy();
        log::error!("GEOS error: {}", text.trim_end());
    }
}

impl Lgeos {
    /// Find, load and initialize the GEOS library from the standard search
    /// locations (`GEOS_LIBRARY_PATH`, the dynamic loader, well-known
    /// directories, `LD_LIBRARY_PATH`).
    pub fn open_default() -> Result<Lgeos> {
        Lgeos::from_loaded(load_default()?)
    }

    /// Load and initialize a specific shared library file.
    pub fn open(path: &str) -> Result<Lgeos> {
        Lgeos::from_loaded(load_from(path)?)
    }

    pub fn from_loaded(loaded: LoadedLibrary) -> Result<Lgeos> {
        let registry = Registry::bind(&loaded)?;
        let core = CoreFns::bind(&loaded)?;

        let state = if loaded.version.is_reentrant() {
            let init = core.initGEOS_r.ok_or(Error::Init)?;
            let handle = unsafe { init(None, None) };
            if handle.is_null() {
                return Err(Error::Init);
            }
            // Only exported from 3.5; older builds keep the default
            // stderr handlers for this context.
            if let Some(set_notice) = core.GEOSContext_setNoticeMessageHandler_r {
                unsafe { set_notice(handle, Some(notice_handler), ptr::null_mut()) };
            }
            if let Some(set_error) = core.GEOSContext_setErrorMessageHandler_r {
                unsafe { set_error(handle, Some(error_handler), ptr::null_mut()) };
            }
            ContextState::Contextual { handle }
        } else {
            let init = core.initGEOS.ok_or(Error::Init)?;
            unsafe { init(None, None) };
            ContextState::Legacy
        };

        let table = CapabilityTable::build(&registry, loaded.version.library);
        log::debug!(
            "initialized GEOS {} from {} ({}, {} capabilities)",
            loaded.version.raw,
            loaded.path,
            if loaded.version.is_reentrant() {
                "reentrant"
            } else {
                "legacy"
            },
            table.len(),
        );

        Ok(Lgeos {
            registry,
            core,
            table,
            state,
            finished: false,
            loaded,
        })
    }

    pub fn version(&self) -> &GeosVersion {
        &self.loaded.version
    }

    pub fn version_triple(&self) -> VersionTriple {
        self.loaded.version.library
    }

    pub fn library_path(&self) -> &str {
        &self.loaded.path
    }

    pub fn is_reentrant(&self) -> bool {
        matches!(self.state, ContextState::Contextual { .. })
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.table
    }

    /// The context token for `"_r"` calls; null in legacy mode, where no
    /// bound symbol expects one.
    pub(crate) fn context_handle(&self) -> GEOSContextHandle_t {
        match self.state {
            ContextState::Contextual { handle } => handle,
            ContextState::Legacy => ptr::null_mut(),
        }
    }

    /// Release the context (or the legacy global state). Safe to call more
    /// than once; only the first call reaches the library. Outstanding
    /// geometries keep the `Lgeos` borrowed, so nothing can still route
    /// calls through a finished context.
    pub fn finish(&mut self) {
        run_teardown(&self.core, &mut self.state, &mut self.finished);
    }

    pub(crate) fn free_fn(&self) -> FreeFn {
        if let ContextState::Contextual { handle } = self.state {
            if let Some(f) = self.core.GEOSFree_r {
                return FreeFn::Reentrant(f, handle);
            }
        }
        match self.core.GEOSFree {
            // Pre-3.1.1 builds do not export GEOSFree; those release
            // their returned buffers with the system allocator.
            Some(f) => FreeFn::Plain(f),
            None => FreeFn::Libc,
        }
    }

    /// Copy a library-allocated C string out and release the original.
    pub(crate) unsafe fn managed_string(
        &self,
        raw: *mut c_char,
        method: &'static str,
    ) -> Result<String> {
        if raw.is_null() {
            return Err(Error::NullPointer(method));
        }
        let result = CStr::from_ptr(raw).to_str().map(String::from);
        self.free_fn().free(raw as *mut c_void);
        Ok(result?)
    }
}

impl Drop for Lgeos {
    fn drop(&mut self) {
        self.finish();
    }
}

fn run_teardown(core: &CoreFns, state: &mut ContextState, finished: &mut bool) {
    if *finished {
        return;
    }
    *finished = true;
    match state {
        ContextState::Contextual { handle } => {
            if let Some(finish) = core.finishGEOS_r {
                unsafe { finish(*handle) };
            }
            *handle = ptr::null_mut();
        }
        ContextState::Legacy => {
            if let Some(finish) = core.finishGEOS {
                unsafe { finish() };
            }
        }
    }
}

/// Deallocator for buffers the library hands back, resolved once per call
/// site so WKB buffers can outlive the borrow that produced them.
#[derive(Clone, Copy)]
pub(crate) enum FreeFn {
    Reentrant(
        unsafe extern "C" fn(GEOSContextHandle_t, *mut c_void),
        GEOSContextHandle_t,
    ),
    Plain(unsafe extern "C" fn(*mut c_void)),
    Libc,
}

impl FreeFn {
    pub(crate) unsafe fn free(self, ptr: *mut c_void) {
        match self {
            FreeFn::Reentrant(f, ctx) => f(ctx, ptr),
            FreeFn::Plain(f) => f(ptr),
            FreeFn::Libc => libc::free(ptr),
        }
    }
}

/// Map a ternary predicate result (0 false, 1 true, 2 exception).
pub(crate) fn check_geos_predicate(value: c_char, name: &'static str) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::Predicate(name)),
    }
}

/// Invoke a registry slot, prepending the context token when the symbol
/// bound reentrant. An unbound slot is reported as unsupported at the
/// detected version.
macro_rules! geos_call {
    ($lgeos:expr, $name:ident ( $($arg:expr),* $(,)? )) => {
        match $lgeos.registry.$name {
            Some(lgeos_sys::Binding::Plain(f)) => f($($arg),*),
            Some(lgeos_sys::Binding::Reentrant(f)) => f($lgeos.context_handle(), $($arg),*),
            None => {
                return Err($crate::error::Error::Unsupported {
                    operation: stringify!($name).to_string(),
                    version: $lgeos.version_triple(),
                })
            }
        }
    };
}
pub(crate) use geos_call;

/// As [`geos_call!`], but an unbound slot is silently skipped. Used for
/// version-gated tuning calls whose absence just keeps library defaults.
macro_rules! geos_call_opt {
    ($lgeos:expr, $name:ident ( $($arg:expr),* $(,)? )) => {
        match $lgeos.registry.$name {
            Some(lgeos_sys::Binding::Plain(f)) => {
                f($($arg),*);
            }
            Some(lgeos_sys::Binding::Reentrant(f)) => {
                f($lgeos.context_handle(), $($arg),*);
            }
            None => {}
        }
    };
}
pub(crate) use geos_call_opt;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_check_geos_predicate() {
        assert!(!check_geos_predicate(0, "disjoint").unwrap());
        assert!(check_geos_predicate(1, "disjoint").unwrap());
        match check_geos_predicate(2, "disjoint") {
            Err(Error::Predicate(name)) => assert_eq!(name, "disjoint"),
            other => panic!("expected predicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_teardown_runs_once_legacy() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        unsafe extern "C" fn finish_stub() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let mut core = CoreFns::default();
        core.finishGEOS = Some(finish_stub);
        let mut state = ContextState::Legacy;
        let mut finished = false;

        run_teardown(&core, &mut state, &mut finished);
        run_teardown(&core, &mut state, &mut finished);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert!(finished);
    }

    #[test]
    fn test_teardown_passes_context_and_clears_it() {
        static SEEN: AtomicUsize = AtomicUsize::new(0);
        unsafe extern "C" fn finish_stub(handle: GEOSContextHandle_t) {
            SEEN.store(handle as usize, Ordering::SeqCst);
        }

        let mut core = CoreFns::default();
        core.finishGEOS_r = Some(finish_stub);
        let sentinel = 0x7a7a_usize;
        let mut state = ContextState::Contextual {
            handle: sentinel as GEOSContextHandle_t,
        };
        let mut finished = false;

        run_teardown(&core, &mut state, &mut finished);
        assert_eq!(SEEN.load(Ordering::SeqCst), sentinel);
        match state {
            ContextState::Contextual { handle } => assert!(handle.is_null()),
            ContextState::Legacy => panic!("state changed kind"),
        }
    }

    #[test]
    fn test_libc_free_fallback() {
        unsafe {
            let buffer = libc::malloc(16);
            assert!(!buffer.is_null());
            FreeFn::Libc.free(buffer);
        }
    }
}
