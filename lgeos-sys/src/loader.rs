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
//! Locating and loading `libgeos_c`, plus the one-time version probe.
//!
//! The version accessor is resolved and called before anything else is
//! bound: the parsed version selects which signatures [`crate::Registry`]
//! may declare against the library.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::PathBuf;

use libloading::Library;
use log::{debug, info};

use crate::error::BindError;
use crate::version::{parse_version_string, GeosVersion};

type GeosVersionFn = unsafe extern "C" fn() -> *const c_char;

/// A loaded `libgeos_c` together with its detected version.
///
/// The `library` field must outlive every function pointer copied out of it.
pub struct LoadedLibrary {
    pub library: Library,
    pub version: GeosVersion,
    pub path: String,
}

/// Sonames tried through the system loader's own search path.
#[cfg(target_os = "macos")]
const SONAMES: &[&str] = &["libgeos_c.1.dylib", "libgeos_c.dylib"];
#[cfg(not(target_os = "macos"))]
const SONAMES: &[&str] = &["libgeos_c.so.1", "libgeos_c.so"];

/// Directories scanned for `libgeos_c.so*` when the soname lookup fails.
const SEARCH_DIRS: &[&str] = &[
    // Debian/Ubuntu multiarch
    "/usr/lib/x86_64-linux-gnu",
    "/usr/lib/aarch64-linux-gnu",
    // Fedora/RHEL
    "/usr/lib64",
    // Arch/generic
    "/usr/lib",
    "/usr/local/lib",
    // macports
    "/opt/local/lib",
];

/// Load `libgeos_c` and detect its version.
///
/// Search order:
/// 1. `GEOS_LIBRARY_PATH` environment variable
/// 2. plain sonames, resolved by the dynamic loader
/// 3. well-known directories
/// 4. `LD_LIBRARY_PATH` directories
pub fn load_default() -> Result<LoadedLibrary, BindError> {
    let mut searched = Vec::new();

    if let Ok(explicit) = std::env::var("GEOS_LIBRARY_PATH") {
        return load_from(&explicit);
    }

    for name in SONAMES {
        match try_load(name) {
            Ok(loaded) => return Ok(loaded),
            Err(e) => {
                debug!("soname {} not usable: {}", name, e);
                searched.push(name.to_string());
            }
        }
    }

    for dir in SEARCH_DIRS {
        if let Some(path) = find_geos_in_dir(dir) {
            let path = path.display().to_string();
            match try_load(&path) {
                Ok(loaded) => return Ok(loaded),
                Err(e) => debug!("found {} but failed: {}", path, e),
            }
        }
        searched.push(dir.to_string());
    }

    if let Ok(ld_path) = std::env::var("LD_LIBRARY_PATH") {
        for dir in ld_path.split(':').filter(|d| !d.is_empty()) {
            if let Some(path) = find_geos_in_dir(dir) {
                let path = path.display().to_string();
                match try_load(&path) {
                    Ok(loaded) => return Ok(loaded),
                    Err(e) => debug!("found {} in LD_LIBRARY_PATH but failed: {}", path, e),
                }
            }
            searched.push(dir.to_string());
        }
    }

    Err(BindError::LibraryNotFound { searched })
}

/// Load a specific library path and detect its version.
pub fn load_from(path: &str) -> Result<LoadedLibrary, BindError> {
    try_load(path)
}

fn try_load(path: &str) -> Result<LoadedLibrary, BindError> {
    let library = unsafe { Library::new(path) }.map_err(|source| BindError::LibraryOpen {
        path: path.to_string(),
        source,
    })?;

    // Resolve the version accessor before anything else
    let version_fn: GeosVersionFn = unsafe {
        library
            .get::<GeosVersionFn>(b"GEOSversion\0")
            .map(|s| *s)
            .map_err(|_| BindError::MissingSymbol {
                path: path.to_string(),
                symbol: "GEOSversion",
            })?
    };

    let raw = unsafe { version_fn() };
    if raw.is_null() {
        return Err(BindError::VersionUnreadable);
    }
    let raw = unsafe { CStr::from_ptr(raw) }
        .to_str()
        .map_err(|_| BindError::VersionUnreadable)?;

    let version = parse_version_string(raw)?;
    info!("loaded GEOS {} from {}", version, path);

    Ok(LoadedLibrary {
        library,
        version,
        path: path.to_string(),
    })
}

/// Scan a directory for `libgeos_c.so*`, preferring the unversioned name,
/// then the highest version.
fn find_geos_in_dir(dir: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("libgeos_c.so"))
                .unwrap_or(false)
        })
        .collect();

    candidates.sort_by(|a, b| {
        let name = |p: &PathBuf| {
            p.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string()
        };
        let (a_name, b_name) = (name(a), name(b));
        let a_ver = a_name.strip_prefix("libgeos_c.so.").unwrap_or("");
        let b_ver = b_name.strip_prefix("libgeos_c.so.").unwrap_or("");
        match (a_ver.is_empty(), b_ver.is_empty()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => b_ver.cmp(a_ver),
        }
    });

    candidates.into_iter().next()
}
