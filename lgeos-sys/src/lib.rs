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
//! Declarations and runtime symbol binding for the GEOS C library.
//!
//! Unlike a link-time `-sys` crate, `libgeos_c` is loaded with `dlopen` at
//! startup and every exported function is resolved by name against the
//! version actually found. The [`Registry`] declares one typed signature per
//! symbol together with its minimum-version gate; [`load_default`] finds the
//! library and detects its version; [`Binding`] records whether a symbol was
//! bound to its plain or its `"_r"` (reentrant, context-token-taking)
//! variant.

mod error;
mod loader;
mod registry;
mod types;
mod version;

pub use error::BindError;
pub use loader::{load_default, load_from, LoadedLibrary};
pub use registry::{Binding, CoreFns, Registry};
pub use types::*;
pub use version::{parse_version_string, GeosVersion, VersionTriple, REENTRANT_THRESHOLD};
