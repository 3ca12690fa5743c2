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
use lgeos_sys::{BindError, VersionTriple};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed WKT/WKB input.
    #[error("could not create geometry because of errors while reading {format} input")]
    Reading { format: &'static str },

    /// A z coordinate was requested on a 2-D geometry.
    #[error("{0}")]
    Dimension(&'static str),

    /// The native library returned null for an operation that is undefined
    /// on degenerate or invalid geometry.
    #[error("topology operation '{0}' failed")]
    Topology(&'static str),

    /// The native ternary predicate result was the exception sentinel.
    #[error("failed to evaluate predicate '{0}'")]
    Predicate(&'static str),

    /// The operation exists in newer GEOS releases but not the loaded one.
    #[error("'{operation}' is not supported by GEOS {version}")]
    Unsupported {
        operation: String,
        version: VersionTriple,
    },

    /// A capability-table entry was bound with an unexpected signature
    /// shape; indicates a tier-construction defect, not a caller error.
    #[error("capability '{0}' bound with an unexpected signature")]
    CapabilityShape(&'static str),

    /// A native call reported failure through its status return.
    #[error("GEOS method '{0}' signalled an exception")]
    Call(&'static str),

    /// GEOS method returned an unexpected null pointer.
    #[error("GEOS method '{0}' returned a null pointer")]
    NullPointer(&'static str),

    /// Construction-time failure; the binding layer cannot start.
    #[error("binding failed: {0}")]
    Binding(#[from] BindError),

    /// The reentrant initializer returned a null context token.
    #[error("GEOS context initialization failed")]
    Init,

    #[error("FfiNulError: {0}")]
    FfiNul(#[from] std::ffi::NulError),

    #[error("StrUtf8Error: {0}")]
    StrUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
