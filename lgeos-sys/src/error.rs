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
use thiserror::Error;

/// Failures while locating, loading or binding the GEOS C library.
///
/// Every variant is fatal for the binding layer: there is no partial or
/// degraded binding state, callers must not retry with the same library.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("could not find the GEOS C library; searched {searched:?}")]
    LibraryNotFound { searched: Vec<String> },

    #[error("failed to load '{path}': {source}")]
    LibraryOpen {
        path: String,
        #[source]
        source: libloading::Error,
    },

    #[error("GEOS library at '{path}' does not export required symbol '{symbol}'")]
    MissingSymbol { path: String, symbol: &'static str },

    #[error(
        "malformed GEOS version string '{0}': \
         expected \"<maj>.<min>.<patch>-CAPI-<maj>.<min>.<patch>\""
    )]
    MalformedVersion(String),

    #[error("GEOSversion returned a null or non-UTF8 string")]
    VersionUnreadable,
}
