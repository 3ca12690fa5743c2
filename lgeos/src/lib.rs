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
//! Version-adaptive bindings to a runtime-loaded GEOS C library.
//!
//! [`Lgeos::open_default`] locates `libgeos_c`, detects its version, binds
//! every symbol that version exports (preferring the reentrant `"_r"`
//! variants from GEOS 3.1 on) and initializes a context. The geometry,
//! reader and writer types all borrow the resulting [`Lgeos`], so the
//! library stays loaded for as long as any of them is alive.
//!
//! ```no_run
//! use lgeos::{Lgeos, WKTReader, WKTWriter};
//!
//! # fn main() -> lgeos::Result<()> {
//! let lgeos = Lgeos::open_default()?;
//! let reader = WKTReader::new(&lgeos)?;
//! let a = reader.read("POINT (1 2)")?;
//! let b = a.buffer(10.0, 8)?;
//! assert!(b.contains(&a)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! An [`Lgeos`] is tied to the thread that opened it. In legacy mode
//! (pre-3.1) the native library keeps global state; in contextual mode the
//! token is not synchronized. None of the types here are `Send` or `Sync`.

pub mod capability;
mod coord_seq;
mod enums;
mod error;
mod geometry;
mod linestring;
mod point;
mod prepared;
mod proxy;
mod wkb;
mod wkt;

pub use coord_seq::{CoordSequence, PointIterator};
pub use enums::{ByteOrder, GeometryTypes, OutputDimension};
pub use error::{Error, Result};
pub use geometry::Geometry;
pub use linestring::LineString;
pub use point::Point;
pub use prepared::PreparedGeometry;
pub use proxy::Lgeos;
pub use wkb::{WKBReader, WKBWriter, WkbBuffer};
pub use wkt::{WKTReader, WKTWriter};

pub use lgeos_sys::{GeosVersion, VersionTriple, REENTRANT_THRESHOLD};
