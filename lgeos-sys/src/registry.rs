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
//! Declarative table of the GEOS C API surface.
//!
//! Each entry declares a symbol name, its return and parameter types, and
//! the minimum library version that exports it. Entries below the detected
//! version are left unbound; entries are never redefined across version
//! gates, only added. The native ABI evolves by strict addition, and a call
//! through a mismatched signature is undefined behavior, so nothing is ever
//! bound speculatively.
//!
//! When the detected version is at or above the reentrant threshold (GEOS
//! 3.1.0), every symbol is first probed for its `"_r"`-suffixed counterpart,
//! whose signature is the declared one with a [`GEOSContextHandle_t`]
//! prepended; the return type and the remaining parameters are unchanged.

use libloading::Library;

use crate::error::BindError;
use crate::loader::LoadedLibrary;
use crate::types::*;
use crate::version::VersionTriple;

use std::os::raw::{c_char, c_double, c_int, c_uchar, c_uint};

/// How a declared symbol resolved against the loaded library.
///
/// A `Reentrant` binding must be invoked with the context token as its
/// first argument; a `Plain` binding is invoked exactly as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<P, R> {
    Plain(P),
    Reentrant(R),
}

impl<P, R> Binding<P, R> {
    pub fn is_reentrant(&self) -> bool {
        matches!(self, Binding::Reentrant(_))
    }
}

/// Resolve one declared symbol against the loaded library.
///
/// Returns `None` for entries below their version gate and for absent
/// optional ("probe") entries; a missing required symbol is fatal.
fn resolve<P: Copy, R: Copy>(
    library: &Library,
    path: &str,
    plain: &'static str,
    reentrant: &'static str,
    detected: VersionTriple,
    gate: VersionTriple,
    required: bool,
    prefer_reentrant: bool,
) -> Result<Option<Binding<P, R>>, BindError> {
    if detected < gate {
        return Ok(None);
    }

    if prefer_reentrant {
        if let Ok(symbol) = unsafe { library.get::<R>(reentrant.as_bytes()) } {
            return Ok(Some(Binding::Reentrant(*symbol)));
        }
    }

    match unsafe { library.get::<P>(plain.as_bytes()) } {
        Ok(symbol) => Ok(Some(Binding::Plain(*symbol))),
        Err(_) if !required => Ok(None),
        Err(_) => Err(BindError::MissingSymbol {
            path: path.to_string(),
            symbol: &plain[..plain.len() - 1],
        }),
    }
}

fn optional_symbol<T: Copy>(library: &Library, name: &'static str) -> Option<T> {
    unsafe { library.get::<T>(name.as_bytes()).ok().map(|s| *s) }
}

macro_rules! __geos_required {
    () => {
        true
    };
    (probe) => {
        false
    };
}

macro_rules! geos_registry {
    (
        $(
            @[$maj:literal, $min:literal, $pat:literal $(, $probe:ident)?]
            fn $name:ident( $($arg:ident : $aty:ty),* $(,)? ) $(-> $ret:ty)?;
        )*
    ) => {
        /// One typed function-pointer slot per declared symbol.
        ///
        /// `None` means "not declared at the detected version" or "optional
        /// and absent from this build"; callers must treat such slots as
        /// unsupported, never as an error to bind around.
        #[allow(non_snake_case)]
        #[derive(Default)]
        pub struct Registry {
            $(
                pub $name: Option<Binding<
                    unsafe extern "C" fn($($aty),*) $(-> $ret)?,
                    unsafe extern "C" fn(GEOSContextHandle_t $(, $aty)*) $(-> $ret)?,
                >>,
            )*
        }

        impl Registry {
            /// Bind every symbol declared at or below the detected version.
            pub fn bind(loaded: &LoadedLibrary) -> Result<Registry, BindError> {
                let prefer_reentrant = loaded.version.is_reentrant();
                Ok(Registry {
                    $(
                        $name: resolve(
                            &loaded.library,
                            &loaded.path,
                            concat!(stringify!($name), "\0"),
                            concat!(stringify!($name), "_r\0"),
                            loaded.version.library,
                            VersionTriple::new($maj, $min, $pat),
                            __geos_required!($($probe)?),
                            prefer_reentrant,
                        )?,
                    )*
                })
            }
        }
    };
}

geos_registry! {
    // ---- coordinate sequences ----
    @[3, 0, 0] fn GEOSCoordSeq_create(size: c_uint, dims: c_uint) -> *mut GEOSCoordSequence;
    @[3, 0, 0] fn GEOSCoordSeq_destroy(cs: *mut GEOSCoordSequence);
    @[3, 0, 0] fn GEOSCoordSeq_setX(cs: *mut GEOSCoordSequence, idx: c_uint, val: c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_setY(cs: *mut GEOSCoordSequence, idx: c_uint, val: c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_setZ(cs: *mut GEOSCoordSequence, idx: c_uint, val: c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_getX(cs: *const GEOSCoordSequence, idx: c_uint, out: *mut c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_getY(cs: *const GEOSCoordSequence, idx: c_uint, out: *mut c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_getZ(cs: *const GEOSCoordSequence, idx: c_uint, out: *mut c_double) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_getSize(cs: *const GEOSCoordSequence, out: *mut c_uint) -> c_int;
    @[3, 0, 0] fn GEOSCoordSeq_getDimensions(cs: *const GEOSCoordSequence, out: *mut c_uint) -> c_int;

    // ---- geometry lifecycle ----
    @[3, 0, 0] fn GEOSGeom_createPoint(cs: *mut GEOSCoordSequence) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSGeom_createLineString(cs: *mut GEOSCoordSequence) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSGeom_createLinearRing(cs: *mut GEOSCoordSequence) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSGeom_clone(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSGeom_destroy(g: *mut GEOSGeometry);

    // ---- accessors ----
    @[3, 0, 0] fn GEOSGeom_getCoordSeq(g: *const GEOSGeometry) -> *const GEOSCoordSequence;
    @[3, 0, 0] fn GEOSGeom_getDimensions(g: *const GEOSGeometry) -> c_int;
    @[3, 0, 0] fn GEOSGetNumCoordinates(g: *const GEOSGeometry) -> c_int;
    @[3, 0, 0] fn GEOSGeomType(g: *const GEOSGeometry) -> *mut c_char;
    @[3, 0, 0] fn GEOSGeomTypeId(g: *const GEOSGeometry) -> c_int;
    @[3, 0, 0] fn GEOSGetSRID(g: *const GEOSGeometry) -> c_int;
    @[3, 0, 0] fn GEOSSetSRID(g: *mut GEOSGeometry, srid: c_int);
    @[3, 0, 0] fn GEOSGetNumGeometries(g: *const GEOSGeometry) -> c_int;
    @[3, 0, 0] fn GEOSGetGeometryN(g: *const GEOSGeometry, n: c_int) -> *const GEOSGeometry;

    // ---- topology ----
    @[3, 0, 0] fn GEOSEnvelope(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSBoundary(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSConvexHull(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSPointOnSurface(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSGetCentroid(g: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSIntersection(a: *const GEOSGeometry, b: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSDifference(a: *const GEOSGeometry, b: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSSymDifference(a: *const GEOSGeometry, b: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSUnion(a: *const GEOSGeometry, b: *const GEOSGeometry) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSBuffer(g: *const GEOSGeometry, width: c_double, quadsegs: c_int) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSSimplify(g: *const GEOSGeometry, tolerance: c_double) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSTopologyPreserveSimplify(g: *const GEOSGeometry, tolerance: c_double) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSRelate(a: *const GEOSGeometry, b: *const GEOSGeometry) -> *mut c_char;

    // ---- predicates (0 false, 1 true, 2 exception) ----
    @[3, 0, 0] fn GEOSDisjoint(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSTouches(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSIntersects(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSCrosses(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSWithin(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSContains(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSOverlaps(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSEquals(a: *const GEOSGeometry, b: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSEqualsExact(a: *const GEOSGeometry, b: *const GEOSGeometry, tolerance: c_double) -> c_char;
    @[3, 0, 0] fn GEOSisEmpty(g: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSisValid(g: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSisSimple(g: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSisRing(g: *const GEOSGeometry) -> c_char;
    @[3, 0, 0] fn GEOSHasZ(g: *const GEOSGeometry) -> c_char;

    // ---- scalar measures ----
    @[3, 0, 0] fn GEOSArea(g: *const GEOSGeometry, out: *mut c_double) -> c_int;
    @[3, 0, 0] fn GEOSLength(g: *const GEOSGeometry, out: *mut c_double) -> c_int;
    @[3, 0, 0] fn GEOSDistance(a: *const GEOSGeometry, b: *const GEOSGeometry, out: *mut c_double) -> c_int;

    // ---- WKT ----
    @[3, 0, 0] fn GEOSWKTReader_create() -> *mut GEOSWKTReader;
    @[3, 0, 0] fn GEOSWKTReader_destroy(reader: *mut GEOSWKTReader);
    @[3, 0, 0] fn GEOSWKTReader_read(reader: *mut GEOSWKTReader, wkt: *const c_char) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSWKTWriter_create() -> *mut GEOSWKTWriter;
    @[3, 0, 0] fn GEOSWKTWriter_destroy(writer: *mut GEOSWKTWriter);
    @[3, 0, 0] fn GEOSWKTWriter_write(writer: *mut GEOSWKTWriter, g: *const GEOSGeometry) -> *mut c_char;
    @[3, 3, 0] fn GEOSWKTWriter_setTrim(writer: *mut GEOSWKTWriter, trim: c_char);
    @[3, 3, 0] fn GEOSWKTWriter_setRoundingPrecision(writer: *mut GEOSWKTWriter, precision: c_int);
    @[3, 3, 0] fn GEOSWKTWriter_setOutputDimension(writer: *mut GEOSWKTWriter, dim: c_int);
    @[3, 3, 0] fn GEOSWKTWriter_getOutputDimension(writer: *mut GEOSWKTWriter) -> c_int;

    // ---- WKB ----
    @[3, 0, 0] fn GEOSWKBReader_create() -> *mut GEOSWKBReader;
    @[3, 0, 0] fn GEOSWKBReader_destroy(reader: *mut GEOSWKBReader);
    @[3, 0, 0] fn GEOSWKBReader_read(reader: *mut GEOSWKBReader, wkb: *const c_uchar, size: libc::size_t) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSWKBReader_readHEX(reader: *mut GEOSWKBReader, hex: *const c_uchar, size: libc::size_t) -> *mut GEOSGeometry;
    @[3, 0, 0] fn GEOSWKBWriter_create() -> *mut GEOSWKBWriter;
    @[3, 0, 0] fn GEOSWKBWriter_destroy(writer: *mut GEOSWKBWriter);
    @[3, 0, 0] fn GEOSWKBWriter_write(writer: *mut GEOSWKBWriter, g: *const GEOSGeometry, size: *mut libc::size_t) -> *mut c_uchar;
    @[3, 0, 0] fn GEOSWKBWriter_writeHEX(writer: *mut GEOSWKBWriter, g: *const GEOSGeometry, size: *mut libc::size_t) -> *mut c_uchar;
    @[3, 0, 0] fn GEOSWKBWriter_getOutputDimension(writer: *const GEOSWKBWriter) -> c_int;
    @[3, 0, 0] fn GEOSWKBWriter_setOutputDimension(writer: *mut GEOSWKBWriter, dim: c_int);
    @[3, 0, 0] fn GEOSWKBWriter_getByteOrder(writer: *const GEOSWKBWriter) -> c_int;
    @[3, 0, 0] fn GEOSWKBWriter_setByteOrder(writer: *mut GEOSWKBWriter, order: c_int);
    @[3, 0, 0] fn GEOSWKBWriter_getIncludeSRID(writer: *const GEOSWKBWriter) -> c_int;
    @[3, 0, 0] fn GEOSWKBWriter_setIncludeSRID(writer: *mut GEOSWKBWriter, include: c_int);

    // ---- prepared geometry (C API 1.5.0 / GEOS 3.1.0) ----
    @[3, 1, 0] fn GEOSPrepare(g: *const GEOSGeometry) -> *const GEOSPreparedGeometry;
    @[3, 1, 0] fn GEOSPreparedGeom_destroy(p: *const GEOSPreparedGeometry);
    @[3, 1, 0] fn GEOSPreparedIntersects(p: *const GEOSPreparedGeometry, g: *const GEOSGeometry) -> c_char;
    @[3, 1, 0] fn GEOSPreparedContains(p: *const GEOSPreparedGeometry, g: *const GEOSGeometry) -> c_char;
    @[3, 1, 0] fn GEOSPreparedContainsProperly(p: *const GEOSPreparedGeometry, g: *const GEOSGeometry) -> c_char;
    @[3, 1, 0] fn GEOSPreparedCovers(p: *const GEOSPreparedGeometry, g: *const GEOSGeometry) -> c_char;
    @[3, 1, 0] fn GEOSisValidReason(g: *const GEOSGeometry) -> *mut c_char;
    @[3, 1, 0] fn GEOSUnionCascaded(g: *const GEOSGeometry) -> *mut GEOSGeometry;

    // ---- linear referencing and single-sided buffer ----
    // Not found in all libraries versioned 3.2, so probed rather than required.
    @[3, 2, 0, probe] fn GEOSSingleSidedBuffer(g: *const GEOSGeometry, width: c_double, quadsegs: c_int, join_style: c_int, mitre_limit: c_double, left_side: c_int) -> *mut GEOSGeometry;
    @[3, 2, 0, probe] fn GEOSProject(line: *const GEOSGeometry, point: *const GEOSGeometry) -> c_double;
    @[3, 2, 0, probe] fn GEOSProjectNormalized(line: *const GEOSGeometry, point: *const GEOSGeometry) -> c_double;
    @[3, 2, 0, probe] fn GEOSInterpolate(line: *const GEOSGeometry, dist: c_double) -> *mut GEOSGeometry;
    @[3, 2, 0, probe] fn GEOSInterpolateNormalized(line: *const GEOSGeometry, fraction: c_double) -> *mut GEOSGeometry;

    // ---- GEOS 3.3.0 ----
    @[3, 3, 0] fn GEOSUnaryUnion(g: *const GEOSGeometry) -> *mut GEOSGeometry;
}

/// Initialization, teardown and deallocation entry points.
///
/// These are special-cased and never go through the generic reentrant
/// rewrite: the reentrant initializer is what *produces* the context token
/// (it takes the two message-handler arguments and returns the token), and
/// the reentrant teardown consumes it as its sole argument.
#[allow(non_snake_case)]
#[derive(Default)]
pub struct CoreFns {
    pub initGEOS: Option<unsafe extern "C" fn(GEOSMessageHandler, GEOSMessageHandler)>,
    pub initGEOS_r:
        Option<unsafe extern "C" fn(GEOSMessageHandler, GEOSMessageHandler) -> GEOSContextHandle_t>,
    pub finishGEOS: Option<unsafe extern "C" fn()>,
    pub finishGEOS_r: Option<unsafe extern "C" fn(GEOSContextHandle_t)>,
    /// Present from GEOS 3.5; absent builds simply keep the default handlers.
    pub GEOSContext_setNoticeMessageHandler_r: Option<
        unsafe extern "C" fn(
            GEOSContextHandle_t,
            GEOSMessageHandler_r,
            *mut libc::c_void,
        ) -> GEOSMessageHandler_r,
    >,
    pub GEOSContext_setErrorMessageHandler_r: Option<
        unsafe extern "C" fn(
            GEOSContextHandle_t,
            GEOSMessageHandler_r,
            *mut libc::c_void,
        ) -> GEOSMessageHandler_r,
    >,
    /// Absent before GEOS 3.1.1; callers fall back to libc `free`.
    pub GEOSFree: Option<unsafe extern "C" fn(*mut libc::c_void)>,
    pub GEOSFree_r: Option<unsafe extern "C" fn(GEOSContextHandle_t, *mut libc::c_void)>,
}

impl CoreFns {
    pub fn bind(loaded: &LoadedLibrary) -> Result<CoreFns, BindError> {
        let library = &loaded.library;
        let fns = CoreFns {
            initGEOS: optional_symbol(library, "initGEOS\0"),
            initGEOS_r: optional_symbol(library, "initGEOS_r\0"),
            finishGEOS: optional_symbol(library, "finishGEOS\0"),
            finishGEOS_r: optional_symbol(library, "finishGEOS_r\0"),
            GEOSContext_setNoticeMessageHandler_r: optional_symbol(
                library,
                "GEOSContext_setNoticeMessageHandler_r\0",
            ),
            GEOSContext_setErrorMessageHandler_r: optional_symbol(
                library,
                "GEOSContext_setErrorMessageHandler_r\0",
            ),
            GEOSFree: optional_symbol(library, "GEOSFree\0"),
            GEOSFree_r: optional_symbol(library, "GEOSFree_r\0"),
        };

        let missing = |symbol| BindError::MissingSymbol {
            path: loaded.path.clone(),
            symbol,
        };
        if loaded.version.is_reentrant() {
            if fns.initGEOS_r.is_none() {
                return Err(missing("initGEOS_r"));
            }
            if fns.finishGEOS_r.is_none() {
                return Err(missing("finishGEOS_r"));
            }
        } else {
            if fns.initGEOS.is_none() {
                return Err(missing("initGEOS"));
            }
            if fns.finishGEOS.is_none() {
                return Err(missing("finishGEOS"));
            }
        }
        Ok(fns)
    }
}
