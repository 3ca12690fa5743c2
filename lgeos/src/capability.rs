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
//! Abstract operation name -> bound native function.
//!
//! Built once at proxy construction by applying one extension step per
//! version tier, oldest first; each step only adds entries, so capability
//! sets strictly grow with the detected version. Read-only afterwards.

use std::collections::HashMap;
use std::os::raw::{c_char, c_double, c_int};

use lgeos_sys::{
    Binding, GEOSContextHandle_t, GEOSGeometry, GEOSPreparedGeometry, Registry, VersionTriple,
};

use crate::error::{Error, Result};

pub type GeomUnaryFn = unsafe extern "C" fn(*const GEOSGeometry) -> *mut GEOSGeometry;
pub type GeomUnaryFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry) -> *mut GEOSGeometry;

pub type GeomBinaryFn =
    unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry) -> *mut GEOSGeometry;
pub type GeomBinaryFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    *const GEOSGeometry,
) -> *mut GEOSGeometry;

pub type GeomDoubleFn = unsafe extern "C" fn(*const GEOSGeometry, c_double) -> *mut GEOSGeometry;
pub type GeomDoubleFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry, c_double) -> *mut GEOSGeometry;

pub type GeomBufferFn =
    unsafe extern "C" fn(*const GEOSGeometry, c_double, c_int) -> *mut GEOSGeometry;
pub type GeomBufferFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    c_double,
    c_int,
) -> *mut GEOSGeometry;

pub type GeomOffsetFn = unsafe extern "C" fn(
    *const GEOSGeometry,
    c_double,
    c_int,
    c_int,
    c_double,
    c_int,
) -> *mut GEOSGeometry;
pub type GeomOffsetFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    c_double,
    c_int,
    c_int,
    c_double,
    c_int,
) -> *mut GEOSGeometry;

pub type PredicateUnaryFn = unsafe extern "C" fn(*const GEOSGeometry) -> c_char;
pub type PredicateUnaryFnR = unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry) -> c_char;

pub type PredicateBinaryFn =
    unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry) -> c_char;
pub type PredicateBinaryFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry, *const GEOSGeometry) -> c_char;

pub type PredicateExactFn =
    unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry, c_double) -> c_char;
pub type PredicateExactFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    *const GEOSGeometry,
    c_double,
) -> c_char;

pub type PredicatePreparedFn =
    unsafe extern "C" fn(*const GEOSPreparedGeometry, *const GEOSGeometry) -> c_char;
pub type PredicatePreparedFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSPreparedGeometry,
    *const GEOSGeometry,
) -> c_char;

pub type ScalarUnaryFn = unsafe extern "C" fn(*const GEOSGeometry, *mut c_double) -> c_int;
pub type ScalarUnaryFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry, *mut c_double) -> c_int;

pub type ScalarBinaryFn =
    unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry, *mut c_double) -> c_int;
pub type ScalarBinaryFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    *const GEOSGeometry,
    *mut c_double,
) -> c_int;

pub type MeasureFn = unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry) -> c_double;
pub type MeasureFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry, *const GEOSGeometry) -> c_double;

pub type TextUnaryFn = unsafe extern "C" fn(*const GEOSGeometry) -> *mut c_char;
pub type TextUnaryFnR =
    unsafe extern "C" fn(GEOSContextHandle_t, *const GEOSGeometry) -> *mut c_char;

pub type TextBinaryFn =
    unsafe extern "C" fn(*const GEOSGeometry, *const GEOSGeometry) -> *mut c_char;
pub type TextBinaryFnR = unsafe extern "C" fn(
    GEOSContextHandle_t,
    *const GEOSGeometry,
    *const GEOSGeometry,
) -> *mut c_char;

/// A bound native function tagged by call shape.
///
/// Higher layers match on the shape they expect; the tag carries the
/// plain-or-reentrant distinction so invocation can prepend the context
/// token exactly when required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    GeomUnary(Binding<GeomUnaryFn, GeomUnaryFnR>),
    GeomBinary(Binding<GeomBinaryFn, GeomBinaryFnR>),
    GeomDouble(Binding<GeomDoubleFn, GeomDoubleFnR>),
    GeomBuffer(Binding<GeomBufferFn, GeomBufferFnR>),
    GeomOffset(Binding<GeomOffsetFn, GeomOffsetFnR>),
    PredicateUnary(Binding<PredicateUnaryFn, PredicateUnaryFnR>),
    PredicateBinary(Binding<PredicateBinaryFn, PredicateBinaryFnR>),
    PredicateExact(Binding<PredicateExactFn, PredicateExactFnR>),
    PredicatePrepared(Binding<PredicatePreparedFn, PredicatePreparedFnR>),
    ScalarUnary(Binding<ScalarUnaryFn, ScalarUnaryFnR>),
    ScalarBinary(Binding<ScalarBinaryFn, ScalarBinaryFnR>),
    Measure(Binding<MeasureFn, MeasureFnR>),
    TextUnary(Binding<TextUnaryFn, TextUnaryFnR>),
    TextBinary(Binding<TextBinaryFn, TextBinaryFnR>),
}

macro_rules! cap {
    ($entries:expr, $registry:expr, $name:literal, $variant:ident, $symbol:ident) => {
        if let Some(binding) = $registry.$symbol {
            $entries.insert($name, Capability::$variant(binding));
        }
    };
}

pub struct CapabilityTable {
    entries: HashMap<&'static str, Capability>,
    version: VersionTriple,
}

impl CapabilityTable {
    /// Apply every tier extension step up to the detected version.
    pub fn build(registry: &Registry, version: VersionTriple) -> CapabilityTable {
        let mut entries = HashMap::new();
        extend_300(&mut entries, registry);
        if version >= VersionTriple::new(3, 1, 0) {
            extend_310(&mut entries, registry);
        }
        if version >= VersionTriple::new(3, 2, 0) {
            extend_320(&mut entries, registry);
        }
        if version >= VersionTriple::new(3, 3, 0) {
            extend_330(&mut entries, registry);
        }
        CapabilityTable { entries, version }
    }

    pub fn get(&self, operation: &str) -> Result<Capability> {
        self.entries
            .get(operation)
            .copied()
            .ok_or_else(|| Error::Unsupported {
                operation: operation.to_string(),
                version: self.version,
            })
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn extend_300(entries: &mut HashMap<&'static str, Capability>, registry: &Registry) {
    cap!(entries, registry, "area", ScalarUnary, GEOSArea);
    cap!(entries, registry, "boundary", GeomUnary, GEOSBoundary);
    cap!(entries, registry, "buffer", GeomBuffer, GEOSBuffer);
    cap!(entries, registry, "centroid", GeomUnary, GEOSGetCentroid);
    cap!(entries, registry, "representative_point", GeomUnary, GEOSPointOnSurface);
    cap!(entries, registry, "convex_hull", GeomUnary, GEOSConvexHull);
    cap!(entries, registry, "distance", ScalarBinary, GEOSDistance);
    cap!(entries, registry, "envelope", GeomUnary, GEOSEnvelope);
    cap!(entries, registry, "length", ScalarUnary, GEOSLength);
    cap!(entries, registry, "has_z", PredicateUnary, GEOSHasZ);
    cap!(entries, registry, "is_empty", PredicateUnary, GEOSisEmpty);
    cap!(entries, registry, "is_ring", PredicateUnary, GEOSisRing);
    cap!(entries, registry, "is_simple", PredicateUnary, GEOSisSimple);
    cap!(entries, registry, "is_valid", PredicateUnary, GEOSisValid);
    cap!(entries, registry, "disjoint", PredicateBinary, GEOSDisjoint);
    cap!(entries, registry, "touches", PredicateBinary, GEOSTouches);
    cap!(entries, registry, "intersects", PredicateBinary, GEOSIntersects);
    cap!(entries, registry, "crosses", PredicateBinary, GEOSCrosses);
    cap!(entries, registry, "within", PredicateBinary, GEOSWithin);
    cap!(entries, registry, "contains", PredicateBinary, GEOSContains);
    cap!(entries, registry, "overlaps", PredicateBinary, GEOSOverlaps);
    cap!(entries, registry, "equals", PredicateBinary, GEOSEquals);
    cap!(entries, registry, "equals_exact", PredicateExact, GEOSEqualsExact);
    cap!(entries, registry, "relate", TextBinary, GEOSRelate);
    cap!(entries, registry, "difference", GeomBinary, GEOSDifference);
    cap!(entries, registry, "symmetric_difference", GeomBinary, GEOSSymDifference);
    cap!(entries, registry, "union", GeomBinary, GEOSUnion);
    cap!(entries, registry, "intersection", GeomBinary, GEOSIntersection);
    cap!(entries, registry, "simplify", GeomDouble, GEOSSimplify);
    cap!(entries, registry, "topology_preserve_simplify", GeomDouble, GEOSTopologyPreserveSimplify);
}

fn extend_310(entries: &mut HashMap<&'static str, Capability>, registry: &Registry) {
    cap!(entries, registry, "prepared_intersects", PredicatePrepared, GEOSPreparedIntersects);
    cap!(entries, registry, "prepared_contains", PredicatePrepared, GEOSPreparedContains);
    cap!(entries, registry, "prepared_contains_properly", PredicatePrepared, GEOSPreparedContainsProperly);
    cap!(entries, registry, "prepared_covers", PredicatePrepared, GEOSPreparedCovers);
    cap!(entries, registry, "is_valid_reason", TextUnary, GEOSisValidReason);
    cap!(entries, registry, "cascaded_union", GeomUnary, GEOSUnionCascaded);
}

fn extend_320(entries: &mut HashMap<&'static str, Capability>, registry: &Registry) {
    // All probed: some 3.2 builds ship without linear referencing.
    cap!(entries, registry, "parallel_offset", GeomOffset, GEOSSingleSidedBuffer);
    cap!(entries, registry, "project", Measure, GEOSProject);
    cap!(entries, registry, "project_normalized", Measure, GEOSProjectNormalized);
    cap!(entries, registry, "interpolate", GeomDouble, GEOSInterpolate);
    cap!(entries, registry, "interpolate_normalized", GeomDouble, GEOSInterpolateNormalized);
}

fn extend_330(entries: &mut HashMap<&'static str, Capability>, registry: &Registry) {
    cap!(entries, registry, "unary_union", GeomUnary, GEOSUnaryUnion);
    // 3.3 re-points the cascaded form at the unary union entry point
    if let Some(binding) = registry.GEOSUnaryUnion {
        entries.insert("cascaded_union", Capability::GeomUnary(binding));
    }
}

pub(crate) unsafe fn call_geom_unary(
    ctx: GEOSContextHandle_t,
    binding: Binding<GeomUnaryFn, GeomUnaryFnR>,
    g: *const GEOSGeometry,
) -> *mut GEOSGeometry {
    match binding {
        Binding::Plain(f) => f(g),
        Binding::Reentrant(f) => f(ctx, g),
    }
}

pub(crate) unsafe fn call_geom_binary(
    ctx: GEOSContextHandle_t,
    binding: Binding<GeomBinaryFn, GeomBinaryFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
) -> *mut GEOSGeometry {
    match binding {
        Binding::Plain(f) => f(a, b),
        Binding::Reentrant(f) => f(ctx, a, b),
    }
}

pub(crate) unsafe fn call_geom_double(
    ctx: GEOSContextHandle_t,
    binding: Binding<GeomDoubleFn, GeomDoubleFnR>,
    g: *const GEOSGeometry,
    value: c_double,
) -> *mut GEOSGeometry {
    match binding {
        Binding::Plain(f) => f(g, value),
        Binding::Reentrant(f) => f(ctx, g, value),
    }
}

pub(crate) unsafe fn call_geom_buffer(
    ctx: GEOSContextHandle_t,
    binding: Binding<GeomBufferFn, GeomBufferFnR>,
    g: *const GEOSGeometry,
    width: c_double,
    quadsegs: c_int,
) -> *mut GEOSGeometry {
    match binding {
        Binding::Plain(f) => f(g, width, quadsegs),
        Binding::Reentrant(f) => f(ctx, g, width, quadsegs),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn call_geom_offset(
    ctx: GEOSContextHandle_t,
    binding: Binding<GeomOffsetFn, GeomOffsetFnR>,
    g: *const GEOSGeometry,
    width: c_double,
    quadsegs: c_int,
    join_style: c_int,
    mitre_limit: c_double,
    left_side: c_int,
) -> *mut GEOSGeometry {
    match binding {
        Binding::Plain(f) => f(g, width, quadsegs, join_style, mitre_limit, left_side),
        Binding::Reentrant(f) => f(ctx, g, width, quadsegs, join_style, mitre_limit, left_side),
    }
}

pub(crate) unsafe fn call_predicate_unary(
    ctx: GEOSContextHandle_t,
    binding: Binding<PredicateUnaryFn, PredicateUnaryFnR>,
    g: *const GEOSGeometry,
) -> c_char {
    match binding {
        Binding::Plain(f) => f(g),
        Binding::Reentrant(f) => f(ctx, g),
    }
}

pub(crate) unsafe fn call_predicate_binary(
    ctx: GEOSContextHandle_t,
    binding: Binding<PredicateBinaryFn, PredicateBinaryFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
) -> c_char {
    match binding {
        Binding::Plain(f) => f(a, b),
        Binding::Reentrant(f) => f(ctx, a, b),
    }
}

pub(crate) unsafe fn call_predicate_exact(
    ctx: GEOSContextHandle_t,
    binding: Binding<PredicateExactFn, PredicateExactFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
    tolerance: c_double,
) -> c_char {
    match binding {
        Binding::Plain(f) => f(a, b, tolerance),
        Binding::Reentrant(f) => f(ctx, a, b, tolerance),
    }
}

pub(crate) unsafe fn call_predicate_prepared(
    ctx: GEOSContextHandle_t,
    binding: Binding<PredicatePreparedFn, PredicatePreparedFnR>,
    p: *const GEOSPreparedGeometry,
    g: *const GEOSGeometry,
) -> c_char {
    match binding {
        Binding::Plain(f) => f(p, g),
        Binding::Reentrant(f) => f(ctx, p, g),
    }
}

pub(crate) unsafe fn call_scalar_unary(
    ctx: GEOSContextHandle_t,
    binding: Binding<ScalarUnaryFn, ScalarUnaryFnR>,
    g: *const GEOSGeometry,
    out: *mut c_double,
) -> c_int {
    match binding {
        Binding::Plain(f) => f(g, out),
        Binding::Reentrant(f) => f(ctx, g, out),
    }
}

pub(crate) unsafe fn call_scalar_binary(
    ctx: GEOSContextHandle_t,
    binding: Binding<ScalarBinaryFn, ScalarBinaryFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
    out: *mut c_double,
) -> c_int {
    match binding {
        Binding::Plain(f) => f(a, b, out),
        Binding::Reentrant(f) => f(ctx, a, b, out),
    }
}

pub(crate) unsafe fn call_measure(
    ctx: GEOSContextHandle_t,
    binding: Binding<MeasureFn, MeasureFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
) -> c_double {
    match binding {
        Binding::Plain(f) => f(a, b),
        Binding::Reentrant(f) => f(ctx, a, b),
    }
}

pub(crate) unsafe fn call_text_unary(
    ctx: GEOSContextHandle_t,
    binding: Binding<TextUnaryFn, TextUnaryFnR>,
    g: *const GEOSGeometry,
) -> *mut c_char {
    match binding {
        Binding::Plain(f) => f(g),
        Binding::Reentrant(f) => f(ctx, g),
    }
}

pub(crate) unsafe fn call_text_binary(
    ctx: GEOSContextHandle_t,
    binding: Binding<TextBinaryFn, TextBinaryFnR>,
    a: *const GEOSGeometry,
    b: *const GEOSGeometry,
) -> *mut c_char {
    match binding {
        Binding::Plain(f) => f(a, b),
        Binding::Reentrant(f) => f(ctx, a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::ptr::null_mut;

    unsafe extern "C" fn geom_unary_stub(_g: *const GEOSGeometry) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn geom_unary_stub_alt(_g: *const GEOSGeometry) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn geom_binary_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
    ) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn geom_double_stub(
        _g: *const GEOSGeometry,
        _v: c_double,
    ) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn geom_buffer_stub(
        _g: *const GEOSGeometry,
        _w: c_double,
        _q: c_int,
    ) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn geom_offset_stub(
        _g: *const GEOSGeometry,
        _w: c_double,
        _q: c_int,
        _j: c_int,
        _m: c_double,
        _l: c_int,
    ) -> *mut GEOSGeometry {
        null_mut()
    }
    unsafe extern "C" fn pred_unary_stub(_g: *const GEOSGeometry) -> c_char {
        0
    }
    unsafe extern "C" fn pred_binary_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
    ) -> c_char {
        0
    }
    unsafe extern "C" fn pred_exact_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
        _t: c_double,
    ) -> c_char {
        0
    }
    unsafe extern "C" fn pred_prepared_stub(
        _p: *const GEOSPreparedGeometry,
        _g: *const GEOSGeometry,
    ) -> c_char {
        0
    }
    unsafe extern "C" fn scalar_unary_stub(_g: *const GEOSGeometry, _o: *mut c_double) -> c_int {
        1
    }
    unsafe extern "C" fn scalar_binary_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
        _o: *mut c_double,
    ) -> c_int {
        1
    }
    unsafe extern "C" fn measure_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
    ) -> c_double {
        0.0
    }
    unsafe extern "C" fn text_unary_stub(_g: *const GEOSGeometry) -> *mut c_char {
        null_mut()
    }
    unsafe extern "C" fn text_binary_stub(
        _a: *const GEOSGeometry,
        _b: *const GEOSGeometry,
    ) -> *mut c_char {
        null_mut()
    }

    /// A registry shaped like a fully-featured library build.
    fn full_registry() -> Registry {
        let mut r = Registry::default();

        let gu = Some(Binding::Plain(geom_unary_stub as GeomUnaryFn));
        let gb = Some(Binding::Plain(geom_binary_stub as GeomBinaryFn));
        let gd = Some(Binding::Plain(geom_double_stub as GeomDoubleFn));
        let pu = Some(Binding::Plain(pred_unary_stub as PredicateUnaryFn));
        let pb = Some(Binding::Plain(pred_binary_stub as PredicateBinaryFn));
        let pp = Some(Binding::Plain(pred_prepared_stub as PredicatePreparedFn));
        let su = Some(Binding::Plain(scalar_unary_stub as ScalarUnaryFn));
        let ms = Some(Binding::Plain(measure_stub as MeasureFn));

        r.GEOSArea = su;
        r.GEOSLength = su;
        r.GEOSDistance = Some(Binding::Plain(scalar_binary_stub as ScalarBinaryFn));
        r.GEOSBoundary = gu;
        r.GEOSGetCentroid = gu;
        r.GEOSPointOnSurface = gu;
        r.GEOSConvexHull = gu;
        r.GEOSEnvelope = gu;
        r.GEOSBuffer = Some(Binding::Plain(geom_buffer_stub as GeomBufferFn));
        r.GEOSSimplify = gd;
        r.GEOSTopologyPreserveSimplify = gd;
        r.GEOSHasZ = pu;
        r.GEOSisEmpty = pu;
        r.GEOSisRing = pu;
        r.GEOSisSimple = pu;
        r.GEOSisValid = pu;
        r.GEOSDisjoint = pb;
        r.GEOSTouches = pb;
        r.GEOSIntersects = pb;
        r.GEOSCrosses = pb;
        r.GEOSWithin = pb;
        r.GEOSContains = pb;
        r.GEOSOverlaps = pb;
        r.GEOSEquals = pb;
        r.GEOSEqualsExact = Some(Binding::Plain(pred_exact_stub as PredicateExactFn));
        r.GEOSRelate = Some(Binding::Plain(text_binary_stub as TextBinaryFn));
        r.GEOSDifference = gb;
        r.GEOSSymDifference = gb;
        r.GEOSUnion = gb;
        r.GEOSIntersection = gb;

        r.GEOSPreparedIntersects = pp;
        r.GEOSPreparedContains = pp;
        r.GEOSPreparedContainsProperly = pp;
        r.GEOSPreparedCovers = pp;
        r.GEOSisValidReason = Some(Binding::Plain(text_unary_stub as TextUnaryFn));
        r.GEOSUnionCascaded = Some(Binding::Plain(geom_unary_stub_alt as GeomUnaryFn));

        r.GEOSSingleSidedBuffer = Some(Binding::Plain(geom_offset_stub as GeomOffsetFn));
        r.GEOSProject = ms;
        r.GEOSProjectNormalized = ms;
        r.GEOSInterpolate = gd;
        r.GEOSInterpolateNormalized = gd;

        r.GEOSUnaryUnion = gu;
        r
    }

    fn names(table: &CapabilityTable) -> HashSet<&'static str> {
        table.operation_names().collect()
    }

    #[test]
    fn test_capability_sets_grow_monotonically() {
        let registry = full_registry();
        let versions = [
            VersionTriple::new(3, 0, 0),
            VersionTriple::new(3, 1, 0),
            VersionTriple::new(3, 2, 0),
            VersionTriple::new(3, 3, 0),
        ];

        let mut previous: Option<HashSet<&'static str>> = None;
        for v in versions.iter() {
            let table = CapabilityTable::build(&registry, *v);
            let current = names(&table);
            if let Some(prev) = previous {
                assert!(
                    prev.is_subset(&current),
                    "capabilities shrank between tiers at {}",
                    v
                );
                assert!(current.len() > prev.len());
            }
            previous = Some(current);
        }
    }

    #[test]
    fn test_legacy_tier_lacks_prepared_predicates() {
        let registry = full_registry();
        let table = CapabilityTable::build(&registry, VersionTriple::new(3, 0, 0));

        assert!(!table.contains("prepared_contains"));
        match table.get("prepared_contains") {
            Err(Error::Unsupported { operation, version }) => {
                assert_eq!(operation, "prepared_contains");
                assert_eq!(version, VersionTriple::new(3, 0, 0));
            }
            other => panic!("expected Unsupported, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_cascaded_union_aliases_unary_union_at_330() {
        let registry = full_registry();

        let table = CapabilityTable::build(&registry, VersionTriple::new(3, 3, 0));
        assert_eq!(
            table.get("unary_union").unwrap(),
            table.get("cascaded_union").unwrap()
        );

        // At 3.1 the cascaded form is still its own entry point
        let table = CapabilityTable::build(&registry, VersionTriple::new(3, 1, 0));
        assert!(!table.contains("unary_union"));
        assert_eq!(
            table.get("cascaded_union").unwrap(),
            Capability::GeomUnary(Binding::Plain(geom_unary_stub_alt as GeomUnaryFn))
        );
    }

    #[test]
    fn test_probed_symbols_absent_from_table() {
        let mut registry = full_registry();
        registry.GEOSProject = None;
        registry.GEOSProjectNormalized = None;
        registry.GEOSInterpolate = None;
        registry.GEOSInterpolateNormalized = None;
        registry.GEOSSingleSidedBuffer = None;

        let table = CapabilityTable::build(&registry, VersionTriple::new(3, 2, 0));
        assert!(!table.contains("project"));
        assert!(!table.contains("parallel_offset"));
        // the rest of the 3.2 surface is unaffected
        assert!(table.contains("prepared_covers"));
    }

    #[test]
    fn test_reentrant_invocation_prepends_context() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static SEEN_CTX: AtomicUsize = AtomicUsize::new(0);

        unsafe extern "C" fn reentrant_stub(
            ctx: GEOSContextHandle_t,
            _g: *const GEOSGeometry,
        ) -> *mut GEOSGeometry {
            SEEN_CTX.store(ctx as usize, Ordering::SeqCst);
            null_mut()
        }

        let sentinel = 0x5eed_usize;
        let binding: Binding<GeomUnaryFn, GeomUnaryFnR> =
            Binding::Reentrant(reentrant_stub as GeomUnaryFnR);
        unsafe {
            call_geom_unary(sentinel as GEOSContextHandle_t, binding, std::ptr::null());
        }
        assert_eq!(SEEN_CTX.load(Ordering::SeqCst), sentinel);
    }
}
