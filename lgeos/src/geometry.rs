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
//! Owned handle to a native geometry, with operations routed through the
//! capability table.
//!
//! The table is keyed by abstract operation name, so a method like
//! [`Geometry::cascaded_union`] does not know (or care) which native entry
//! point the detected version bound for it.

use std::os::raw::c_double;
use std::ptr;

use lgeos_sys::{Binding, GEOSGeometry};

use crate::capability::{
    call_geom_binary, call_geom_buffer, call_geom_double, call_geom_offset, call_geom_unary,
    call_measure, call_predicate_binary, call_predicate_exact, call_predicate_unary,
    call_scalar_binary, call_scalar_unary, call_text_binary, call_text_unary, Capability,
};
use crate::coord_seq::CoordSequence;
use crate::enums::GeometryTypes;
use crate::error::{Error, Result};
use crate::proxy::{check_geos_predicate, geos_call, Lgeos};

pub struct Geometry<'l> {
    pub(crate) c_handle: *mut GEOSGeometry,
    owned: bool,
    pub(crate) lgeos: &'l Lgeos,
}

impl<'l> Geometry<'l> {
    /// Wrap a native pointer this object is responsible for destroying.
    pub(crate) fn managed(
        lgeos: &'l Lgeos,
        raw: *mut GEOSGeometry,
        method: &'static str,
    ) -> Result<Geometry<'l>> {
        if raw.is_null() {
            return Err(Error::NullPointer(method));
        }
        Ok(Geometry {
            c_handle: raw,
            owned: true,
            lgeos,
        })
    }

    /// As [`Geometry::managed`], but null means the operation itself failed
    /// on valid input rather than a lifecycle error.
    fn topology_result(
        lgeos: &'l Lgeos,
        raw: *mut GEOSGeometry,
        operation: &'static str,
    ) -> Result<Geometry<'l>> {
        if raw.is_null() {
            return Err(Error::Topology(operation));
        }
        Ok(Geometry {
            c_handle: raw,
            owned: true,
            lgeos,
        })
    }

    /// Wrap a pointer owned by the native parent geometry (for example a
    /// collection member); never destroyed on drop.
    fn borrowed(lgeos: &'l Lgeos, raw: *const GEOSGeometry) -> Geometry<'l> {
        Geometry {
            c_handle: raw as *mut GEOSGeometry,
            owned: false,
            lgeos,
        }
    }

    pub(crate) fn as_raw(&self) -> *const GEOSGeometry {
        self.c_handle
    }

    pub fn clone_native(&self) -> Result<Geometry<'l>> {
        let raw = unsafe { geos_call!(self.lgeos, GEOSGeom_clone(self.c_handle)) };
        Geometry::managed(self.lgeos, raw, "GEOSGeom_clone")
    }

    // ---- capability dispatch ----

    fn unary_topology(&self, operation: &'static str) -> Result<Geometry<'l>> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::GeomUnary(binding) => {
                let raw = unsafe {
                    call_geom_unary(self.lgeos.context_handle(), binding, self.c_handle)
                };
                Geometry::topology_result(self.lgeos, raw, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    fn binary_topology(
        &self,
        other: &Geometry,
        operation: &'static str,
    ) -> Result<Geometry<'l>> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::GeomBinary(binding) => {
                let raw = unsafe {
                    call_geom_binary(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                    )
                };
                Geometry::topology_result(self.lgeos, raw, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    fn double_topology(&self, value: f64, operation: &'static str) -> Result<Geometry<'l>> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::GeomDouble(binding) => {
                let raw = unsafe {
                    call_geom_double(self.lgeos.context_handle(), binding, self.c_handle, value)
                };
                Geometry::topology_result(self.lgeos, raw, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    fn unary_predicate(&self, operation: &'static str) -> Result<bool> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::PredicateUnary(binding) => {
                let value = unsafe {
                    call_predicate_unary(self.lgeos.context_handle(), binding, self.c_handle)
                };
                check_geos_predicate(value, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    fn binary_predicate(&self, other: &Geometry, operation: &'static str) -> Result<bool> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::PredicateBinary(binding) => {
                let value = unsafe {
                    call_predicate_binary(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                    )
                };
                check_geos_predicate(value, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    fn unary_scalar(&self, operation: &'static str) -> Result<f64> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::ScalarUnary(binding) => {
                let mut out: c_double = 0.0;
                let status = unsafe {
                    call_scalar_unary(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        &mut out,
                    )
                };
                if status != 1 {
                    return Err(Error::Call(operation));
                }
                Ok(out)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    // ---- constructive operations ----

    pub fn boundary(&self) -> Result<Geometry<'l>> {
        self.unary_topology("boundary")
    }

    pub fn centroid(&self) -> Result<Geometry<'l>> {
        self.unary_topology("centroid")
    }

    /// A point guaranteed to lie on the geometry (unlike the centroid).
    pub fn representative_point(&self) -> Result<Geometry<'l>> {
        self.unary_topology("representative_point")
    }

    pub fn convex_hull(&self) -> Result<Geometry<'l>> {
        self.unary_topology("convex_hull")
    }

    pub fn envelope(&self) -> Result<Geometry<'l>> {
        self.unary_topology("envelope")
    }

    pub fn buffer(&self, width: f64, quadsegs: i32) -> Result<Geometry<'l>> {
        let operation = "buffer";
        match self.lgeos.capabilities().get(operation)? {
            Capability::GeomBuffer(binding) => {
                let raw = unsafe {
                    call_geom_buffer(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        width,
                        quadsegs,
                    )
                };
                Geometry::topology_result(self.lgeos, raw, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    pub fn parallel_offset(
        &self,
        width: f64,
        quadsegs: i32,
        join_style: i32,
        mitre_limit: f64,
        left_side: bool,
    ) -> Result<Geometry<'l>> {
        let operation = "parallel_offset";
        match self.lgeos.capabilities().get(operation)? {
            Capability::GeomOffset(binding) => {
                let raw = unsafe {
                    call_geom_offset(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        width,
                        quadsegs,
                        join_style,
                        mitre_limit,
                        left_side as i32,
                    )
                };
                Geometry::topology_result(self.lgeos, raw, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    pub fn simplify(&self, tolerance: f64) -> Result<Geometry<'l>> {
        self.double_topology(tolerance, "simplify")
    }

    pub fn topology_preserve_simplify(&self, tolerance: f64) -> Result<Geometry<'l>> {
        self.double_topology(tolerance, "topology_preserve_simplify")
    }

    pub fn interpolate(&self, distance: f64) -> Result<Geometry<'l>> {
        self.double_topology(distance, "interpolate")
    }

    pub fn interpolate_normalized(&self, fraction: f64) -> Result<Geometry<'l>> {
        self.double_topology(fraction, "interpolate_normalized")
    }

    pub fn intersection(&self, other: &Geometry) -> Result<Geometry<'l>> {
        self.binary_topology(other, "intersection")
    }

    pub fn difference(&self, other: &Geometry) -> Result<Geometry<'l>> {
        self.binary_topology(other, "difference")
    }

    pub fn symmetric_difference(&self, other: &Geometry) -> Result<Geometry<'l>> {
        self.binary_topology(other, "symmetric_difference")
    }

    pub fn union(&self, other: &Geometry) -> Result<Geometry<'l>> {
        self.binary_topology(other, "union")
    }

    pub fn unary_union(&self) -> Result<Geometry<'l>> {
        self.unary_topology("unary_union")
    }

    /// Union of the members of a collection. From 3.3 this dispatches to
    /// the same native entry point as [`Geometry::unary_union`].
    pub fn cascaded_union(&self) -> Result<Geometry<'l>> {
        self.unary_topology("cascaded_union")
    }

    // ---- predicates ----

    pub fn is_empty(&self) -> Result<bool> {
        self.unary_predicate("is_empty")
    }

    pub fn is_valid(&self) -> Result<bool> {
        self.unary_predicate("is_valid")
    }

    pub fn is_simple(&self) -> Result<bool> {
        self.unary_predicate("is_simple")
    }

    pub fn is_ring(&self) -> Result<bool> {
        self.unary_predicate("is_ring")
    }

    pub fn has_z(&self) -> Result<bool> {
        self.unary_predicate("has_z")
    }

    pub fn disjoint(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "disjoint")
    }

    pub fn touches(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "touches")
    }

    pub fn intersects(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "intersects")
    }

    pub fn crosses(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "crosses")
    }

    pub fn within(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "within")
    }

    pub fn contains(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "contains")
    }

    pub fn overlaps(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "overlaps")
    }

    pub fn equals(&self, other: &Geometry) -> Result<bool> {
        self.binary_predicate(other, "equals")
    }

    pub fn equals_exact(&self, other: &Geometry, tolerance: f64) -> Result<bool> {
        let operation = "equals_exact";
        match self.lgeos.capabilities().get(operation)? {
            Capability::PredicateExact(binding) => {
                let value = unsafe {
                    call_predicate_exact(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                        tolerance,
                    )
                };
                check_geos_predicate(value, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    /// The DE-9IM intersection matrix of the two geometries.
    pub fn relate(&self, other: &Geometry) -> Result<String> {
        let operation = "relate";
        match self.lgeos.capabilities().get(operation)? {
            Capability::TextBinary(binding) => {
                let raw = unsafe {
                    call_text_binary(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                    )
                };
                unsafe { self.lgeos.managed_string(raw, operation) }
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    pub fn is_valid_reason(&self) -> Result<String> {
        let operation = "is_valid_reason";
        match self.lgeos.capabilities().get(operation)? {
            Capability::TextUnary(binding) => {
                let raw = unsafe {
                    call_text_unary(self.lgeos.context_handle(), binding, self.c_handle)
                };
                unsafe { self.lgeos.managed_string(raw, operation) }
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    // ---- scalar measures ----

    pub fn area(&self) -> Result<f64> {
        self.unary_scalar("area")
    }

    pub fn length(&self) -> Result<f64> {
        self.unary_scalar("length")
    }

    pub fn distance(&self, other: &Geometry) -> Result<f64> {
        let operation = "distance";
        match self.lgeos.capabilities().get(operation)? {
            Capability::ScalarBinary(binding) => {
                let mut out: c_double = 0.0;
                let status = unsafe {
                    call_scalar_binary(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                        &mut out,
                    )
                };
                if status != 1 {
                    return Err(Error::Call(operation));
                }
                Ok(out)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    /// Distance along this line to the point nearest `point`.
    pub fn project(&self, point: &Geometry) -> Result<f64> {
        self.measure(point, "project")
    }

    pub fn project_normalized(&self, point: &Geometry) -> Result<f64> {
        self.measure(point, "project_normalized")
    }

    fn measure(&self, other: &Geometry, operation: &'static str) -> Result<f64> {
        match self.lgeos.capabilities().get(operation)? {
            Capability::Measure(binding) => {
                let out = unsafe {
                    call_measure(
                        self.lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.c_handle,
                    )
                };
                if out < 0.0 {
                    return Err(Error::Call(operation));
                }
                Ok(out)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    // ---- accessors ----

    pub fn geometry_type(&self) -> Result<String> {
        let raw = unsafe { geos_call!(self.lgeos, GEOSGeomType(self.c_handle)) };
        unsafe { self.lgeos.managed_string(raw, "GEOSGeomType") }
    }

    pub fn type_id(&self) -> Result<GeometryTypes> {
        let id = unsafe { geos_call!(self.lgeos, GEOSGeomTypeId(self.c_handle)) };
        Ok(GeometryTypes::from(id))
    }

    pub fn srid(&self) -> Result<i32> {
        let srid = unsafe { geos_call!(self.lgeos, GEOSGetSRID(self.c_handle)) };
        Ok(srid)
    }

    pub fn set_srid(&mut self, srid: i32) -> Result<()> {
        unsafe { geos_call!(self.lgeos, GEOSSetSRID(self.c_handle, srid)) };
        Ok(())
    }

    /// Topological dimension: 0 for points, 1 for curves, 2 for surfaces.
    /// Coordinate dimensionality lives on the coordinate sequence
    /// ([`CoordSequence::dimensions`]).
    pub fn dimensions(&self) -> Result<i32> {
        let dims = unsafe { geos_call!(self.lgeos, GEOSGeom_getDimensions(self.c_handle)) };
        Ok(dims)
    }

    pub fn num_coordinates(&self) -> Result<usize> {
        let n = unsafe { geos_call!(self.lgeos, GEOSGetNumCoordinates(self.c_handle)) };
        if n < 0 {
            return Err(Error::Call("GEOSGetNumCoordinates"));
        }
        Ok(n as usize)
    }

    pub fn num_geometries(&self) -> Result<usize> {
        let n = unsafe { geos_call!(self.lgeos, GEOSGetNumGeometries(self.c_handle)) };
        if n < 0 {
            return Err(Error::Call("GEOSGetNumGeometries"));
        }
        Ok(n as usize)
    }

    /// The nth member of a collection; borrows from this geometry.
    pub fn geometry_n(&self, n: usize) -> Result<Geometry<'l>> {
        let raw = unsafe { geos_call!(self.lgeos, GEOSGetGeometryN(self.c_handle, n as i32)) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSGetGeometryN"));
        }
        Ok(Geometry::borrowed(self.lgeos, raw))
    }

    /// Read-only view of the coordinate sequence. Only defined for points,
    /// line strings and linear rings.
    pub fn coord_seq(&self) -> Result<CoordSequence<'l>> {
        let raw = unsafe { geos_call!(self.lgeos, GEOSGeom_getCoordSeq(self.c_handle)) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSGeom_getCoordSeq"));
        }
        Ok(CoordSequence::borrowed(self.lgeos, raw))
    }
}

impl Drop for Geometry<'_> {
    fn drop(&mut self) {
        if !self.owned || self.c_handle.is_null() {
            return;
        }
        if let Some(binding) = self.lgeos.registry.GEOSGeom_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(self.lgeos.context_handle(), self.c_handle),
                }
            }
        }
        self.c_handle = ptr::null_mut();
    }
}
