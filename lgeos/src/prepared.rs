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
use lgeos_sys::{Binding, GEOSPreparedGeometry};

use crate::capability::{call_predicate_prepared, Capability};
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::proxy::{check_geos_predicate, geos_call};

/// An indexed form of a geometry for repeated predicate evaluation.
///
/// Borrows the source geometry; the native prepared structure references
/// the source and must not outlive it.
pub struct PreparedGeometry<'a, 'l> {
    c_handle: *const GEOSPreparedGeometry,
    source: &'a Geometry<'l>,
}

impl<'l> Geometry<'l> {
    pub fn prepare(&self) -> Result<PreparedGeometry<'_, 'l>> {
        let raw = unsafe { geos_call!(self.lgeos, GEOSPrepare(self.as_raw())) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSPrepare"));
        }
        Ok(PreparedGeometry {
            c_handle: raw,
            source: self,
        })
    }
}

impl PreparedGeometry<'_, '_> {
    fn predicate(&self, other: &Geometry, operation: &'static str) -> Result<bool> {
        let lgeos = self.source.lgeos;
        match lgeos.capabilities().get(operation)? {
            Capability::PredicatePrepared(binding) => {
                let value = unsafe {
                    call_predicate_prepared(
                        lgeos.context_handle(),
                        binding,
                        self.c_handle,
                        other.as_raw(),
                    )
                };
                check_geos_predicate(value, operation)
            }
            _ => Err(Error::CapabilityShape(operation)),
        }
    }

    pub fn intersects(&self, other: &Geometry) -> Result<bool> {
        self.predicate(other, "prepared_intersects")
    }

    pub fn contains(&self, other: &Geometry) -> Result<bool> {
        self.predicate(other, "prepared_contains")
    }

    pub fn contains_properly(&self, other: &Geometry) -> Result<bool> {
        self.predicate(other, "prepared_contains_properly")
    }

    pub fn covers(&self, other: &Geometry) -> Result<bool> {
        self.predicate(other, "prepared_covers")
    }
}

impl Drop for PreparedGeometry<'_, '_> {
    fn drop(&mut self) {
        let lgeos = self.source.lgeos;
        if let Some(binding) = lgeos.registry.GEOSPreparedGeom_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(lgeos.context_handle(), self.c_handle),
                }
            }
        }
    }
}
