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
use std::os::raw::{c_double, c_uint};
use std::ptr;

use lgeos_sys::{Binding, GEOSCoordSequence};

use crate::error::{Error, Result};
use crate::proxy::{geos_call, Lgeos};

/// A native coordinate sequence.
///
/// Owned when created here, borrowed when viewed through a geometry; only
/// owned sequences are destroyed on drop, and ownership transfers to the
/// library when a geometry is built from one.
pub struct CoordSequence<'l> {
    pub(crate) c_handle: *mut GEOSCoordSequence,
    owned: bool,
    lgeos: &'l Lgeos,
}

impl<'l> CoordSequence<'l> {
    pub fn create(lgeos: &'l Lgeos, size: u32, dims: u32) -> Result<CoordSequence<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSCoordSeq_create(size, dims)) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSCoordSeq_create"));
        }
        Ok(CoordSequence {
            c_handle: raw,
            owned: true,
            lgeos,
        })
    }

    pub(crate) fn borrowed(lgeos: &'l Lgeos, raw: *const GEOSCoordSequence) -> CoordSequence<'l> {
        CoordSequence {
            c_handle: raw as *mut GEOSCoordSequence,
            owned: false,
            lgeos,
        }
    }

    /// Hand the sequence over to a geometry constructor, which takes over
    /// destruction.
    pub(crate) fn release(mut self) -> *mut GEOSCoordSequence {
        self.owned = false;
        self.c_handle
    }

    fn checked(&self, status: i32, method: &'static str) -> Result<()> {
        if status != 1 {
            return Err(Error::Call(method));
        }
        Ok(())
    }

    pub fn set_x(&mut self, idx: u32, value: f64) -> Result<()> {
        let status = unsafe { geos_call!(self.lgeos, GEOSCoordSeq_setX(self.c_handle, idx, value)) };
        self.checked(status, "GEOSCoordSeq_setX")
    }

    pub fn set_y(&mut self, idx: u32, value: f64) -> Result<()> {
        let status = unsafe { geos_call!(self.lgeos, GEOSCoordSeq_setY(self.c_handle, idx, value)) };
        self.checked(status, "GEOSCoordSeq_setY")
    }

    pub fn set_z(&mut self, idx: u32, value: f64) -> Result<()> {
        let status = unsafe { geos_call!(self.lgeos, GEOSCoordSeq_setZ(self.c_handle, idx, value)) };
        self.checked(status, "GEOSCoordSeq_setZ")
    }

    /// Write one coordinate tuple. The x ordinate must reach the library
    /// before y (and y before z): some GEOS versions reorganize the
    /// underlying storage on first write and lose ordinates written out of
    /// order.
    pub fn set_point(&mut self, idx: u32, x: f64, y: f64) -> Result<()> {
        self.set_x(idx, x)?;
        self.set_y(idx, y)
    }

    pub fn set_point_3d(&mut self, idx: u32, x: f64, y: f64, z: f64) -> Result<()> {
        self.set_x(idx, x)?;
        self.set_y(idx, y)?;
        self.set_z(idx, z)
    }

    fn get_ordinate(
        &self,
        idx: u32,
        getter: Option<
            Binding<
                unsafe extern "C" fn(*const GEOSCoordSequence, c_uint, *mut c_double) -> i32,
                unsafe extern "C" fn(
                    lgeos_sys::GEOSContextHandle_t,
                    *const GEOSCoordSequence,
                    c_uint,
                    *mut c_double,
                ) -> i32,
            >,
        >,
        method: &'static str,
    ) -> Result<f64> {
        let binding = getter.ok_or_else(|| Error::Unsupported {
            operation: method.to_string(),
            version: self.lgeos.version_triple(),
        })?;
        let mut out: c_double = 0.0;
        let status = unsafe {
            match binding {
                Binding::Plain(f) => f(self.c_handle, idx, &mut out),
                Binding::Reentrant(f) => {
                    f(self.lgeos.context_handle(), self.c_handle, idx, &mut out)
                }
            }
        };
        self.checked(status, method)?;
        Ok(out)
    }

    pub fn get_x(&self, idx: u32) -> Result<f64> {
        self.get_ordinate(idx, self.lgeos.registry.GEOSCoordSeq_getX, "GEOSCoordSeq_getX")
    }

    pub fn get_y(&self, idx: u32) -> Result<f64> {
        self.get_ordinate(idx, self.lgeos.registry.GEOSCoordSeq_getY, "GEOSCoordSeq_getY")
    }

    pub fn get_z(&self, idx: u32) -> Result<f64> {
        self.get_ordinate(idx, self.lgeos.registry.GEOSCoordSeq_getZ, "GEOSCoordSeq_getZ")
    }

    pub fn size(&self) -> Result<u32> {
        let mut out: c_uint = 0;
        let status =
            unsafe { geos_call!(self.lgeos, GEOSCoordSeq_getSize(self.c_handle, &mut out)) };
        self.checked(status, "GEOSCoordSeq_getSize")?;
        Ok(out)
    }

    pub fn dimensions(&self) -> Result<u32> {
        let mut out: c_uint = 0;
        let status =
            unsafe { geos_call!(self.lgeos, GEOSCoordSeq_getDimensions(self.c_handle, &mut out)) };
        self.checked(status, "GEOSCoordSeq_getDimensions")?;
        Ok(out)
    }

    pub fn points(&self) -> Result<PointIterator<'_, 'l>> {
        Ok(PointIterator {
            seq: self,
            index: 0,
            size: self.size()?,
        })
    }
}

impl Drop for CoordSequence<'_> {
    fn drop(&mut self) {
        if !self.owned || self.c_handle.is_null() {
            return;
        }
        if let Some(binding) = self.lgeos.registry.GEOSCoordSeq_destroy {
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

/// Iterates the (x, y) tuples of a sequence.
pub struct PointIterator<'a, 'l> {
    seq: &'a CoordSequence<'l>,
    index: u32,
    size: u32,
}

impl Iterator for PointIterator<'_, '_> {
    type Item = Result<(f64, f64)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.size {
            return None;
        }
        let idx = self.index;
        self.index += 1;
        let x = match self.seq.get_x(idx) {
            Ok(x) => x,
            Err(e) => return Some(Err(e)),
        };
        let y = match self.seq.get_y(idx) {
            Ok(y) => y,
            Err(e) => return Some(Err(e)),
        };
        Some(Ok((x, y)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.size - self.index) as usize;
        (remaining, Some(remaining))
    }
}
