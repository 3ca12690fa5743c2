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
use std::ffi::CString;

use lgeos_sys::{Binding, GEOSWKTReader, GEOSWKTWriter};

use crate::enums::OutputDimension;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::proxy::{geos_call, geos_call_opt, Lgeos};

pub struct WKTReader<'l> {
    c_handle: *mut GEOSWKTReader,
    lgeos: &'l Lgeos,
}

impl<'l> WKTReader<'l> {
    pub fn new(lgeos: &'l Lgeos) -> Result<WKTReader<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSWKTReader_create()) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKTReader_create"));
        }
        Ok(WKTReader {
            c_handle: raw,
            lgeos,
        })
    }

    pub fn read(&self, wkt: &str) -> Result<Geometry<'l>> {
        let c_wkt = CString::new(wkt)?;
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTReader_read(self.c_handle, c_wkt.as_ptr())
            )
        };
        if raw.is_null() {
            return Err(Error::Reading { format: "WKT" });
        }
        Geometry::managed(self.lgeos, raw, "GEOSWKTReader_read")
    }
}

impl Drop for WKTReader<'_> {
    fn drop(&mut self) {
        if let Some(binding) = self.lgeos.registry.GEOSWKTReader_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(self.lgeos.context_handle(), self.c_handle),
                }
            }
        }
    }
}

/// Writes geometries as WKT.
///
/// On GEOS 3.3 and later new writers are configured for trimmed output and
/// three output dimensions, overriding the library's padded, 2-D defaults;
/// older versions have no writer settings at all and always trim.
pub struct WKTWriter<'l> {
    c_handle: *mut GEOSWKTWriter,
    lgeos: &'l Lgeos,
}

impl<'l> WKTWriter<'l> {
    pub fn new(lgeos: &'l Lgeos) -> Result<WKTWriter<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSWKTWriter_create()) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKTWriter_create"));
        }
        unsafe {
            geos_call_opt!(lgeos, GEOSWKTWriter_setTrim(raw, 1));
            geos_call_opt!(lgeos, GEOSWKTWriter_setOutputDimension(raw, 3));
        }
        Ok(WKTWriter {
            c_handle: raw,
            lgeos,
        })
    }

    pub fn write(&self, geometry: &Geometry) -> Result<String> {
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTWriter_write(self.c_handle, geometry.as_raw())
            )
        };
        unsafe { self.lgeos.managed_string(raw, "GEOSWKTWriter_write") }
    }

    pub fn set_trim(&mut self, trim: bool) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTWriter_setTrim(self.c_handle, trim as std::os::raw::c_char)
            )
        };
        Ok(())
    }

    pub fn set_rounding_precision(&mut self, precision: i32) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTWriter_setRoundingPrecision(self.c_handle, precision)
            )
        };
        Ok(())
    }

    pub fn set_output_dimension(&mut self, dimension: OutputDimension) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTWriter_setOutputDimension(self.c_handle, dimension.into())
            )
        };
        Ok(())
    }

    pub fn output_dimension(&self) -> Result<OutputDimension> {
        let dim = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKTWriter_getOutputDimension(self.c_handle)
            )
        };
        OutputDimension::try_from(dim)
            .ok_or(Error::Call("GEOSWKTWriter_getOutputDimension"))
    }
}

impl Drop for WKTWriter<'_> {
    fn drop(&mut self) {
        if let Some(binding) = self.lgeos.registry.GEOSWKTWriter_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(self.lgeos.context_handle(), self.c_handle),
                }
            }
        }
    }
}
