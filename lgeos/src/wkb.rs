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
use std::os::raw::c_void;

use c_vec::CVec;
use lgeos_sys::{Binding, GEOSWKBReader, GEOSWKBWriter};

use crate::enums::{ByteOrder, OutputDimension};
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::proxy::{geos_call, Lgeos};

/// A WKB byte buffer still owned by the native library.
///
/// Frees itself through the library's deallocator, and keeps the proxy
/// borrowed so the library cannot be unloaded while the buffer (and the
/// deallocator pointer captured in its destructor) is alive.
pub struct WkbBuffer<'l> {
    data: CVec<u8>,
    _lgeos: &'l Lgeos,
}

impl WkbBuffer<'_> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }
}

impl AsRef<[u8]> for WkbBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data.as_ref()
    }
}

impl std::ops::Deref for WkbBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data.as_ref()
    }
}

pub struct WKBReader<'l> {
    c_handle: *mut GEOSWKBReader,
    lgeos: &'l Lgeos,
}

impl<'l> WKBReader<'l> {
    pub fn new(lgeos: &'l Lgeos) -> Result<WKBReader<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSWKBReader_create()) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKBReader_create"));
        }
        Ok(WKBReader {
            c_handle: raw,
            lgeos,
        })
    }

    pub fn read(&self, wkb: &[u8]) -> Result<Geometry<'l>> {
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBReader_read(self.c_handle, wkb.as_ptr(), wkb.len())
            )
        };
        if raw.is_null() {
            return Err(Error::Reading { format: "WKB" });
        }
        Geometry::managed(self.lgeos, raw, "GEOSWKBReader_read")
    }

    pub fn read_hex(&self, hex: &str) -> Result<Geometry<'l>> {
        let bytes = hex.as_bytes();
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBReader_readHEX(self.c_handle, bytes.as_ptr(), bytes.len())
            )
        };
        if raw.is_null() {
            return Err(Error::Reading { format: "HEX WKB" });
        }
        Geometry::managed(self.lgeos, raw, "GEOSWKBReader_readHEX")
    }
}

impl Drop for WKBReader<'_> {
    fn drop(&mut self) {
        if let Some(binding) = self.lgeos.registry.GEOSWKBReader_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(self.lgeos.context_handle(), self.c_handle),
                }
            }
        }
    }
}

/// Writes geometries as WKB bytes or their hex encoding.
///
/// New writers default to three output dimensions, overriding the
/// library's 2-D default so z ordinates survive a round trip.
pub struct WKBWriter<'l> {
    c_handle: *mut GEOSWKBWriter,
    lgeos: &'l Lgeos,
}

impl<'l> WKBWriter<'l> {
    pub fn new(lgeos: &'l Lgeos) -> Result<WKBWriter<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSWKBWriter_create()) };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKBWriter_create"));
        }
        unsafe {
            geos_call!(lgeos, GEOSWKBWriter_setOutputDimension(raw, 3));
        }
        Ok(WKBWriter {
            c_handle: raw,
            lgeos,
        })
    }

    /// The returned buffer stays owned by the native library and releases
    /// itself through the library's deallocator; it may outlive this
    /// writer but not the [`Lgeos`] it borrows.
    pub fn write(&self, geometry: &Geometry) -> Result<WkbBuffer<'l>> {
        let mut size: libc::size_t = 0;
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_write(self.c_handle, geometry.as_raw(), &mut size)
            )
        };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKBWriter_write"));
        }
        let free_fn = self.lgeos.free_fn();
        let data = unsafe {
            CVec::new_with_dtor(raw, size, move |base| {
                free_fn.free(base as *mut c_void);
            })
        };
        Ok(WkbBuffer {
            data,
            _lgeos: self.lgeos,
        })
    }

    pub fn write_hex(&self, geometry: &Geometry) -> Result<String> {
        let mut size: libc::size_t = 0;
        let raw = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_writeHEX(self.c_handle, geometry.as_raw(), &mut size)
            )
        };
        if raw.is_null() {
            return Err(Error::NullPointer("GEOSWKBWriter_writeHEX"));
        }
        let hex = unsafe {
            let text = std::str::from_utf8(std::slice::from_raw_parts(raw, size))
                .map(String::from);
            self.lgeos.free_fn().free(raw as *mut c_void);
            text?
        };
        Ok(hex)
    }

    pub fn output_dimension(&self) -> Result<OutputDimension> {
        let dim = unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_getOutputDimension(self.c_handle)
            )
        };
        OutputDimension::try_from(dim)
            .ok_or(Error::Call("GEOSWKBWriter_getOutputDimension"))
    }

    pub fn set_output_dimension(&mut self, dimension: OutputDimension) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_setOutputDimension(self.c_handle, dimension.into())
            )
        };
        Ok(())
    }

    pub fn byte_order(&self) -> Result<ByteOrder> {
        let order = unsafe {
            geos_call!(self.lgeos, GEOSWKBWriter_getByteOrder(self.c_handle))
        };
        ByteOrder::try_from(order).ok_or(Error::Call("GEOSWKBWriter_getByteOrder"))
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_setByteOrder(self.c_handle, order.into())
            )
        };
        Ok(())
    }

    pub fn include_srid(&self) -> Result<bool> {
        let include = unsafe {
            geos_call!(self.lgeos, GEOSWKBWriter_getIncludeSRID(self.c_handle))
        };
        if include < 0 {
            return Err(Error::Call("GEOSWKBWriter_getIncludeSRID"));
        }
        Ok(include != 0)
    }

    pub fn set_include_srid(&mut self, include: bool) -> Result<()> {
        unsafe {
            geos_call!(
                self.lgeos,
                GEOSWKBWriter_setIncludeSRID(self.c_handle, include as i32)
            )
        };
        Ok(())
    }
}

impl Drop for WKBWriter<'_> {
    fn drop(&mut self) {
        if let Some(binding) = self.lgeos.registry.GEOSWKBWriter_destroy {
            unsafe {
                match binding {
                    Binding::Plain(f) => f(self.c_handle),
                    Binding::Reentrant(f) => f(self.lgeos.context_handle(), self.c_handle),
                }
            }
        }
    }
}
