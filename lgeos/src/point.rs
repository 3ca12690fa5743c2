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
use std::ops::Deref;

use crate::coord_seq::CoordSequence;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::proxy::{geos_call, Lgeos};

/// A single 2-D or 3-D point.
pub struct Point<'l> {
    geometry: Geometry<'l>,
}

impl<'l> Point<'l> {
    pub fn new(lgeos: &'l Lgeos, x: f64, y: f64) -> Result<Point<'l>> {
        Point::create(lgeos, x, y, None)
    }

    pub fn new_3d(lgeos: &'l Lgeos, x: f64, y: f64, z: f64) -> Result<Point<'l>> {
        Point::create(lgeos, x, y, Some(z))
    }

    fn create(lgeos: &'l Lgeos, x: f64, y: f64, z: Option<f64>) -> Result<Point<'l>> {
        let dims = if z.is_some() { 3 } else { 2 };
        let mut seq = CoordSequence::create(lgeos, 1, dims)?;
        match z {
            Some(z) => seq.set_point_3d(0, x, y, z)?,
            None => seq.set_point(0, x, y)?,
        }
        let raw = unsafe { geos_call!(lgeos, GEOSGeom_createPoint(seq.release())) };
        let geometry = Geometry::managed(lgeos, raw, "GEOSGeom_createPoint")?;
        Ok(Point { geometry })
    }

    /// Wrap a geometry already known to be a point (for example a reader
    /// result or an interpolation product).
    pub fn from_geometry(geometry: Geometry<'l>) -> Point<'l> {
        Point { geometry }
    }

    pub fn x(&self) -> Result<f64> {
        self.geometry.coord_seq()?.get_x(0)
    }

    pub fn y(&self) -> Result<f64> {
        self.geometry.coord_seq()?.get_y(0)
    }

    pub fn z(&self) -> Result<f64> {
        if !self.geometry.has_z()? {
            return Err(Error::Dimension("this point has no z coordinate"));
        }
        self.geometry.coord_seq()?.get_z(0)
    }

    /// Replace the coordinates, preserving the SRID. Native points are
    /// immutable, so this rebuilds the underlying geometry.
    pub fn set_coords(&mut self, x: f64, y: f64, z: Option<f64>) -> Result<()> {
        let srid = self.geometry.srid()?;
        let mut rebuilt = Point::create(self.geometry.lgeos, x, y, z)?;
        rebuilt.geometry.set_srid(srid)?;
        self.geometry = rebuilt.geometry;
        Ok(())
    }

    pub fn geometry(&self) -> &Geometry<'l> {
        &self.geometry
    }

    pub fn into_geometry(self) -> Geometry<'l> {
        self.geometry
    }
}

impl<'l> Deref for Point<'l> {
    type Target = Geometry<'l>;

    fn deref(&self) -> &Geometry<'l> {
        &self.geometry
    }
}
