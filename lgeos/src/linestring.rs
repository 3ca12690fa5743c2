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
use std::cell::OnceCell;
use std::ops::Deref;

use crate::coord_seq::CoordSequence;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::point::Point;
use crate::proxy::{geos_call, Lgeos};

pub struct LineString<'l> {
    geometry: Geometry<'l>,
    // native coordinate reads are one ordinate per call, so the tuple
    // view is materialized once
    coords: OnceCell<Vec<(f64, f64)>>,
}

impl<'l> LineString<'l> {
    pub fn new(lgeos: &'l Lgeos, coords: &[(f64, f64)]) -> Result<LineString<'l>> {
        if coords.len() < 2 {
            return Err(Error::Dimension(
                "a LineString needs at least 2 coordinate tuples",
            ));
        }
        let mut seq = CoordSequence::create(lgeos, coords.len() as u32, 2)?;
        for (idx, (x, y)) in coords.iter().enumerate() {
            seq.set_point(idx as u32, *x, *y)?;
        }
        LineString::from_sequence(lgeos, seq)
    }

    pub fn new_3d(lgeos: &'l Lgeos, coords: &[(f64, f64, f64)]) -> Result<LineString<'l>> {
        if coords.len() < 2 {
            return Err(Error::Dimension(
                "a LineString needs at least 2 coordinate tuples",
            ));
        }
        let mut seq = CoordSequence::create(lgeos, coords.len() as u32, 3)?;
        for (idx, (x, y, z)) in coords.iter().enumerate() {
            seq.set_point_3d(idx as u32, *x, *y, *z)?;
        }
        LineString::from_sequence(lgeos, seq)
    }

    fn from_sequence(lgeos: &'l Lgeos, seq: CoordSequence<'l>) -> Result<LineString<'l>> {
        let raw = unsafe { geos_call!(lgeos, GEOSGeom_createLineString(seq.release())) };
        let geometry = Geometry::managed(lgeos, raw, "GEOSGeom_createLineString")?;
        Ok(LineString {
            geometry,
            coords: OnceCell::new(),
        })
    }

    pub fn from_geometry(geometry: Geometry<'l>) -> LineString<'l> {
        LineString {
            geometry,
            coords: OnceCell::new(),
        }
    }

    pub fn coords(&self) -> Result<&[(f64, f64)]> {
        if let Some(cached) = self.coords.get() {
            return Ok(cached);
        }
        let computed = self
            .geometry
            .coord_seq()?
            .points()?
            .collect::<Result<Vec<_>>>()?;
        Ok(self.coords.get_or_init(|| computed))
    }

    /// The point at `distance` along the line.
    pub fn point_at_distance(&self, distance: f64) -> Result<Point<'l>> {
        Ok(Point::from_geometry(self.geometry.interpolate(distance)?))
    }

    pub fn geometry(&self) -> &Geometry<'l> {
        &self.geometry
    }

    pub fn into_geometry(self) -> Geometry<'l> {
        self.geometry
    }
}

impl<'l> Deref for LineString<'l> {
    type Target = Geometry<'l>;

    fn deref(&self) -> &Geometry<'l> {
        &self.geometry
    }
}
