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
use std::os::raw::c_int;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryTypes {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Unknown(i32),
}

impl From<c_int> for GeometryTypes {
    fn from(type_id: c_int) -> Self {
        match type_id {
            0 => GeometryTypes::Point,
            1 => GeometryTypes::LineString,
            2 => GeometryTypes::LinearRing,
            3 => GeometryTypes::Polygon,
            4 => GeometryTypes::MultiPoint,
            5 => GeometryTypes::MultiLineString,
            6 => GeometryTypes::MultiPolygon,
            7 => GeometryTypes::GeometryCollection,
            other => GeometryTypes::Unknown(other),
        }
    }
}

/// WKB byte order, matching `GEOS_WKB_XDR`/`GEOS_WKB_NDR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl From<ByteOrder> for c_int {
    fn from(order: ByteOrder) -> c_int {
        match order {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }
}

impl ByteOrder {
    pub(crate) fn try_from(value: c_int) -> Option<ByteOrder> {
        match value {
            0 => Some(ByteOrder::BigEndian),
            1 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

/// Number of dimensions written by the WKT/WKB writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDimension {
    TwoD,
    ThreeD,
}

impl From<OutputDimension> for c_int {
    fn from(dim: OutputDimension) -> c_int {
        match dim {
            OutputDimension::TwoD => 2,
            OutputDimension::ThreeD => 3,
        }
    }
}

impl OutputDimension {
    pub(crate) fn try_from(value: c_int) -> Option<OutputDimension> {
        match value {
            2 => Some(OutputDimension::TwoD),
            3 => Some(OutputDimension::ThreeD),
            _ => None,
        }
    }
}
