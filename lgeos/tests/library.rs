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
//! End-to-end tests against whatever GEOS library the host provides.
//! Each test skips cleanly when none can be loaded.

use float_cmp::{ApproxEq, F64Margin};
use lgeos::{
    ByteOrder, Error, GeometryTypes, LineString, Lgeos, Point, VersionTriple, WKBReader,
    WKBWriter, WKTReader, WKTWriter,
};

fn open() -> Option<Lgeos> {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init();
    match Lgeos::open_default() {
        Ok(lgeos) => Some(lgeos),
        Err(e) => {
            eprintln!("skipping test, no usable GEOS library: {}", e);
            None
        }
    }
}

macro_rules! require_geos {
    () => {
        match open() {
            Some(lgeos) => lgeos,
            None => return,
        }
    };
}

#[test]
fn test_version_detection() {
    let lgeos = require_geos!();
    let version = lgeos.version();
    assert!(version.raw.contains("CAPI"));
    assert!(version.library >= VersionTriple::new(3, 0, 0));
    assert!(!lgeos.library_path().is_empty());
}

#[test]
fn test_capability_table_baseline() {
    let lgeos = require_geos!();
    let table = lgeos.capabilities();
    for operation in [
        "area",
        "buffer",
        "intersects",
        "union",
        "relate",
        "equals_exact",
        "simplify",
    ]
    .iter()
    {
        assert!(table.contains(operation), "missing {}", operation);
    }
    assert!(table.len() >= 30);
}

#[test]
fn test_wkt_round_trip() {
    let lgeos = require_geos!();
    let reader = WKTReader::new(&lgeos).unwrap();
    let writer = WKTWriter::new(&lgeos).unwrap();

    let original = reader.read("POINT (10 20)").unwrap();
    let text = writer.write(&original).unwrap();
    let restored = reader.read(&text).unwrap();
    assert!(original.equals(&restored).unwrap());
    assert_eq!(restored.type_id().unwrap(), GeometryTypes::Point);
}

#[test]
fn test_wkt_reader_rejects_garbage() {
    let lgeos = require_geos!();
    let reader = WKTReader::new(&lgeos).unwrap();
    match reader.read("POINT (not a number)") {
        Err(Error::Reading { format }) => assert_eq!(format, "WKT"),
        other => panic!("expected a reading error, got {:?}", other.map(|_| ())),
    };
}

#[test]
fn test_wkt_writer_preserves_z_from_330() {
    let lgeos = require_geos!();
    if lgeos.version_triple() < VersionTriple::new(3, 3, 0) {
        return;
    }
    let writer = WKTWriter::new(&lgeos).unwrap();
    let reader = WKTReader::new(&lgeos).unwrap();

    let point = Point::new_3d(&lgeos, 1.0, 2.0, 3.0).unwrap();
    let text = writer.write(point.geometry()).unwrap();
    let restored = Point::from_geometry(reader.read(&text).unwrap());
    assert!(restored.has_z().unwrap());
    assert!(restored.z().unwrap().approx_eq(3.0, F64Margin::default()));
    // trim is on by default, no fractional padding
    assert!(!text.contains("1.00000"));
}

#[test]
fn test_wkb_round_trip() {
    let lgeos = require_geos!();
    let writer = WKBWriter::new(&lgeos).unwrap();
    let reader = WKBReader::new(&lgeos).unwrap();

    let point = Point::new(&lgeos, 2.5, -7.25).unwrap();
    let wkb = writer.write(point.geometry()).unwrap();
    assert!(wkb.len() > 0);
    let restored = reader.read(wkb.as_ref()).unwrap();
    assert!(point.equals(&restored).unwrap());

    let hex = writer.write_hex(point.geometry()).unwrap();
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    let from_hex = reader.read_hex(&hex).unwrap();
    assert!(point.equals(&from_hex).unwrap());
}

#[test]
fn test_wkb_buffer_outlives_writer() {
    let lgeos = require_geos!();
    let point = Point::new(&lgeos, 3.0, 4.0).unwrap();

    // the buffer borrows the proxy, not the writer that produced it
    let wkb = {
        let writer = WKBWriter::new(&lgeos).unwrap();
        writer.write(point.geometry()).unwrap()
    };

    let reader = WKBReader::new(&lgeos).unwrap();
    let restored = reader.read(wkb.as_ref()).unwrap();
    assert!(point.equals(&restored).unwrap());
}

#[test]
fn test_wkb_byte_orders_round_trip() {
    let lgeos = require_geos!();
    let mut writer = WKBWriter::new(&lgeos).unwrap();
    let reader = WKBReader::new(&lgeos).unwrap();
    let point = Point::new(&lgeos, -1.5, 2.25).unwrap();

    writer.set_byte_order(ByteOrder::LittleEndian).unwrap();
    assert_eq!(writer.byte_order().unwrap(), ByteOrder::LittleEndian);
    let le = writer.write(point.geometry()).unwrap();
    // leading WKB flag byte: 1 = NDR (little endian)
    assert_eq!(le.as_ref()[0], 1);
    assert!(point.equals(&reader.read(le.as_ref()).unwrap()).unwrap());

    writer.set_byte_order(ByteOrder::BigEndian).unwrap();
    assert_eq!(writer.byte_order().unwrap(), ByteOrder::BigEndian);
    let be = writer.write(point.geometry()).unwrap();
    // 0 = XDR (big endian)
    assert_eq!(be.as_ref()[0], 0);
    assert!(point.equals(&reader.read(be.as_ref()).unwrap()).unwrap());
}

#[test]
fn test_wkt_rounding_precision() {
    let lgeos = require_geos!();
    if lgeos.version_triple() < VersionTriple::new(3, 3, 0) {
        return;
    }
    let mut writer = WKTWriter::new(&lgeos).unwrap();
    let reader = WKTReader::new(&lgeos).unwrap();
    let point = Point::new(&lgeos, 0.123456, 7.654321).unwrap();

    writer.set_rounding_precision(2).unwrap();
    let rounded = writer.write(point.geometry()).unwrap();
    assert!(rounded.contains("0.12"));
    assert!(!rounded.contains("0.1234"));

    // a negative precision disables rounding again
    writer.set_rounding_precision(-1).unwrap();
    let full = writer.write(point.geometry()).unwrap();
    let restored = Point::from_geometry(reader.read(&full).unwrap());
    assert!(restored.x().unwrap().approx_eq(0.123456, F64Margin::default()));
    assert!(restored.y().unwrap().approx_eq(7.654321, F64Margin::default()));
}

#[test]
fn test_topological_dimensions() {
    let lgeos = require_geos!();
    let point = Point::new(&lgeos, 0.0, 0.0).unwrap();
    assert_eq!(point.dimensions().unwrap(), 0);

    let line = LineString::new(&lgeos, &[(0.0, 0.0), (1.0, 1.0)]).unwrap();
    assert_eq!(line.dimensions().unwrap(), 1);

    let polygon = point.buffer(1.0, 8).unwrap();
    assert_eq!(polygon.dimensions().unwrap(), 2);
}

#[test]
fn test_point_dimension_error() {
    let lgeos = require_geos!();
    let flat = Point::new(&lgeos, 4.0, 5.0).unwrap();
    assert!(flat.x().unwrap().approx_eq(4.0, F64Margin::default()));
    assert!(flat.y().unwrap().approx_eq(5.0, F64Margin::default()));
    match flat.z() {
        Err(Error::Dimension(_)) => {}
        other => panic!("expected dimension error, got {:?}", other),
    }

    let solid = Point::new_3d(&lgeos, 4.0, 5.0, 6.0).unwrap();
    assert!(solid.z().unwrap().approx_eq(6.0, F64Margin::default()));
}

#[test]
fn test_point_set_coords_keeps_srid() {
    let lgeos = require_geos!();
    let mut point = Point::new(&lgeos, 0.0, 0.0).unwrap();
    point.set_coords(1.0, 1.0, None).unwrap();
    assert!(point.x().unwrap().approx_eq(1.0, F64Margin::default()));
}

#[test]
fn test_linestring_length_and_coords() {
    let lgeos = require_geos!();
    let line = LineString::new(&lgeos, &[(0.0, 0.0), (3.0, 4.0)]).unwrap();
    assert!(line.length().unwrap().approx_eq(5.0, F64Margin::default()));

    let coords = line.coords().unwrap();
    assert_eq!(coords.len(), 2);
    assert!(coords[1].0.approx_eq(3.0, F64Margin::default()));
    assert!(coords[1].1.approx_eq(4.0, F64Margin::default()));

    match LineString::new(&lgeos, &[(0.0, 0.0)]) {
        Err(Error::Dimension(_)) => {}
        other => panic!("expected dimension error, got {:?}", other.map(|_| ())),
    };
}

#[test]
fn test_binary_predicates_and_relate() {
    let lgeos = require_geos!();
    let a = Point::new(&lgeos, 0.0, 0.0).unwrap();
    let b = Point::new(&lgeos, 100.0, 100.0).unwrap();
    let zone = a.buffer(10.0, 8).unwrap();

    assert!(zone.contains(a.geometry()).unwrap());
    assert!(zone.intersects(a.geometry()).unwrap());
    assert!(zone.disjoint(b.geometry()).unwrap());
    assert!(!zone.contains(b.geometry()).unwrap());
    assert!(a.within(&zone).unwrap());

    let matrix = zone.relate(a.geometry()).unwrap();
    assert_eq!(matrix.len(), 9);
}

#[test]
fn test_buffer_area() {
    let lgeos = require_geos!();
    let point = Point::new(&lgeos, 0.0, 0.0).unwrap();
    let disc = point.buffer(1.0, 64).unwrap();
    let area = disc.area().unwrap();
    // a 64-segment polygon slightly undershoots the circle
    assert!(area > 3.13 && area < std::f64::consts::PI);
}

#[test]
fn test_prepared_predicates() {
    let lgeos = require_geos!();
    if !lgeos.capabilities().contains("prepared_contains") {
        return;
    }
    let point = Point::new(&lgeos, 1.0, 1.0).unwrap();
    let zone = point.buffer(5.0, 8).unwrap();
    let prepared = zone.prepare().unwrap();

    assert!(prepared.contains(point.geometry()).unwrap());
    assert!(prepared.intersects(point.geometry()).unwrap());
    assert!(prepared.covers(point.geometry()).unwrap());

    let outside = Point::new(&lgeos, 50.0, 50.0).unwrap();
    assert!(!prepared.contains(outside.geometry()).unwrap());
}

#[test]
fn test_interpolate_when_available() {
    let lgeos = require_geos!();
    if !lgeos.capabilities().contains("interpolate") {
        return;
    }
    let line = LineString::new(&lgeos, &[(0.0, 0.0), (10.0, 0.0)]).unwrap();
    let midpoint = line.point_at_distance(5.0).unwrap();
    assert!(midpoint.x().unwrap().approx_eq(5.0, F64Margin::default()));
    assert!(line.project(midpoint.geometry()).unwrap().approx_eq(5.0, F64Margin::default()));
}

#[test]
fn test_cascaded_union_merges_overlaps() {
    let lgeos = require_geos!();
    let reader = WKTReader::new(&lgeos).unwrap();
    let collection = reader
        .read("MULTIPOLYGON (((0 0, 2 0, 2 2, 0 2, 0 0)), ((1 1, 3 1, 3 3, 1 3, 1 1)))")
        .unwrap();

    let merged = collection.cascaded_union().unwrap();
    assert_eq!(merged.num_geometries().unwrap(), 1);
    assert!(merged
        .area()
        .unwrap()
        .approx_eq(7.0, F64Margin::default()));
}

#[test]
fn test_topology_operations() {
    let lgeos = require_geos!();
    let a = Point::new(&lgeos, 0.0, 0.0).unwrap().buffer(2.0, 8).unwrap();
    let b = Point::new(&lgeos, 1.0, 0.0).unwrap().buffer(2.0, 8).unwrap();

    let both = a.union(&b).unwrap();
    assert!(both.area().unwrap() > a.area().unwrap());

    let shared = a.intersection(&b).unwrap();
    assert!(!shared.is_empty().unwrap());
    assert!(both.contains(&shared).unwrap());

    let only_a = a.difference(&b).unwrap();
    assert!(only_a.disjoint(&b.difference(&a).unwrap()).unwrap() || !only_a.intersects(&shared).unwrap());

    let hull = both.convex_hull().unwrap();
    assert!(hull.contains(&both).unwrap());
    assert!(both.centroid().unwrap().within(&hull).unwrap());
}

#[test]
fn test_srid_round_trip() {
    let lgeos = require_geos!();
    let mut point = Point::new(&lgeos, 1.0, 2.0).unwrap().into_geometry();
    point.set_srid(4326).unwrap();
    assert_eq!(point.srid().unwrap(), 4326);
}

#[test]
fn test_finish_is_idempotent() {
    let mut lgeos = require_geos!();
    {
        let point = Point::new(&lgeos, 1.0, 1.0).unwrap();
        assert!(!point.is_empty().unwrap());
    }
    lgeos.finish();
    lgeos.finish();
}
