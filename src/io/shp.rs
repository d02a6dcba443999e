//! Shapefile (.shp + .dbf) reading.

use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use shapefile::{dbase::{FieldValue, Record}, Reader, Shape};

use crate::{
    data::{AttributeTable, ColumnType, Scalar, Schema},
    geom::GeometrySet,
};

/// Reads all shapes and their attribute records from a `.shp` file.
///
/// Shapefiles carry no EPSG code, so the caller supplies it. Attribute
/// columns are ordered by name.
pub fn read_shapefile(path: &Path, epsg: Option<u32>) -> Result<GeometrySet> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut shapes = Vec::with_capacity(reader.shape_count()?);
    let mut records = Vec::with_capacity(shapes.capacity());
    for (i, result) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = result.with_context(|| format!("[io::shp] Error reading shape+record {i}"))?;
        shapes.push(shape_to_geo(shape).with_context(|| format!("[io::shp] Unsupported shape at index {i}"))?);
        records.push(record);
    }

    let set = GeometrySet::new(shapes, epsg);
    if records.is_empty() {
        return Ok(set);
    }
    let attributes = records_to_table(records)
        .with_context(|| format!("[io::shp] Invalid attribute records in {}", path.display()))?;
    Ok(set.with_attributes(attributes)?)
}

fn shape_to_geo(shape: Shape) -> Result<Geometry<f64>> {
    Ok(match shape {
        Shape::Polygon(p) => Geometry::MultiPolygon(shp_to_geo(&p)),
        Shape::Point(p) => Geometry::Point(Point::new(p.x, p.y)),
        Shape::NullShape => Geometry::MultiPolygon(MultiPolygon::new(vec![])),
        other => bail!("shape type {:?} is not supported", other.shapetype()),
    })
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>
pub(crate) fn shp_to_geo(p: &shapefile::Polygon) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last {
                coords.push(first)
            }
        }
    }

    /// Get the signed area of a geo::Coord list (negative for clockwise)
    fn signed_area(pts: &[Coord<f64>]) -> f64 {
        pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
    }

    // Shapefile rings come as [outer CW, hole CCW, hole CCW, ..., next outer CW, ...]
    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut coords: Vec<Coord<f64>> = ring.points().iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect();
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        let line = LineString(coords);

        if is_exterior {
            if let Some(ext) = exterior.take() {
                polys.push(Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(line);
        } else {
            holes.push(line);
        }
    }
    if let Some(ext) = exterior {
        polys.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polys)
}

fn records_to_table(records: Vec<Record>) -> Result<AttributeTable> {
    let fields: Vec<Vec<(String, FieldValue)>> = records.into_iter()
        .map(|record| {
            let mut fields: Vec<(String, FieldValue)> = record.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            fields
        })
        .collect();

    let schema = Schema::new(fields[0].iter().map(|(name, value)| (name.clone(), column_type(value))))?;
    let rows = fields.into_iter()
        .map(|row| row.into_iter().map(|(_, value)| to_scalar(value)).collect())
        .collect();
    Ok(AttributeTable::new(schema, rows)?)
}

fn column_type(value: &FieldValue) -> ColumnType {
    match value {
        FieldValue::Numeric(_) | FieldValue::Float(_) | FieldValue::Integer(_)
        | FieldValue::Double(_) | FieldValue::Currency(_) => ColumnType::Numeric,
        FieldValue::Logical(_) => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

fn to_scalar(value: FieldValue) -> Scalar {
    match value {
        FieldValue::Numeric(x) => x.into(),
        FieldValue::Float(x) => x.map(f64::from).into(),
        FieldValue::Integer(x) => Scalar::Numeric(x.into()),
        FieldValue::Double(x) | FieldValue::Currency(x) => Scalar::Numeric(x),
        FieldValue::Logical(b) => b.into(),
        FieldValue::Character(s) => s.into(),
        FieldValue::Memo(s) => s.into(),
        other => Scalar::Text(format!("{other:?}")),
    }
}
