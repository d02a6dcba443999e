//! GeoJSON export of self-union results.

use anyhow::{Context, Result};
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

use crate::{data::Scalar, union::UnionedSet};

fn multipolygon_json(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Value> = mp.0.iter()
        .map(|polygon| {
            let rings: Vec<Vec<[f64; 2]>> = std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
                .collect();
            json!(rings)
        })
        .collect();
    json!({ "type": "MultiPolygon", "coordinates": polygons })
}

fn scalar_json(value: &Scalar) -> Value {
    match value {
        Scalar::Null => Value::Null,
        Scalar::Numeric(x) => json!(x),
        Scalar::Text(s) | Scalar::Categorical(s) => json!(s),
        Scalar::Boolean(b) => json!(b),
    }
}

/// Write merged polygons to a GeoJSON FeatureCollection. Each feature carries
/// `union_count` and `union_ids` properties.
pub fn write_unioned_geojson(unioned: &UnionedSet) -> Result<Vec<u8>> {
    let summary = unioned.summary_table().context("[io::geojson] Failed to summarise union")?;

    let features: Vec<Value> = unioned.features().iter().zip(summary.rows())
        .map(|(feature, row)| {
            let properties: Map<String, Value> = summary.schema().fields().iter().zip(row)
                .map(|(field, value)| (field.name.clone(), scalar_json(value)))
                .collect();
            json!({
                "type": "Feature",
                "geometry": multipolygon_json(feature.geometry()),
                "properties": properties,
            })
        })
        .collect();

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&feature_collection).context("[io::geojson] Failed to serialize GeoJSON to bytes")
}
