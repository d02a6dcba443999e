use ahash::AHashSet;
use geo::{Geometry, MultiPolygon};

use crate::{data::AttributeTable, error::{Error, Result}};
use super::SourceId;

/// An ordered collection of features, each with a source id, a geometry and
/// (optionally) one attribute row.
#[derive(Debug, Clone)]
pub struct GeometrySet {
    ids: Vec<SourceId>,
    shapes: Vec<Geometry<f64>>,
    attributes: Option<AttributeTable>,
    epsg: Option<u32>, // EPSG code, if known
}

impl GeometrySet {
    /// Construct a set from geometries, numbering them `1..=n`.
    pub fn new(shapes: Vec<Geometry<f64>>, epsg: Option<u32>) -> Self {
        Self {
            ids: (1..=shapes.len() as u32).map(SourceId).collect(),
            shapes,
            attributes: None,
            epsg,
        }
    }

    /// Construct a set of polygonal features.
    pub fn from_polygons(polygons: Vec<MultiPolygon<f64>>, epsg: Option<u32>) -> Self {
        Self::new(polygons.into_iter().map(Geometry::MultiPolygon).collect(), epsg)
    }

    /// Replace the default ids; they must be unique and one per feature.
    pub fn with_ids(mut self, ids: Vec<SourceId>) -> Result<Self> {
        if ids.len() != self.shapes.len() {
            return Err(Error::InvalidInput(format!(
                "{} ids supplied for {} features", ids.len(), self.shapes.len()
            )));
        }
        let mut seen = AHashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(Error::InvalidInput(format!("duplicate source id {id}")));
            }
        }
        self.ids = ids;
        Ok(self)
    }

    /// Attach an attribute table with exactly one row per feature.
    pub fn with_attributes(mut self, attributes: AttributeTable) -> Result<Self> {
        if attributes.len() != self.shapes.len() {
            return Err(Error::InvalidInput(format!(
                "{} attribute rows supplied for {} features", attributes.len(), self.shapes.len()
            )));
        }
        self.attributes = Some(attributes);
        Ok(self)
    }

    /// Get the number of features.
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no features.
    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    #[inline] pub fn ids(&self) -> &[SourceId] { &self.ids }

    #[inline] pub fn shapes(&self) -> &[Geometry<f64>] { &self.shapes }

    #[inline] pub fn attributes(&self) -> Option<&AttributeTable> { self.attributes.as_ref() }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    /// Position of `id` within the set.
    pub fn position(&self, id: SourceId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// Same features and attributes with new geometries and CRS.
    pub(crate) fn with_shapes(&self, shapes: Vec<Geometry<f64>>, epsg: Option<u32>) -> Self {
        debug_assert_eq!(shapes.len(), self.shapes.len());
        Self {
            ids: self.ids.clone(),
            shapes,
            attributes: self.attributes.clone(),
            epsg,
        }
    }

    /// Every feature as a MultiPolygon, or a type error naming the first
    /// non-polygonal feature.
    pub fn polygons(&self) -> Result<Vec<MultiPolygon<f64>>> {
        self.ids.iter().zip(&self.shapes)
            .map(|(id, shape)| match shape {
                Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p.clone()])),
                Geometry::MultiPolygon(mp) => Ok(mp.clone()),
                other => Err(Error::Type(format!(
                    "feature {id} is {}, expected Polygon or MultiPolygon", geometry_kind(other)
                ))),
            })
            .collect()
    }
}

pub(crate) fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
