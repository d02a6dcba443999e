use geo::MultiPolygon;

use crate::{
    data::{AttributeTable, ColumnType, Scalar, Schema},
    error::{Error, Result},
    geom::{GeometryEngine, GeometrySet, SourceId},
};
use super::{build_carriers, extract_membership, reduce_with, ReducedColumn};

/// A merged polygon from a self-union and the sources that formed it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionedGeometry {
    geometry: MultiPolygon<f64>,
    source_ids: Vec<SourceId>,
    source_attributes: Option<AttributeTable>,
}

impl UnionedGeometry {
    #[inline] pub fn geometry(&self) -> &MultiPolygon<f64> { &self.geometry }

    /// Contributing source ids, ascending. Never empty.
    #[inline] pub fn source_ids(&self) -> &[SourceId] { &self.source_ids }

    /// One attribute row per entry of [`source_ids`](Self::source_ids), in the
    /// same order; `None` when the input set had no attributes.
    #[inline] pub fn source_attributes(&self) -> Option<&AttributeTable> { self.source_attributes.as_ref() }

    /// Number of source polygons merged into this one.
    #[inline] pub fn union_count(&self) -> usize { self.source_ids.len() }
}

/// Output of [`self_union`].
#[derive(Debug, Clone)]
pub struct UnionedSet {
    features: Vec<UnionedGeometry>,
    epsg: Option<u32>,
}

impl UnionedSet {
    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline] pub fn features(&self) -> &[UnionedGeometry] { &self.features }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    /// `union_count` and `union_ids` (comma-separated) for every merged polygon.
    pub fn summary_table(&self) -> Result<AttributeTable> {
        let schema = Schema::new([("union_count", ColumnType::Numeric), ("union_ids", ColumnType::Text)])?;
        let rows = self.features.iter()
            .map(|feature| vec![
                Scalar::Numeric(feature.union_count() as f64),
                Scalar::Text(feature.source_ids.iter().map(SourceId::to_string).collect::<Vec<_>>().join(",")),
            ])
            .collect();
        AttributeTable::new(schema, rows)
    }

    /// Reduce one source attribute to a value per merged polygon.
    pub fn reduce_attribute<F>(&self, column: &str, f: F) -> Result<ReducedColumn>
    where
        F: Fn(&[Scalar]) -> Scalar,
    {
        self.reduce_attribute_with(column, |values, _: &()| f(values), &())
    }

    /// [`reduce_attribute`](Self::reduce_attribute) with extra arguments for `f`.
    pub fn reduce_attribute_with<F, A>(&self, column: &str, f: F, args: &A) -> Result<ReducedColumn>
    where
        F: Fn(&[Scalar], &A) -> Scalar,
        A: ?Sized,
    {
        let carriers = self.features.iter()
            .map(|feature| feature.source_attributes.clone().ok_or(Error::MissingAttribute))
            .collect::<Result<Vec<_>>>()?;
        reduce_with(&carriers, column, f, args)
    }
}

/// Merge overlapping polygons of `set`, recording for every merged polygon
/// which sources formed it and, if `set` has attributes, their rows.
pub fn self_union(set: &GeometrySet, engine: &impl GeometryEngine) -> Result<UnionedSet> {
    let polygons = set.polygons()?;
    if polygons.is_empty() {
        return Ok(UnionedSet { features: Vec::new(), epsg: set.epsg() });
    }
    let shapes: Vec<(SourceId, MultiPolygon<f64>)> = set.ids().iter().copied().zip(polygons).collect();

    let (merged, matrix) = engine.union_self(&shapes)?;
    if merged.len() != matrix.num_rows() {
        return Err(Error::InvalidInput(format!(
            "union produced {} geometries but {} membership rows", merged.len(), matrix.num_rows()
        )));
    }

    let membership = extract_membership(&matrix, engine.id_format())?;
    let carriers: Vec<Option<AttributeTable>> = match set.attributes() {
        Some(_) => build_carriers(set, &membership)?.into_iter().map(Some).collect(),
        None => vec![None; membership.len()],
    };

    let features = merged.into_iter().zip(membership).zip(carriers)
        .map(|((geometry, source_ids), source_attributes)| UnionedGeometry { geometry, source_ids, source_attributes })
        .collect::<Vec<_>>();

    log::debug!("self-union merged {} polygons into {}", set.len(), features.len());
    Ok(UnionedSet { features, epsg: set.epsg() })
}
