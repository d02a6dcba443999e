use geo::{BooleanOps, Geometry, MultiPolygon, Validation};

use crate::{
    config::UnionConfig,
    error::{Error, Result},
    union::{IdFormat, MembershipMatrix, Prefixed},
};
use super::{algorithm::overlay::overlay, SourceId};

static DEFAULT_ID_FORMAT: Prefixed = Prefixed::DEFAULT;

/// Geometry capabilities the BC helpers delegate to.
///
/// Every method defaults to `Error::DependencyUnavailable`, so an engine
/// only implements what it actually supports.
pub trait GeometryEngine {
    fn is_valid(&self, _geometry: &MultiPolygon<f64>) -> Result<bool> {
        Err(Error::DependencyUnavailable("validity check"))
    }

    /// Human-readable validity description, e.g. `Valid Geometry` or a reason
    /// such as `exterior ring has a self-intersection`.
    fn validity_reason(&self, _geometry: &MultiPolygon<f64>) -> Result<String> {
        Err(Error::DependencyUnavailable("validity reason"))
    }

    fn buffer_by_zero(&self, _geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        Err(Error::DependencyUnavailable("buffer"))
    }

    /// Reproject `geometry` from EPSG `from` to EPSG `to`.
    fn reproject(&self, _geometry: &Geometry<f64>, _from: u32, _to: u32) -> Result<Geometry<f64>> {
        Err(Error::DependencyUnavailable("reprojection"))
    }

    /// Split overlapping `shapes` into merged pieces plus a membership matrix
    /// whose column names are written in [`id_format`](Self::id_format).
    fn union_self(&self, _shapes: &[(SourceId, MultiPolygon<f64>)]) -> Result<(Vec<MultiPolygon<f64>>, MembershipMatrix)> {
        Err(Error::DependencyUnavailable("self-union"))
    }

    /// Encoding used for membership-matrix column names.
    fn id_format(&self) -> &dyn IdFormat {
        &DEFAULT_ID_FORMAT
    }
}

/// Geometry engine backed by the `geo` crate, with `proj4rs` reprojection
/// when the `proj` feature is enabled.
#[derive(Debug, Clone, Default)]
pub struct GeoEngine {
    id_format: Prefixed,
    min_area: f64,
}

impl GeoEngine {
    pub fn new(config: &UnionConfig) -> Self {
        Self {
            id_format: Prefixed::new(config.id_prefix.clone()),
            min_area: config.min_area,
        }
    }
}

impl GeometryEngine for GeoEngine {
    fn is_valid(&self, geometry: &MultiPolygon<f64>) -> Result<bool> {
        Ok(geometry.is_valid())
    }

    fn validity_reason(&self, geometry: &MultiPolygon<f64>) -> Result<String> {
        Ok(match geometry.check_validation() {
            Ok(()) => "Valid Geometry".to_string(),
            Err(reason) => reason.to_string(),
        })
    }

    /// Rebuilding the polygon through a boolean union with nothing resolves
    /// self-intersections the same way a zero-width buffer does.
    fn buffer_by_zero(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        Ok(geometry.union(&MultiPolygon::new(vec![])))
    }

    #[cfg(feature = "proj")]
    fn reproject(&self, geometry: &Geometry<f64>, from: u32, to: u32) -> Result<Geometry<f64>> {
        super::algorithm::proj::reproject(geometry, from, to)
    }

    fn union_self(&self, shapes: &[(SourceId, MultiPolygon<f64>)]) -> Result<(Vec<MultiPolygon<f64>>, MembershipMatrix)> {
        let pieces = overlay(shapes, self.min_area);
        let ids: Vec<SourceId> = shapes.iter().map(|(id, _)| *id).collect();
        let (merged, sources): (Vec<_>, Vec<_>) = pieces.into_iter().unzip();
        let matrix = MembershipMatrix::from_sources(&self.id_format, &ids, &sources);
        Ok((merged, matrix))
    }

    fn id_format(&self) -> &dyn IdFormat {
        &self.id_format
    }
}
