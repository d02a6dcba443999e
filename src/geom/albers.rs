use crate::error::{Error, Result};
use super::{GeometryEngine, GeometrySet};

/// EPSG code of BC Albers (NAD83 / BC Albers), the province's standard
/// equal-area projection.
pub const BC_ALBERS: u32 = 3005;

/// Reproject every feature of `set` to BC Albers. The set must declare its
/// source CRS; a set already in BC Albers is returned as is.
pub fn transform_bc_albers(set: &GeometrySet, engine: &impl GeometryEngine) -> Result<GeometrySet> {
    let from = set.epsg()
        .ok_or_else(|| Error::InvalidArgument("geometry set has no coordinate reference system".into()))?;
    if from == BC_ALBERS {
        return Ok(set.clone());
    }

    log::debug!("reprojecting {} features from EPSG:{from} to EPSG:{BC_ALBERS}", set.len());
    let shapes = set.shapes().iter()
        .map(|shape| engine.reproject(shape, from, BC_ALBERS))
        .collect::<Result<Vec<_>>>()?;
    Ok(set.with_shapes(shapes, Some(BC_ALBERS)))
}

#[cfg(test)]
mod tests {
    use geo::{point, Point};

    use super::*;

    struct Bare;
    impl GeometryEngine for Bare {}

    fn sample(epsg: Option<u32>) -> GeometrySet {
        GeometrySet::new(vec![point!(x: -123.1207, y: 49.2827).into()], epsg)
    }

    #[test]
    fn unknown_crs_is_rejected() {
        assert!(matches!(transform_bc_albers(&sample(None), &Bare), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn already_albers_needs_no_engine() {
        let set = sample(Some(BC_ALBERS));
        let out = transform_bc_albers(&set, &Bare).unwrap();
        assert_eq!(out.shapes(), set.shapes());
    }

    #[test]
    fn missing_reprojection_capability() {
        let err = transform_bc_albers(&sample(Some(4326)), &Bare).unwrap_err();
        assert!(matches!(err, Error::DependencyUnavailable(_)));
    }

    #[cfg(feature = "proj")]
    #[test]
    fn geo_engine_projects_vancouver() {
        let set = sample(Some(4326));
        let out = transform_bc_albers(&set, &crate::geom::GeoEngine::default()).unwrap();
        assert_eq!(out.epsg(), Some(BC_ALBERS));
        assert_eq!(out.ids(), set.ids());

        let p: Point<f64> = out.shapes()[0].clone().try_into().unwrap();
        // Vancouver sits roughly 1.2e6 m east, 4.6e5 m north in BC Albers.
        assert!((1_150_000.0..1_300_000.0).contains(&p.x()), "x = {}", p.x());
        assert!((400_000.0..550_000.0).contains(&p.y()), "y = {}", p.y());
    }
}
