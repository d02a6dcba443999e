use std::borrow::Cow;

use geo::{Coord, Geometry, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::error::{Error, Result};

/// A coordinate reference system known to the reprojection layer.
struct Crs {
    proj4: Cow<'static, str>,
    geographic: bool, // lon/lat in degrees rather than projected metres
}

/// PROJ.4 definition for a supported EPSG code.
fn crs(epsg: u32) -> Result<Crs> {
    let (proj4, geographic) = match epsg {
        4326 => (Cow::Borrowed("+proj=longlat +datum=WGS84 +no_defs +type=crs"), true),
        4269 => (Cow::Borrowed("+proj=longlat +datum=NAD83 +no_defs +type=crs"), true),
        4617 => (Cow::Borrowed("+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs"), true),
        3857 => (Cow::Borrowed(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs"
        ), false),
        // BC Albers
        3005 => (Cow::Borrowed(
            "+proj=aea +lat_0=45 +lon_0=-126 +lat_1=50 +lat_2=58.5 +x_0=1000000 +y_0=0 +datum=NAD83 +units=m +no_defs +type=crs"
        ), false),
        // NAD83 / UTM zones 7N-11N cover the province
        26907..=26911 => (
            Cow::Owned(format!("+proj=utm +zone={} +datum=NAD83 +units=m +no_defs +type=crs", epsg - 26900)),
            false,
        ),
        _ => return Err(Error::InvalidArgument(format!("unsupported coordinate reference system EPSG:{epsg}"))),
    };
    Ok(Crs { proj4, geographic })
}

fn build(crs: &Crs) -> Result<Proj4> {
    Proj4::from_proj_string(&crs.proj4)
        .map_err(|e| Error::InvalidArgument(format!("failed to build PROJ.4 `{}`: {e}", crs.proj4)))
}

/// Reproject a geometry between two supported EPSG codes.
pub(crate) fn reproject(geometry: &Geometry<f64>, from: u32, to: u32) -> Result<Geometry<f64>> {
    let (source, target) = (crs(from)?, crs(to)?);
    if from == to {
        return Ok(geometry.clone());
    }
    let (src, dst) = (build(&source)?, build(&target)?);
    let (deg_in, deg_out) = (source.geographic, target.geographic);

    // Degrees → radians in for geographic sources, radians → degrees out for geographic targets.
    geometry.try_map_coords(|coord: Coord<f64>| {
        let mut point = if deg_in { (coord.x.to_radians(), coord.y.to_radians(), 0.0) }
        else { (coord.x, coord.y, 0.0) };
        transform(&src, &dst, &mut point)
            .map_err(|e| Error::InvalidInput(format!("EPSG:{from} -> EPSG:{to} transform failed at ({}, {}): {e}", coord.x, coord.y)))?;
        Ok(if deg_out { Coord { x: point.0.to_degrees(), y: point.1.to_degrees() } }
        else { Coord { x: point.0, y: point.1 } })
    })
}

#[cfg(test)]
mod tests {
    use geo::{point, Point};

    use super::*;

    fn xy(geometry: Geometry<f64>) -> (f64, f64) {
        let p: Point<f64> = geometry.try_into().unwrap();
        (p.x(), p.y())
    }

    #[test]
    fn albers_origin_maps_to_false_easting() {
        // lon_0 = -126, lat_0 = 45 is the projection origin.
        let (x, y) = xy(reproject(&point!(x: -126.0, y: 45.0).into(), 4269, 3005).unwrap());
        assert!((x - 1_000_000.0).abs() < 1e-3, "x = {x}");
        assert!(y.abs() < 1e-3, "y = {y}");
    }

    #[test]
    fn victoria_lands_in_bc_albers_extent() {
        let (x, y) = xy(reproject(&point!(x: -123.3656, y: 48.4284).into(), 4326, 3005).unwrap());
        assert!((1_100_000.0..1_300_000.0).contains(&x), "x = {x}");
        assert!((300_000.0..450_000.0).contains(&y), "y = {y}");
    }

    #[test]
    fn round_trip_back_to_lon_lat() {
        let there = reproject(&point!(x: -120.0, y: 55.0).into(), 4269, 3005).unwrap();
        let (lon, lat) = xy(reproject(&there, 3005, 4269).unwrap());
        assert!((lon + 120.0).abs() < 1e-6);
        assert!((lat - 55.0).abs() < 1e-6);
    }

    #[test]
    fn same_crs_is_identity() {
        let geometry: Geometry<f64> = point!(x: 1.0, y: 2.0).into();
        assert_eq!(reproject(&geometry, 3005, 3005).unwrap(), geometry);
    }

    #[test]
    fn unsupported_epsg() {
        let geometry: Geometry<f64> = point!(x: 1.0, y: 2.0).into();
        assert!(matches!(reproject(&geometry, 2154, 3005), Err(Error::InvalidArgument(_))));
    }
}
