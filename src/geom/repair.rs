use std::sync::LazyLock;

use geo::{Geometry, MultiPolygon};
use regex::Regex;

use crate::{config::RepairConfig, error::{Error, Result}};
use super::{GeometryEngine, GeometrySet, SourceId};

static SELF_INTERSECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ss]elf.?[Ii]ntersect").expect("static regex"));

/// What `fix_geo_problems` did.
#[derive(Debug, Clone, PartialEq)]
pub enum RepairStatus {
    /// Every feature was valid on entry; nothing was changed.
    AlreadyValid,
    /// Self-intersections were resolved after `iterations` buffer passes.
    Repaired { iterations: usize },
    /// Some features are invalid for reasons other than self-intersection.
    /// Those features are left as they were.
    Unrepaired { reasons: Vec<(SourceId, String)> },
}

#[derive(Debug, Clone)]
pub struct Repaired {
    pub geometries: GeometrySet,
    pub status: RepairStatus,
}

/// Resolve self-intersections by buffering invalid features by zero, up to
/// `config.max_iterations` passes.
///
/// Valid features are never touched, and neither are features invalid for a
/// reason other than self-intersection. Once only such problems remain they
/// are logged and returned as [`RepairStatus::Unrepaired`], together with the
/// geometries as they stand after any passes already made.
pub fn fix_geo_problems(set: &GeometrySet, engine: &impl GeometryEngine, config: &RepairConfig) -> Result<Repaired> {
    let mut shapes = set.polygons()?;
    let mut passes = 0;

    loop {
        let invalid = invalid_features(&shapes, engine)?;
        if invalid.is_empty() {
            if passes == 0 {
                log::info!("all {} geometries are valid", shapes.len());
                return Ok(Repaired { geometries: set.clone(), status: RepairStatus::AlreadyValid });
            }
            log::info!("geometries repaired after {passes} buffer pass(es)");
            return Ok(Repaired { geometries: current(set, shapes), status: RepairStatus::Repaired { iterations: passes } });
        }

        let mut reasons = Vec::with_capacity(invalid.len());
        let mut intersecting = Vec::new();
        for i in invalid {
            let reason = engine.validity_reason(&shapes[i])?;
            if SELF_INTERSECTION.is_match(&reason) {
                intersecting.push(i);
            } else {
                reasons.push((set.ids()[i], reason));
            }
        }

        if intersecting.is_empty() {
            for (id, reason) in &reasons {
                log::warn!("feature {id} is invalid and cannot be repaired by buffering: {reason}");
            }
            let geometries = if passes == 0 { set.clone() } else { current(set, shapes) };
            return Ok(Repaired { geometries, status: RepairStatus::Unrepaired { reasons } });
        }
        if passes == config.max_iterations {
            return Err(Error::RepairDidNotConverge(config.max_iterations));
        }

        log::info!("found {} self-intersecting geometries, buffering by zero", intersecting.len());
        for i in intersecting {
            shapes[i] = engine.buffer_by_zero(&shapes[i])?;
        }
        passes += 1;
    }
}

fn current(set: &GeometrySet, shapes: Vec<MultiPolygon<f64>>) -> GeometrySet {
    set.with_shapes(shapes.into_iter().map(Geometry::MultiPolygon).collect(), set.epsg())
}

fn invalid_features(shapes: &[MultiPolygon<f64>], engine: &impl GeometryEngine) -> Result<Vec<usize>> {
    let mut invalid = Vec::new();
    for (i, shape) in shapes.iter().enumerate() {
        if !engine.is_valid(shape)? {
            invalid.push(i);
        }
    }
    Ok(invalid)
}
