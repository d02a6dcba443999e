use thiserror::Error;

use crate::geom::SourceId;

/// Errors raised by bcgeo operations.
///
/// Every variant is a contract violation by the caller or a missing engine
/// capability; none of them is retried or recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    /// A selector (region, unit, CRS) outside the supported set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A feature of the wrong geometry category, e.g. a point handed to union.
    #[error("type error: {0}")]
    Type(String),

    /// The geometry engine does not provide the named capability.
    #[error("geometry capability unavailable: {0}")]
    DependencyUnavailable(&'static str),

    /// Malformed membership matrix, carrier, or attribute data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A membership row names a source that is not in the geometry set.
    #[error("source id {0} is referenced by the union output but not present in the geometry set")]
    UnknownSourceId(SourceId),

    /// Carriers were requested for a geometry-only set.
    #[error("geometry set carries no attribute rows")]
    MissingAttribute,

    /// A reduction function returned a scalar that does not fit the column type.
    #[error("reduction on column `{column}` returned {found}, expected {expected}")]
    ReductionType {
        column: String,
        expected: String,
        found: String,
    },

    #[error("self-intersection repair did not converge after {0} iterations")]
    RepairDidNotConverge(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
