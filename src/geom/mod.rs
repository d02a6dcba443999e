mod albers;
mod algorithm;
mod engine;
mod repair;
mod set;
mod source_id;

pub use albers::{transform_bc_albers, BC_ALBERS};
pub use engine::{GeoEngine, GeometryEngine};
pub use repair::{fix_geo_problems, RepairStatus, Repaired};
pub use set::GeometrySet;
pub use source_id::SourceId;
