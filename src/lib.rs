#![doc = "Helpers for British Columbia geographic data"]
mod area;
mod config;
mod data;
mod error;
mod geom;
pub mod io;
pub mod union;

#[doc(inline)]
pub use area::{bc_area, bc_area_str, AreaUnit, AreaValue, Region};

#[doc(inline)]
pub use config::{Config, RepairConfig, UnionConfig};

#[doc(inline)]
pub use data::{AttributeTable, ColumnType, Field, Levels, Scalar, Schema};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use geom::{
    fix_geo_problems, transform_bc_albers, GeoEngine, GeometryEngine, GeometrySet, RepairStatus, Repaired,
    SourceId, BC_ALBERS,
};

#[doc(inline)]
pub use union::{
    build_carriers, extract_membership, reduce, reduce_with, self_union, IdFormat, MembershipMatrix, Prefixed,
    ReducedColumn, UnionedGeometry, UnionedSet,
};
