//! Self-union provenance: which sources formed each merged polygon, and how
//! their attributes reduce to one value per merged polygon.

mod carrier;
mod membership;
mod reduce;
pub mod reducers;
mod unioned;

pub use carrier::build_carriers;
pub use membership::{extract_membership, IdFormat, MembershipMatrix, Prefixed};
pub use reduce::{reduce, reduce_with, ReducedColumn};
pub use unioned::{self_union, UnionedGeometry, UnionedSet};
