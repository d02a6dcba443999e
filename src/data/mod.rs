mod scalar;
mod schema;
mod table;

pub use scalar::Scalar;
pub use schema::{ColumnType, Field, Levels, Schema};
pub use table::AttributeTable;
