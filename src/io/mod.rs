//! Reading attribute tables and geometry sets, and writing union results.

pub mod csv;
pub mod geojson;
pub mod shp;
