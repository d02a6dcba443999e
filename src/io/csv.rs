//! CSV attribute reading through polars.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{bail, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};

use crate::data::{AttributeTable, ColumnType, Scalar, Schema};

/// Reads a CSV file from `path` into an attribute table.
pub fn read_attributes(path: &Path) -> Result<AttributeTable> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv] Failed to read CSV from {:?}", path))?;
    from_dataframe(&df)
}

/// Reads CSV text into an attribute table.
pub fn read_attributes_str(csv: &str) -> Result<AttributeTable> {
    let df = CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv] Failed to read CSV from string")?;
    from_dataframe(&df)
}

/// Convert a polars DataFrame into an attribute table. Integer and float
/// columns become numeric, string columns text, boolean columns boolean.
pub fn from_dataframe(df: &DataFrame) -> Result<AttributeTable> {
    let mut fields = Vec::with_capacity(df.width());
    let mut columns = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let series = column.as_materialized_series();
        let (ty, values): (ColumnType, Vec<Scalar>) = match series.dtype() {
            DataType::Boolean => (
                ColumnType::Boolean,
                series.bool()?.into_iter().map(Scalar::from).collect(),
            ),
            DataType::String => (
                ColumnType::Text,
                series.str()?.into_iter().map(Scalar::from).collect(),
            ),
            DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64
            | DataType::Float32 | DataType::Float64 => {
                let cast = series.cast(&DataType::Float64)
                    .with_context(|| format!("[io::csv] Failed to cast column `{name}` to f64"))?;
                (ColumnType::Numeric, cast.f64()?.into_iter().map(Scalar::from).collect())
            }
            other => bail!("[io::csv] Unsupported type {other} for column `{name}`"),
        };
        fields.push((name, ty));
        columns.push(values);
    }

    let schema = Schema::new(fields).context("[io::csv] Invalid CSV header")?;
    AttributeTable::from_columns(schema, columns).context("[io::csv] Invalid CSV contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_column_types() {
        let table = read_attributes_str("name,pop,coastal\nVictoria,91867,true\nPrince George,74003,false\n").unwrap();
        let types: Vec<&ColumnType> = table.schema().fields().iter().map(|f| &f.ty).collect();
        assert_eq!(types, vec![&ColumnType::Text, &ColumnType::Numeric, &ColumnType::Boolean]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(1, "name").unwrap(), &Scalar::Text("Prince George".into()));
        assert_eq!(table.value(0, "pop").unwrap(), &Scalar::Numeric(91867.0));
        assert_eq!(table.value(1, "coastal").unwrap(), &Scalar::Boolean(false));
    }

    #[test]
    fn missing_cells_are_null() {
        let table = read_attributes_str("name,area\na,1.5\nb,\n").unwrap();
        assert_eq!(table.value(1, "area").unwrap(), &Scalar::Null);
    }
}
