use std::sync::Arc;

use crate::error::{Error, Result};
use super::{ColumnType, Levels, Scalar, Schema};

/// Row-oriented attribute table with a shared schema.
///
/// Every row has exactly one scalar per schema column, and every scalar is
/// admitted by its column type. Subsets built with [`select`](Self::select)
/// share the parent's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    schema: Arc<Schema>,
    rows: Vec<Vec<Scalar>>,
}

impl AttributeTable {
    /// Construct a table, checking row widths and value types.
    pub fn new(schema: Schema, rows: Vec<Vec<Scalar>>) -> Result<Self> {
        let schema = Arc::new(schema);
        for (i, row) in rows.iter().enumerate() {
            check_row(&schema, i, row)?;
        }
        Ok(Self { schema, rows })
    }

    /// Construct a table from columns of equal length, in schema order.
    pub fn from_columns(schema: Schema, columns: Vec<Vec<Scalar>>) -> Result<Self> {
        if columns.len() != schema.len() {
            return Err(Error::InvalidInput(format!(
                "expected {} columns, got {}", schema.len(), columns.len()
            )));
        }
        let height = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().position(|c| c.len() != height) {
            return Err(Error::InvalidInput(format!(
                "column `{}` has {} values, expected {height}", schema.fields()[bad].name, columns[bad].len()
            )));
        }

        let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let rows = (0..height)
            .map(|_| iters.iter_mut().filter_map(Iterator::next).collect())
            .collect();
        Self::new(schema, rows)
    }

    #[inline] pub fn schema(&self) -> &Schema { &self.schema }

    #[inline] pub fn rows(&self) -> &[Vec<Scalar>] { &self.rows }

    /// Number of rows.
    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn row(&self, i: usize) -> Option<&[Scalar]> { self.rows.get(i).map(Vec::as_slice) }

    /// Look up a single value by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Result<&Scalar> {
        let col = self.schema.position(column).ok_or_else(|| Error::UnknownColumn(column.to_string()))?;
        self.rows.get(row)
            .map(|r| &r[col])
            .ok_or_else(|| Error::InvalidInput(format!("row {row} out of range ({} rows)", self.len())))
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Scalar>> {
        let col = self.schema.position(name).ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| &r[col]).collect())
    }

    /// Build a new table from the rows at `indices`, in that order.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Convert a text column into a categorical column over `levels`.
    /// Every non-null label must be one of the levels.
    pub fn with_categorical(mut self, column: &str, levels: Levels) -> Result<Self> {
        let field = self.schema.field(column).ok_or_else(|| Error::UnknownColumn(column.to_string()))?;
        if field.ty != ColumnType::Text {
            return Err(Error::InvalidInput(format!(
                "column `{column}` is {}, only text columns can become categorical", field.ty
            )));
        }
        let col = self.schema.position(column).ok_or_else(|| Error::UnknownColumn(column.to_string()))?;

        for row in &mut self.rows {
            let value = std::mem::replace(&mut row[col], Scalar::Null);
            row[col] = match value {
                Scalar::Text(label) if levels.index_of(&label).is_some() => Scalar::Categorical(label),
                Scalar::Text(label) => return Err(Error::InvalidInput(format!(
                    "`{label}` in column `{column}` is not one of the levels [{}]", levels.labels().join(", ")
                ))),
                other => other,
            };
        }

        Arc::make_mut(&mut self.schema).retype(column, ColumnType::Categorical(levels))?;
        Ok(self)
    }
}

fn check_row(schema: &Schema, i: usize, row: &[Scalar]) -> Result<()> {
    if row.len() != schema.len() {
        return Err(Error::InvalidInput(format!(
            "row {i} has {} values, schema has {} columns", row.len(), schema.len()
        )));
    }
    for (field, value) in schema.fields().iter().zip(row) {
        if !field.ty.admits(value) {
            return Err(Error::InvalidInput(format!(
                "row {i}: {} value `{value}` does not fit {} column `{}`", value.kind(), field.ty, field.name
            )));
        }
    }
    Ok(())
}
