use std::borrow::Cow;

use ahash::AHashSet;

use crate::{error::{Error, Result}, geom::SourceId};

/// Encoding of source ids as membership-matrix column names.
pub trait IdFormat {
    fn encode(&self, id: SourceId) -> String;

    /// Recover the id from a column name, or `None` if the name is not in
    /// this format.
    fn decode(&self, column: &str) -> Option<SourceId>;
}

/// Column names of the form `<prefix><id>`, e.g. `ID.7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixed {
    prefix: Cow<'static, str>,
}

impl Prefixed {
    /// The `ID.<n>` convention.
    pub const DEFAULT: Prefixed = Prefixed { prefix: Cow::Borrowed("ID.") };

    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: Cow::Owned(prefix.into()) }
    }

    #[inline] pub fn prefix(&self) -> &str { &self.prefix }
}

impl Default for Prefixed {
    fn default() -> Self { Self::DEFAULT }
}

impl IdFormat for Prefixed {
    fn encode(&self, id: SourceId) -> String {
        format!("{}{}", self.prefix, id.0)
    }

    fn decode(&self, column: &str) -> Option<SourceId> {
        column.strip_prefix(&*self.prefix)?.parse().ok().map(SourceId)
    }
}

/// Indicator table produced by a self-union: one row per merged geometry,
/// one column per source geometry. A cell is `true` iff that source
/// contributed to that merged geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl MembershipMatrix {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<bool>>) -> Self {
        Self { columns, rows }
    }

    /// Build a matrix with one column per entry of `ids` from per-row source lists.
    pub fn from_sources(format: &dyn IdFormat, ids: &[SourceId], sources: &[Vec<SourceId>]) -> Self {
        Self {
            columns: ids.iter().map(|&id| format.encode(id)).collect(),
            rows: sources.iter()
                .map(|row| ids.iter().map(|id| row.contains(id)).collect())
                .collect(),
        }
    }

    #[inline] pub fn columns(&self) -> &[String] { &self.columns }

    #[inline] pub fn rows(&self) -> &[Vec<bool>] { &self.rows }

    #[inline] pub fn num_rows(&self) -> usize { self.rows.len() }
}

/// For each matrix row (merged geometry), the ids of the sources that
/// contributed to it, in ascending numeric order.
///
/// The id order is independent of column order; the outer order follows the
/// matrix rows.
pub fn extract_membership(matrix: &MembershipMatrix, format: &dyn IdFormat) -> Result<Vec<Vec<SourceId>>> {
    if matrix.columns.is_empty() {
        return Err(Error::InvalidInput("membership matrix has no columns".into()));
    }

    let mut seen = AHashSet::with_capacity(matrix.columns.len());
    let ids = matrix.columns.iter()
        .map(|column| {
            let id = format.decode(column)
                .ok_or_else(|| Error::InvalidInput(format!("cannot decode a source id from column `{column}`")))?;
            if !seen.insert(id) {
                return Err(Error::InvalidInput(format!("source id {id} appears in more than one column")));
            }
            Ok(id)
        })
        .collect::<Result<Vec<_>>>()?;

    matrix.rows.iter().enumerate()
        .map(|(r, row)| {
            if row.len() != ids.len() {
                return Err(Error::InvalidInput(format!(
                    "membership row {r} has {} cells, expected {}", row.len(), ids.len()
                )));
            }
            let mut members: Vec<SourceId> = ids.iter().zip(row)
                .filter_map(|(&id, &present)| present.then_some(id))
                .collect();
            if members.is_empty() {
                return Err(Error::InvalidInput(format!("membership row {r} has no contributing source")));
            }
            members.sort_unstable();
            Ok(members)
        })
        .collect()
}
