use std::{fmt, sync::Arc};

use ahash::AHashMap;

use crate::error::{Error, Result};
use super::Scalar;

/// The level set of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Levels {
    labels: Arc<[String]>,
    ordered: bool,
}

impl Levels {
    /// Build a level set; labels must be unique.
    pub fn new<I, S>(labels: I, ordered: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::InvalidInput("categorical level set is empty".into()));
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(Error::InvalidInput(format!("duplicate categorical level `{label}`")));
            }
        }
        Ok(Self { labels: labels.into(), ordered })
    }

    #[inline] pub fn labels(&self) -> &[String] { &self.labels }

    #[inline] pub fn ordered(&self) -> bool { self.ordered }

    #[inline] pub fn len(&self) -> usize { self.labels.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Position of `label` in the level set.
    #[inline]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    #[inline]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

/// Declared type of an attribute column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
    Boolean,
    Categorical(Levels),
}

impl ColumnType {
    /// Whether `value` may be stored in a column of this type.
    pub fn admits(&self, value: &Scalar) -> bool {
        match (self, value) {
            (_, Scalar::Null) => true,
            (ColumnType::Numeric, Scalar::Numeric(_)) => true,
            (ColumnType::Text, Scalar::Text(_)) => true,
            (ColumnType::Boolean, Scalar::Boolean(_)) => true,
            (ColumnType::Categorical(levels), Scalar::Categorical(label)) => levels.index_of(label).is_some(),
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Boolean => write!(f, "boolean"),
            ColumnType::Categorical(levels) => {
                let kind = if levels.ordered() { "ordered categorical" } else { "categorical" };
                write!(f, "{kind}[{}]", levels.labels().join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: ColumnType,
}

/// Ordered, uniquely named column list.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
    index: AHashMap<String, usize>,
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool { self.fields == other.fields }
}

impl Schema {
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        let mut schema = Self::default();
        for (name, ty) in fields {
            schema.push(name.into(), ty)?;
        }
        Ok(schema)
    }

    fn push(&mut self, name: String, ty: ColumnType) -> Result<()> {
        if self.index.contains_key(&name) {
            return Err(Error::InvalidInput(format!("duplicate column `{name}`")));
        }
        self.index.insert(name.clone(), self.fields.len());
        self.fields.push(Field { name, ty });
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.fields.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    #[inline] pub fn fields(&self) -> &[Field] { &self.fields }

    /// Column position by name.
    #[inline] pub fn position(&self, name: &str) -> Option<usize> { self.index.get(name).copied() }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.position(name).map(|i| &self.fields[i])
    }

    /// Replace the type of an existing column.
    pub(crate) fn retype(&mut self, name: &str, ty: ColumnType) -> Result<()> {
        let i = self.position(name).ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        self.fields[i].ty = ty;
        Ok(())
    }
}
