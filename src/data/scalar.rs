use std::fmt;

/// A single attribute value.
///
/// Categorical values carry their label; the level set lives on the column
/// type in the [`Schema`](super::Schema).
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Numeric(f64),
    Text(String),
    Boolean(bool),
    Categorical(String),
}

impl Scalar {
    #[inline] pub fn is_null(&self) -> bool { matches!(self, Scalar::Null) }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Numeric(x) => Some(*x),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Numeric(_) => "numeric",
            Scalar::Text(_) => "text",
            Scalar::Boolean(_) => "boolean",
            Scalar::Categorical(_) => "categorical",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "NA"),
            Scalar::Numeric(x) => write!(f, "{x}"),
            Scalar::Text(s) | Scalar::Categorical(s) => write!(f, "{s}"),
            Scalar::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self { Scalar::Numeric(value) }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self { Scalar::Numeric(value as f64) }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self { Scalar::Boolean(value) }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self { Scalar::Text(value.to_string()) }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self { Scalar::Text(value) }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}
