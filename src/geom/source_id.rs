use std::fmt;

/// Identifies an original (pre-union) geometry within a `GeometrySet`.
///
/// Sets built with `GeometrySet::new` number their features from `1` in
/// feature order; callers may assign their own unique ids instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SourceId {
    fn from(value: u32) -> Self { Self(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(SourceId(42).to_string(), "42");
    }

    #[test]
    fn ordering_is_numeric() {
        let mut ids = vec![SourceId(10), SourceId(2), SourceId(1)];
        ids.sort();
        assert_eq!(ids, vec![SourceId(1), SourceId(2), SourceId(10)]);
    }
}
