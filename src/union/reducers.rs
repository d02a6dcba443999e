//! Ready-made reduction functions for [`reduce`](super::reduce).
//!
//! All of them skip `Null` inputs. Categorical columns reach these functions
//! as numeric level indices, so `min`/`max` follow level order.

use std::cmp::Ordering;

use crate::data::Scalar;

/// Sum of numeric values; `0` when there are none.
pub fn sum(values: &[Scalar]) -> Scalar {
    Scalar::Numeric(values.iter().filter_map(Scalar::as_f64).sum())
}

/// Arithmetic mean of numeric values; `Null` when there are none.
pub fn mean(values: &[Scalar]) -> Scalar {
    let (total, n) = values.iter()
        .filter_map(Scalar::as_f64)
        .fold((0.0, 0usize), |(total, n), x| (total + x, n + 1));
    if n == 0 { Scalar::Null } else { Scalar::Numeric(total / n as f64) }
}

pub fn max(values: &[Scalar]) -> Scalar {
    extreme(values, Ordering::Greater)
}

pub fn min(values: &[Scalar]) -> Scalar {
    extreme(values, Ordering::Less)
}

/// First non-null value.
pub fn first(values: &[Scalar]) -> Scalar {
    values.iter().find(|v| !v.is_null()).cloned().unwrap_or(Scalar::Null)
}

/// Number of non-null values.
pub fn count(values: &[Scalar]) -> Scalar {
    Scalar::Numeric(values.iter().filter(|v| !v.is_null()).count() as f64)
}

fn extreme(values: &[Scalar], keep: Ordering) -> Scalar {
    values.iter()
        .filter(|v| !v.is_null())
        .fold(None::<&Scalar>, |best, v| match best {
            Some(b) if compare(v, b) != Some(keep) => Some(b),
            _ => Some(v),
        })
        .cloned()
        .unwrap_or(Scalar::Null)
}

fn compare(a: &Scalar, b: &Scalar) -> Option<Ordering> {
    match (a, b) {
        (Scalar::Numeric(x), Scalar::Numeric(y)) => x.partial_cmp(y),
        (Scalar::Text(x), Scalar::Text(y)) | (Scalar::Categorical(x), Scalar::Categorical(y)) => Some(x.cmp(y)),
        (Scalar::Boolean(x), Scalar::Boolean(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(xs: &[f64]) -> Vec<Scalar> { xs.iter().map(|&x| Scalar::Numeric(x)).collect() }

    #[test]
    fn sum_and_mean_skip_nulls() {
        let values = vec![Scalar::Numeric(2.0), Scalar::Null, Scalar::Numeric(4.0)];
        assert_eq!(sum(&values), Scalar::Numeric(6.0));
        assert_eq!(mean(&values), Scalar::Numeric(3.0));
        assert_eq!(mean(&[Scalar::Null]), Scalar::Null);
        assert_eq!(sum(&[]), Scalar::Numeric(0.0));
    }

    #[test]
    fn min_max_numeric() {
        assert_eq!(max(&nums(&[3.0, 9.0, 1.0])), Scalar::Numeric(9.0));
        assert_eq!(min(&nums(&[3.0, 9.0, 1.0])), Scalar::Numeric(1.0));
        assert_eq!(max(&[]), Scalar::Null);
    }

    #[test]
    fn min_max_text_and_boolean() {
        let words = vec![Scalar::from("pine"), Scalar::from("aspen"), Scalar::from("spruce")];
        assert_eq!(max(&words), Scalar::from("spruce"));
        assert_eq!(min(&words), Scalar::from("aspen"));
        assert_eq!(max(&[Scalar::Boolean(false), Scalar::Boolean(true)]), Scalar::Boolean(true));
    }

    #[test]
    fn first_and_count() {
        let values = vec![Scalar::Null, Scalar::from("a"), Scalar::from("b")];
        assert_eq!(first(&values), Scalar::from("a"));
        assert_eq!(count(&values), Scalar::Numeric(2.0));
    }
}
