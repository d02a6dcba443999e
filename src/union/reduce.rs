use crate::{
    data::{AttributeTable, ColumnType, Levels, Scalar},
    error::{Error, Result},
};

/// One reduced value per merged geometry, typed like the source column.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedColumn {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<Scalar>,
}

/// [`reduce_with`] for functions that take no extra arguments.
pub fn reduce<F>(carriers: &[AttributeTable], column: &str, f: F) -> Result<ReducedColumn>
where
    F: Fn(&[Scalar]) -> Scalar,
{
    reduce_with(carriers, column, |values, _: &()| f(values), &())
}

/// Reduce `column` of every carrier to a single scalar with `f`, passing
/// `args` to every call.
///
/// The column type is read once, from the first carrier, and all carriers are
/// trusted to share it; values are not re-checked row by row.
///
/// Categorical columns are presented to `f` as `Numeric` level indices, so
/// numeric reducers like `max` work on level order. `f` must answer with a
/// whole index inside the level set (or `Null`), which is mapped back to its
/// label. Native columns are passed through unchanged and `f` must answer
/// with the same scalar type (or `Null`); a `Boolean` answer for a numeric
/// column is widened to 0 or 1.
pub fn reduce_with<F, A>(carriers: &[AttributeTable], column: &str, f: F, args: &A) -> Result<ReducedColumn>
where
    F: Fn(&[Scalar], &A) -> Scalar,
    A: ?Sized,
{
    let first = carriers.first()
        .ok_or_else(|| Error::InvalidInput("no carriers to reduce".into()))?;
    let ty = first.schema().field(column)
        .ok_or_else(|| Error::UnknownColumn(column.to_string()))?
        .ty.clone();

    let values = carriers.iter().enumerate()
        .map(|(i, carrier)| {
            if carrier.is_empty() {
                return Err(Error::InvalidInput(format!("carrier {i} has no rows")));
            }
            let cells = carrier.column(column)?;
            let out = match &ty {
                ColumnType::Categorical(levels) => {
                    let indices = cells.into_iter()
                        .map(|cell| to_index(cell, levels))
                        .collect::<Result<Vec<_>>>()?;
                    from_index(f(&indices, args), levels, column)?
                }
                native => {
                    let values: Vec<Scalar> = cells.into_iter().cloned().collect();
                    coerce(f(&values, args), native, column)?
                }
            };
            Ok(out)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ReducedColumn { name: column.to_string(), ty, values })
}

fn to_index(cell: &Scalar, levels: &Levels) -> Result<Scalar> {
    match cell {
        Scalar::Null => Ok(Scalar::Null),
        Scalar::Categorical(label) => levels.index_of(label)
            .map(|i| Scalar::Numeric(i as f64))
            .ok_or_else(|| Error::InvalidInput(format!("`{label}` is not a level of the reduced column"))),
        other => Err(Error::InvalidInput(format!("{} value `{other}` in a categorical column", other.kind()))),
    }
}

fn from_index(result: Scalar, levels: &Levels, column: &str) -> Result<Scalar> {
    let mismatch = |found: String| Error::ReductionType {
        column: column.to_string(),
        expected: format!("a level index in 0..{}", levels.len()),
        found,
    };
    match result {
        Scalar::Null => Ok(Scalar::Null),
        Scalar::Numeric(x) if x.fract() == 0.0 && x >= 0.0 => levels.label(x as usize)
            .map(|label| Scalar::Categorical(label.to_string()))
            .ok_or_else(|| mismatch(format!("index {x}"))),
        other => Err(mismatch(format!("{} `{other}`", other.kind()))),
    }
}

fn coerce(result: Scalar, ty: &ColumnType, column: &str) -> Result<Scalar> {
    match (ty, result) {
        (_, Scalar::Null) => Ok(Scalar::Null),
        (ColumnType::Numeric, Scalar::Numeric(x)) => Ok(Scalar::Numeric(x)),
        (ColumnType::Numeric, Scalar::Boolean(b)) => Ok(Scalar::Numeric(if b { 1.0 } else { 0.0 })),
        (ColumnType::Text, Scalar::Text(s)) => Ok(Scalar::Text(s)),
        (ColumnType::Boolean, Scalar::Boolean(b)) => Ok(Scalar::Boolean(b)),
        (ty, other) => Err(Error::ReductionType {
            column: column.to_string(),
            expected: ty.to_string(),
            found: format!("{} `{other}`", other.kind()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::Schema, union::reducers};

    fn numeric(groups: &[&[f64]]) -> Vec<AttributeTable> {
        groups.iter()
            .map(|rows| {
                let schema = Schema::new([("n", ColumnType::Numeric)]).unwrap();
                AttributeTable::new(schema, rows.iter().map(|&x| vec![Scalar::Numeric(x)]).collect()).unwrap()
            })
            .collect()
    }

    fn risk(groups: &[&[&str]]) -> Vec<AttributeTable> {
        let levels = Levels::new(["low", "high"], true).unwrap();
        groups.iter()
            .map(|rows| {
                let schema = Schema::new([("risk", ColumnType::Text)]).unwrap();
                AttributeTable::new(schema, rows.iter().map(|&s| vec![Scalar::from(s)]).collect()).unwrap()
                    .with_categorical("risk", levels.clone()).unwrap()
            })
            .collect()
    }

    fn native(column: &str, ty: ColumnType, groups: &[&[Scalar]]) -> Vec<AttributeTable> {
        groups.iter()
            .map(|rows| {
                let schema = Schema::new([(column, ty.clone())]).unwrap();
                AttributeTable::new(schema, rows.iter().map(|v| vec![v.clone()]).collect()).unwrap()
            })
            .collect()
    }

    #[test]
    fn numeric_sum_single_carrier() {
        let out = reduce(&numeric(&[&[2.0, 3.0]]), "n", reducers::sum).unwrap();
        assert_eq!(out.values, vec![Scalar::Numeric(5.0)]);
        assert_eq!(out.ty, ColumnType::Numeric);
    }

    #[test]
    fn numeric_sum_keeps_carrier_order() {
        let out = reduce(&numeric(&[&[2.0, 3.0], &[10.0]]), "n", reducers::sum).unwrap();
        assert_eq!(out.values, vec![Scalar::Numeric(5.0), Scalar::Numeric(10.0)]);
    }

    #[test]
    fn categorical_max_returns_label() {
        let carriers = risk(&[&["low", "high"]]);
        let out = reduce(&carriers, "risk", reducers::max).unwrap();
        assert_eq!(out.values, vec![Scalar::Categorical("high".into())]);
        match out.ty {
            ColumnType::Categorical(levels) => {
                assert_eq!(levels.labels(), &["low".to_string(), "high".to_string()]);
                assert!(levels.ordered());
            }
            other => panic!("lost categorical type: {other}"),
        }
    }

    #[test]
    fn categorical_min_per_carrier() {
        let carriers = risk(&[&["high", "low"], &["high"]]);
        let out = reduce(&carriers, "risk", reducers::min).unwrap();
        assert_eq!(out.values, vec![Scalar::Categorical("low".into()), Scalar::Categorical("high".into())]);
    }

    #[test]
    fn categorical_out_of_range_index_is_rejected() {
        let carriers = risk(&[&["low"]]);
        let err = reduce(&carriers, "risk", |_| Scalar::Numeric(7.0)).unwrap_err();
        assert!(matches!(err, Error::ReductionType { .. }));

        let err = reduce(&carriers, "risk", |_| Scalar::Numeric(0.5)).unwrap_err();
        assert!(matches!(err, Error::ReductionType { .. }));
    }

    #[test]
    fn extra_args_reach_every_call() {
        let scale = |values: &[Scalar], factor: &f64| {
            Scalar::Numeric(values.iter().filter_map(Scalar::as_f64).sum::<f64>() * factor)
        };
        let out = reduce_with(&numeric(&[&[1.0, 2.0], &[4.0]]), "n", scale, &10.0).unwrap();
        assert_eq!(out.values, vec![Scalar::Numeric(30.0), Scalar::Numeric(40.0)]);
    }

    #[test]
    fn wrong_result_type_is_rejected() {
        let err = reduce(&numeric(&[&[1.0]]), "n", |_| Scalar::Text("one".into())).unwrap_err();
        assert!(matches!(err, Error::ReductionType { .. }));
    }

    #[test]
    fn boolean_widens_into_numeric() {
        let out = reduce(&numeric(&[&[1.0]]), "n", |_| Scalar::Boolean(true)).unwrap();
        assert_eq!(out.values, vec![Scalar::Numeric(1.0)]);
    }

    #[test]
    fn null_result_passes_through() {
        let out = reduce(&risk(&[&["low"]]), "risk", |_| Scalar::Null).unwrap();
        assert_eq!(out.values, vec![Scalar::Null]);
    }

    #[test]
    fn unknown_column() {
        let err = reduce(&numeric(&[&[1.0]]), "area", reducers::sum).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(_)));
    }

    #[test]
    fn empty_carrier_list() {
        let err = reduce(&[], "n", reducers::sum).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn empty_carrier() {
        let err = reduce(&numeric(&[&[1.0], &[]]), "n", reducers::sum).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn text_max_per_carrier() {
        let carriers = native("species", ColumnType::Text, &[
            &[Scalar::from("pine"), Scalar::from("spruce"), Scalar::from("aspen")],
            &[Scalar::from("fir")],
        ]);
        let out = reduce(&carriers, "species", reducers::max).unwrap();
        assert_eq!(out.ty, ColumnType::Text);
        assert_eq!(out.values, vec![Scalar::Text("spruce".into()), Scalar::Text("fir".into())]);
    }

    #[test]
    fn boolean_first_skips_nulls() {
        let carriers = native("coastal", ColumnType::Boolean, &[
            &[Scalar::Null, Scalar::Boolean(true), Scalar::Boolean(false)],
            &[Scalar::Boolean(false)],
        ]);
        let out = reduce(&carriers, "coastal", reducers::first).unwrap();
        assert_eq!(out.ty, ColumnType::Boolean);
        assert_eq!(out.values, vec![Scalar::Boolean(true), Scalar::Boolean(false)]);
    }

    #[test]
    fn numeric_result_on_text_column_is_rejected() {
        let carriers = native("species", ColumnType::Text, &[&[Scalar::from("pine")]]);
        let err = reduce(&carriers, "species", reducers::count).unwrap_err();
        match err {
            Error::ReductionType { column, expected, .. } => {
                assert_eq!(column, "species");
                assert_eq!(expected, ColumnType::Text.to_string());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
