use crate::error::{Error, Result};
use crate::expand::expand_slice;
use crate::value::Value;

/// One declared parameter of a query, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A single scalar value, including an explicit `Value::Null`
    /// for optional parameters.
    Scalar(Value),
    /// A variable-arity list substituted into the template's
    /// `(/*SLICE:name*/?)` marker at call time.
    Slice {
        name: &'static str,
        values: Vec<Value>,
    },
}

/// A statement ready for execution: expanded SQL text plus the flat,
/// positionally aligned argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Flattens declared parameters into a [`BoundStatement`].
///
/// Parameters are consumed in declared order; declared position is the
/// parameter's ordinal in the template. Scalars append their value
/// as-is. Slices expand the template (exactly once per slice, before
/// execution) and append every element in the caller's order, with no
/// reordering and no deduplication.
///
/// Templates usually carry at most one slice marker. More than one is
/// supported: slices are expanded in declared order and each later
/// parameter's ordinal accounts for the placeholders the earlier
/// expansions inserted, so the statement stays internally consistent.
///
/// When declared ordinals run contiguously from 1, the expanded
/// statement's placeholder count equals `args.len()`.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] when a slice parameter receives
/// an empty list. No backend is involved at this stage.
pub fn bind(template: &str, params: Vec<Param>) -> Result<BoundStatement> {
    let mut sql = template.to_owned();
    let mut args = Vec::with_capacity(params.len());
    let mut shift = 0usize;

    for (position, param) in params.into_iter().enumerate() {
        match param {
            Param::Scalar(value) => args.push(value),
            Param::Slice { name, values } => {
                if values.is_empty() {
                    return Err(Error::InvalidArguments(format!(
                        "slice parameter '{name}' received an empty list"
                    )));
                }
                let ordinal = position + 1 + shift;
                sql = expand_slice(&sql, name, ordinal, values.len())?;
                shift += values.len() - 1;
                args.extend(values);
            }
        }
    }

    Ok(BoundStatement { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_scalars_in_declared_order() {
        let stmt = bind(
            "INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)",
            vec![
                Param::Scalar(Value::from("u2")),
                Param::Scalar(Value::from("Bo")),
                Param::Scalar(Value::Null),
            ],
        )
        .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)"
        );
        assert_eq!(
            stmt.args,
            vec![Value::from("u2"), Value::from("Bo"), Value::Null]
        );
    }

    #[test]
    fn test_bind_slice_expands_and_flattens() {
        let stmt = bind(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            vec![Param::Slice {
                name: "ids",
                values: vec![Value::from("a"), Value::from("b"), Value::from("c")],
            }],
        )
        .unwrap();
        assert_eq!(stmt.sql, "SELECT pk FROM account WHERE id IN (?1, ?2, ?3)");
        assert_eq!(
            stmt.args,
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn test_bind_slice_between_scalars() {
        let stmt = bind(
            "SELECT id FROM foo WHERE a = ?1 AND id IN (/*SLICE:ids*/?) AND b = ?3",
            vec![
                Param::Scalar(Value::from(10)),
                Param::Slice {
                    name: "ids",
                    values: vec![Value::from("x"), Value::from("y")],
                },
                Param::Scalar(Value::from(20)),
            ],
        )
        .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id FROM foo WHERE a = ?1 AND id IN (?2, ?3) AND b = ?4"
        );
        // Flat list aligns positionally with ?1..?4.
        assert_eq!(
            stmt.args,
            vec![
                Value::from(10),
                Value::from("x"),
                Value::from("y"),
                Value::from(20)
            ]
        );
    }

    #[test]
    fn test_bind_preserves_slice_order() {
        let values: Vec<Value> = ["c", "a", "b", "a"].iter().map(|&s| s.into()).collect();
        let stmt = bind(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            vec![Param::Slice {
                name: "ids",
                values: values.clone(),
            }],
        )
        .unwrap();
        // Original order, duplicates kept.
        assert_eq!(stmt.args, values);
    }

    #[test]
    fn test_bind_two_slices_tracks_cumulative_shift() {
        let stmt = bind(
            "SELECT id FROM foo WHERE a IN (/*SLICE:xs*/?) AND b IN (/*SLICE:ys*/?)",
            vec![
                Param::Slice {
                    name: "xs",
                    values: vec![Value::from(1), Value::from(2), Value::from(3)],
                },
                Param::Slice {
                    name: "ys",
                    values: vec![Value::from(4), Value::from(5)],
                },
            ],
        )
        .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id FROM foo WHERE a IN (?1, ?2, ?3) AND b IN (?4, ?5)"
        );
        assert_eq!(stmt.args.len(), 5);
    }

    #[test]
    fn test_bind_counts_match() {
        // Fixed scalar count + L, for varying L.
        for len in 1..=5 {
            let values = (0..len).map(|i| Value::from(i as i64)).collect::<Vec<_>>();
            let stmt = bind(
                "SELECT id FROM foo WHERE a = ?1 AND id IN (/*SLICE:ids*/?)",
                vec![Param::Scalar(Value::from(1)), Param::Slice { name: "ids", values }],
            )
            .unwrap();
            assert_eq!(stmt.args.len(), 1 + len);
        }
    }

    #[test]
    fn test_bind_empty_slice_is_invalid() {
        let err = bind(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            vec![Param::Slice {
                name: "ids",
                values: vec![],
            }],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }
}
