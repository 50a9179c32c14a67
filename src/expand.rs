use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Builds the `(/*SLICE:name*/?)` marker text for a parameter name.
fn slice_marker(name: &str) -> String {
    format!("(/*SLICE:{name}*/?)")
}

/// Expands the variable-arity slice marker for `name` into `len`
/// concrete positional placeholders.
///
/// The compiled template carries ordinal placeholders (`?1`, `?2`, …)
/// and renders a slice parameter as `(/*SLICE:name*/?)`. SQLite cannot
/// bind an array to a single placeholder, so the marker is rewritten at
/// call time, once the list length is known.
///
/// The marker's ordinal is `ordinal` (its position in the declared
/// parameter order). It is replaced by a parenthesized run of `len`
/// contiguous placeholders starting at that ordinal, and every ordinal
/// greater than `ordinal` elsewhere in the statement is shifted up by
/// `len - 1`. Contiguous numbering keeps placeholder position equal to
/// bound-list position, and makes expansion a pure function of its
/// inputs: backends that cache prepared statements by text see one
/// statement per (template, length) pair.
///
/// # Examples
///
/// ```
/// use querybind::expand::expand_slice;
///
/// let sql = expand_slice(
///     "SELECT id FROM foo WHERE a = ?1 AND id IN (/*SLICE:ids*/?) AND b = ?3",
///     "ids",
///     2,
///     3,
/// )?;
/// assert_eq!(
///     sql,
///     "SELECT id FROM foo WHERE a = ?1 AND id IN (?2, ?3, ?4) AND b = ?5"
/// );
/// # Ok::<(), querybind::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] when `len` is zero (an empty
/// IN-list is a usage error, not an expandable statement) and
/// [`Error::MissingSliceMarker`] when the template has no marker for
/// `name`.
pub fn expand_slice(template: &str, name: &str, ordinal: usize, len: usize) -> Result<String> {
    if len == 0 {
        return Err(Error::InvalidArguments(format!(
            "slice parameter '{name}' requires at least one value"
        )));
    }
    let marker = slice_marker(name);
    if !template.contains(&marker) {
        return Err(Error::MissingSliceMarker(name.to_owned()));
    }

    let shift = len - 1;
    let renumbered = if shift > 0 {
        Regex::new(r"\?(\d+)")?
            .replace_all(template, |caps: &Captures| {
                let k: usize = caps[1].parse().unwrap_or(0);
                if k > ordinal {
                    format!("?{}", k + shift)
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned()
    } else {
        template.to_owned()
    };

    let placeholders = (ordinal..ordinal + len)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(renumbered.replace(&marker, &format!("({placeholders})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_marker_only() {
        let sql = expand_slice(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            "ids",
            1,
            3,
        )
        .unwrap();
        assert_eq!(sql, "SELECT pk FROM account WHERE id IN (?1, ?2, ?3)");
    }

    #[test]
    fn test_expand_single_element() {
        let sql = expand_slice(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            "ids",
            1,
            1,
        )
        .unwrap();
        assert_eq!(sql, "SELECT pk FROM account WHERE id IN (?1)");
    }

    #[test]
    fn test_expand_shifts_later_ordinals() {
        let sql = expand_slice(
            "SELECT id FROM foo WHERE a = ?1 AND id IN (/*SLICE:ids*/?) AND b = ?3",
            "ids",
            2,
            3,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT id FROM foo WHERE a = ?1 AND id IN (?2, ?3, ?4) AND b = ?5"
        );
    }

    #[test]
    fn test_expand_leaves_earlier_ordinals_alone() {
        let sql = expand_slice(
            "UPDATE foo SET a = ?1, b = ?2 WHERE id IN (/*SLICE:ids*/?)",
            "ids",
            3,
            2,
        )
        .unwrap();
        assert_eq!(sql, "UPDATE foo SET a = ?1, b = ?2 WHERE id IN (?3, ?4)");
    }

    #[test]
    fn test_expand_is_deterministic() {
        let template = "SELECT id FROM foo WHERE id IN (/*SLICE:ids*/?) AND b = ?2";
        let first = expand_slice(template, "ids", 1, 4).unwrap();
        let second = expand_slice(template, "ids", 1, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expanded_placeholder_count() {
        // One fixed placeholder plus L expanded ones.
        for len in 1..=8 {
            let sql = expand_slice(
                "SELECT id FROM foo WHERE id IN (/*SLICE:ids*/?) AND b = ?2",
                "ids",
                1,
                len,
            )
            .unwrap();
            let count = Regex::new(r"\?\d+").unwrap().find_iter(&sql).count();
            assert_eq!(count, 1 + len);
        }
    }

    #[test]
    fn test_expand_empty_list_is_rejected() {
        let err = expand_slice(
            "SELECT pk FROM account WHERE id IN (/*SLICE:ids*/?)",
            "ids",
            1,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_expand_missing_marker_is_rejected() {
        let err = expand_slice("SELECT pk FROM account WHERE id = ?1", "ids", 1, 2).unwrap_err();
        assert!(matches!(err, Error::MissingSliceMarker(name) if name == "ids"));
    }
}
