//! Positional parameter binding.
//!
//! The statement text is scanned once, left to right, and every `?` is
//! replaced by the next value. Substituted text is never rescanned, so a
//! bound string containing `?` cannot capture a later value.
//!
//! Strings are quoted without escaping. This reproduces the textual binding
//! the statements were designed for and is unsafe for untrusted input; a
//! driver-native binder can be slotted in through [`Binder`].

use crate::ast::Scalar;
use crate::error::{CqlError, CqlResult};

/// Placeholder marker in rendered statements.
pub const PLACEHOLDER: char = '?';

/// Turns statement text and positional values into executable text.
pub trait Binder {
    fn bind(&self, text: &str, values: &[Scalar]) -> CqlResult<String>;
}

/// Inline textual substitution of `?` markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineBinder;

impl Binder for InlineBinder {
    fn bind(&self, text: &str, values: &[Scalar]) -> CqlResult<String> {
        let placeholders = count_placeholders(text);
        if placeholders > values.len() {
            return Err(CqlError::BindingCountMismatch {
                placeholders,
                values: values.len(),
            });
        }
        if values.len() > placeholders {
            tracing::debug!(
                placeholders,
                values = values.len(),
                "ignoring extra trailing bind values"
            );
        }

        let mut bound = String::with_capacity(text.len() + values.len() * 8);
        let mut next = values.iter();
        for c in text.chars() {
            if c == PLACEHOLDER {
                if let Some(value) = next.next() {
                    bound.push_str(&value.to_literal());
                    continue;
                }
            }
            bound.push(c);
        }
        Ok(bound)
    }
}

/// Bind with [`InlineBinder`].
pub fn bind(text: &str, values: &[Scalar]) -> CqlResult<String> {
    InlineBinder.bind(text, values)
}

pub fn count_placeholders(text: &str) -> usize {
    text.chars().filter(|&c| c == PLACEHOLDER).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bind_numeric_and_string() {
        let cql = bind(
            "select * from t where id = ? and name = ?",
            &[Scalar::from(5), Scalar::from("bob")],
        )
        .unwrap();
        assert_eq!(cql, "select * from t where id = 5 and name = 'bob'");
    }

    #[test]
    fn test_bind_float_bool_null() {
        let cql = bind(
            "update t set score = ?, active = ?, note = ? where id = ?",
            &[Scalar::from(9.5), Scalar::from(true), Scalar::Null, Scalar::from(1)],
        )
        .unwrap();
        assert_eq!(
            cql,
            "update t set score = 9.5, active = true, note = null where id = 1"
        );
    }

    #[test]
    fn test_too_few_values() {
        let err = bind("select * from t where a = ? and b = ?", &[Scalar::from(1)]).unwrap_err();
        assert!(matches!(
            err,
            CqlError::BindingCountMismatch {
                placeholders: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_extra_values_ignored() {
        let cql = bind("select * from t where a = ?", &[Scalar::from(1), Scalar::from(2)]).unwrap();
        assert_eq!(cql, "select * from t where a = 1");
    }

    #[test]
    fn test_bound_text_is_not_rescanned() {
        let cql = bind(
            "select * from t where a = ? and b = ?",
            &[Scalar::from("who?"), Scalar::from(2)],
        )
        .unwrap();
        assert_eq!(cql, "select * from t where a = 'who?' and b = 2");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(bind("select * from t", &[]).unwrap(), "select * from t");
    }
}
