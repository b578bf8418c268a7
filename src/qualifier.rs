//! Qualifier stripping for raw CQL.
//!
//! CQL rejects `table.column` references, but queries written by hand (or
//! for another backend) often qualify columns in `where`/`set` clauses.
//!
//! ```text
//! select * from ks.users where users.id = ?
//!               ───┬────       ──┬──
//!                  │             └── qualifier, stripped
//!                  └── bare table name is the last segment: users
//! ```

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace1, satisfy},
    combinator::peek,
    sequence::terminated,
};

use crate::error::{CqlError, CqlResult};

/// Remove `table.` from column references once the query is known to use them.
///
/// The table comes from the first `from <name>` or `update <name>` clause;
/// for `keyspace.table` only `table` counts. Nothing is rewritten unless a
/// qualified reference follows a `where` or `set` keyword, in which case every
/// `table.<identifier>` in the query loses its prefix (table name matched
/// case-insensitively).
pub fn strip_qualifiers(query: &str) -> CqlResult<String> {
    let full_name = find_table_name(query)
        .ok_or_else(|| CqlError::TableNameNotFound(query.to_string()))?;

    let table = match full_name.rsplit('.').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => return Ok(query.to_string()),
    };

    if !qualified_after_clause(query, table) {
        return Ok(query.to_string());
    }

    let stripped = strip_all(query, table);
    tracing::debug!(table, "stripped qualifiers: {}", stripped);
    Ok(stripped)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_table_char(c: char) -> bool {
    is_word_char(c) || c == '.'
}

/// `from <name>` / `update <name>`, yielding the (possibly dotted) name.
fn table_clause(input: &str) -> IResult<&str, &str> {
    let (input, _) = alt((tag_no_case("from"), tag_no_case("update")))(input)?;
    let (input, _) = multispace1(input)?;
    take_while1(is_table_char)(input)
}

/// `where ` / `set `.
fn clause_keyword(input: &str) -> IResult<&str, &str> {
    terminated(alt((tag_no_case("where"), tag_no_case("set"))), multispace1)(input)
}

/// `<table>.`
fn qualifier_prefix<'a>(input: &'a str, table: &str) -> IResult<&'a str, char> {
    let (input, _) = tag_no_case(table)(input)?;
    char('.')(input)
}

/// `<table>.` directly followed by an identifier character.
fn qualified_column<'a>(input: &'a str, table: &str) -> IResult<&'a str, char> {
    let (input, dot) = qualifier_prefix(input, table)?;
    let (input, _) = peek(satisfy(is_word_char))(input)?;
    Ok((input, dot))
}

/// Byte offsets where a word starts.
fn word_starts(query: &str) -> impl Iterator<Item = usize> + '_ {
    let mut prev: Option<char> = None;
    query.char_indices().filter_map(move |(i, c)| {
        let starts = is_word_char(c) && !prev.is_some_and(is_word_char);
        prev = Some(c);
        starts.then_some(i)
    })
}

fn find_table_name(query: &str) -> Option<&str> {
    word_starts(query).find_map(|i| table_clause(&query[i..]).ok().map(|(_, name)| name))
}

fn qualified_after_clause(query: &str, table: &str) -> bool {
    let clause_body = word_starts(query).find_map(|i| {
        clause_keyword(&query[i..])
            .ok()
            .map(|(rest, _)| query.len() - rest.len())
    });

    match clause_body {
        Some(start) => word_starts(query)
            .filter(|&i| i >= start)
            .any(|i| qualified_column(&query[i..], table).is_ok()),
        None => false,
    }
}

fn strip_all(query: &str, table: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut rest = query;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if !prev.is_some_and(is_word_char) {
            if let Ok((after, _)) = qualified_column(rest, table) {
                // `prev` still precedes the identifier, so chained prefixes go too.
                rest = after;
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_where_qualifier() {
        assert_eq!(
            strip_qualifiers("select * from users where users.id = ?").unwrap(),
            "select * from users where id = ?"
        );
    }

    #[test]
    fn test_unqualified_is_unchanged() {
        let q = "select * from users where id = ?";
        assert_eq!(strip_qualifiers(q).unwrap(), q);
    }

    #[test]
    fn test_keyspace_prefix_uses_last_segment() {
        assert_eq!(
            strip_qualifiers("select users.name from app.users where users.id = 1").unwrap(),
            "select name from app.users where id = 1"
        );
    }

    #[test]
    fn test_update_set_clause() {
        assert_eq!(
            strip_qualifiers("UPDATE Users SET users.name = 'x' WHERE USERS.id = 3").unwrap(),
            "UPDATE Users SET name = 'x' WHERE id = 3"
        );
    }

    #[test]
    fn test_qualifier_only_in_projection_is_kept() {
        let q = "select users.name from users where id = 1";
        assert_eq!(strip_qualifiers(q).unwrap(), q);
    }

    #[test]
    fn test_dangling_prefix_is_not_a_reference() {
        let query = "select users.id from users where users. = ?";
        assert_eq!(strip_qualifiers(query).unwrap(), query);
    }

    #[test]
    fn test_other_table_prefix_is_kept() {
        assert_eq!(
            strip_qualifiers("select * from users where users.id = 1 and accounts.id = 2").unwrap(),
            "select * from users where id = 1 and accounts.id = 2"
        );
    }

    #[test]
    fn test_suffix_match_is_not_a_qualifier() {
        let q = "select * from users where superusers.id = 1";
        assert_eq!(strip_qualifiers(q).unwrap(), q);
    }

    #[test]
    fn test_chained_prefix() {
        assert_eq!(
            strip_qualifiers("select * from users where users.users.id = 1").unwrap(),
            "select * from users where id = 1"
        );
    }

    #[test]
    fn test_missing_table() {
        let err = strip_qualifiers("truncate users").unwrap_err();
        assert!(matches!(err, CqlError::TableNameNotFound(_)));
    }

    #[test]
    fn test_idempotent() {
        let once = strip_qualifiers("delete from ks.t where t.a = 1 and t.b = 2").unwrap();
        assert_eq!(once, "delete from ks.t where a = 1 and b = 2");
        assert_eq!(strip_qualifiers(&once).unwrap(), once);
    }
}
