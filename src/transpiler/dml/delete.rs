//! DELETE CQL generation.

use crate::ast::*;
use crate::error::CqlResult;
use crate::transpiler::RenderedStatement;

use super::{push_clause, require_table};

/// Generate DELETE CQL: the whole row, or only `delete_columns` when given.
pub fn build_delete(cmd: &QueryDescriptor) -> CqlResult<RenderedStatement> {
    let table = require_table(cmd)?;

    let mut cql = String::from("delete");
    push_clause(&mut cql, &cmd.delete_columns.join(", "));
    cql.push_str(" from ");
    cql.push_str(table);
    push_clause(&mut cql, &cmd.where_fragment);

    Ok(RenderedStatement::new(
        Operation::Delete,
        cql,
        cmd.where_bindings.clone(),
    ))
}
