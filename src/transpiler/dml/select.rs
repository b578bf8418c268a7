//! SELECT CQL generation.

use crate::ast::*;
use crate::error::CqlResult;
use crate::transpiler::RenderedStatement;

use super::{push_clause, require_table};

/// Generate SELECT CQL.
pub fn build_select(cmd: &QueryDescriptor) -> CqlResult<RenderedStatement> {
    let table = require_table(cmd)?;

    let columns = if cmd.projection.is_empty() {
        "*".to_string()
    } else {
        cmd.projection.join(", ")
    };

    let mut cql = format!("select {} from {}", columns, table);
    push_clause(&mut cql, &cmd.where_fragment);
    push_clause(&mut cql, &cmd.trailing);

    Ok(RenderedStatement::new(
        Operation::Select,
        cql,
        cmd.where_bindings.clone(),
    ))
}
