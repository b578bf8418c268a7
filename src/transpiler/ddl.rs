//! DDL generation.

use crate::ast::*;
use crate::error::{CqlError, CqlResult};
use crate::transpiler::RenderedStatement;
use crate::transpiler::dml::require_table;

/// Generate CREATE INDEX CQL.
pub fn build_create_index(cmd: &QueryDescriptor, columns: &[String]) -> CqlResult<RenderedStatement> {
    let table = require_table(cmd)?;

    if columns.is_empty() {
        return Err(CqlError::malformed(format!(
            "index on '{}' names no columns",
            table
        )));
    }

    let cql = format!(
        "create index if not exists on {}({})",
        table,
        columns.join(", ")
    );
    Ok(RenderedStatement::new(Operation::CreateIndex, cql, Vec::new()))
}
