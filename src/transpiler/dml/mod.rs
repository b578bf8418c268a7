pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use crate::ast::QueryDescriptor;
use crate::error::{CqlError, CqlResult};

/// The target table, which every statement needs.
pub(crate) fn require_table(cmd: &QueryDescriptor) -> CqlResult<&str> {
    let table = cmd.table.trim();
    if table.is_empty() {
        return Err(CqlError::malformed(format!("{} without a table", cmd.operation)));
    }
    Ok(table)
}

/// Append a verbatim clause (where fragment, order/limit) separated by one space.
pub(crate) fn push_clause(cql: &mut String, clause: &str) {
    let clause = clause.trim();
    if !clause.is_empty() {
        cql.push(' ');
        cql.push_str(clause);
    }
}
