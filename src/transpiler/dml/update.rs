//! UPDATE CQL generation.

use crate::ast::*;
use crate::error::{CqlError, CqlResult};
use crate::transpiler::RenderedStatement;
use crate::transpiler::collection::render_collection;

use super::{push_clause, require_table};

/// Generate UPDATE CQL.
///
/// Scalar assignments come first as `col = ?`, then collection assignments
/// (`col={..}`, `col=col+{..}`, `col=col-{..}`).
pub fn build_update(cmd: &QueryDescriptor) -> CqlResult<RenderedStatement> {
    let table = require_table(cmd)?;

    if cmd.columns.is_empty() && cmd.update_collections.is_empty() {
        return Err(CqlError::malformed(format!(
            "update of '{}' has no assignments",
            table
        )));
    }

    let mut set_clause = cmd
        .columns
        .iter()
        .map(|c| format!("{} = ?", c.column))
        .collect::<Vec<_>>()
        .join(", ");

    if !cmd.update_collections.is_empty() {
        let collections = build_collection_assignments(&cmd.update_collections).join(", ");
        if !set_clause.is_empty() {
            set_clause.push_str(", ");
        }
        set_clause.push_str(&collections);
    }

    let mut cql = format!("update {} set {}", table, set_clause);
    push_clause(&mut cql, &cmd.where_fragment);

    let parameters = cmd
        .columns
        .iter()
        .map(|c| c.value.clone())
        .chain(cmd.where_bindings.iter().cloned())
        .collect();

    Ok(RenderedStatement::new(Operation::Update, cql, parameters))
}

fn build_collection_assignments(mutations: &[CollectionMutation]) -> Vec<String> {
    mutations
        .iter()
        .map(|m| {
            let literal = render_collection(m.kind, &m.value);
            match m.operation {
                Some(op) => format!("{}={}{}{}", m.column, m.column, op.symbol(), literal),
                None => format!("{}={}", m.column, literal),
            }
        })
        .collect()
}
