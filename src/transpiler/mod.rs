//! CQL transpiler for query descriptors.
//!
//! Converts descriptors into statement text with `?` markers for scalar
//! values. Collection values are never parameterized: they are inlined as
//! literals when the statement is rendered.

pub mod collection;
pub mod ddl;
pub mod dml;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::binder::{Binder, InlineBinder};
use crate::config::ConnectionConfig;
use crate::error::CqlResult;

pub use collection::{render_collection, render_tagged};

/// Statement text plus the values for its `?` markers, in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub operation: Operation,
    pub text: String,
    pub parameters: Vec<Scalar>,
}

impl RenderedStatement {
    pub fn new(operation: Operation, text: String, parameters: Vec<Scalar>) -> Self {
        Self {
            operation,
            text,
            parameters,
        }
    }

    /// Substitute the parameters with the textual binder.
    pub fn bind(&self) -> CqlResult<String> {
        self.bind_with(&InlineBinder)
    }

    pub fn bind_with(&self, binder: &dyn Binder) -> CqlResult<String> {
        binder.bind(&self.text, &self.parameters)
    }

    /// Produce the text handed to the driver: connection-level suffixes, then binding.
    pub fn finalize(&self, config: &ConnectionConfig, binder: &dyn Binder) -> CqlResult<String> {
        if config.allow_filtering && self.operation == Operation::Select {
            let text = format!("{} allow filtering", self.text);
            return binder.bind(&text, &self.parameters);
        }
        self.bind_with(binder)
    }
}

/// Trait for compiling a descriptor into CQL.
pub trait ToCql {
    fn to_cql(&self) -> CqlResult<RenderedStatement>;
}

impl ToCql for QueryDescriptor {
    fn to_cql(&self) -> CqlResult<RenderedStatement> {
        let rendered = match self.operation {
            Operation::Select => dml::select::build_select(self),
            Operation::Insert => dml::insert::build_insert(self),
            Operation::Update => dml::update::build_update(self),
            Operation::Delete => dml::delete::build_delete(self),
            Operation::CreateIndex => ddl::build_create_index(self, &self.index_columns),
        }?;
        tracing::debug!(
            operation = %self.operation,
            table = %self.table,
            parameters = rendered.parameters.len(),
            "compiled statement: {}",
            rendered.text
        );
        Ok(rendered)
    }
}
