//! # cql-grammar
//!
//! Compiles fluent query descriptors into CQL statement text.
//!
//! ## Quick Example
//!
//! ```rust
//! use cql_grammar::prelude::*;
//!
//! let desc = QueryDescriptor::update("users")
//!     .column("name", "bob")
//!     .update_collection(CollectionMutation::set("tags", ["x"]).append())
//!     .filter("where id = ?", vec![Scalar::from(5)]);
//!
//! let stmt = desc.to_cql()?;
//! assert_eq!(stmt.text, "update users set name = ?, tags=tags+{'x'} where id = ?");
//! assert_eq!(stmt.bind()?, "update users set name = 'bob', tags=tags+{'x'} where id = 5");
//! # Ok::<(), cql_grammar::error::CqlError>(())
//! ```
//!
//! ## Collection literals
//!
//! | Kind   | Literal            | Notes                                   |
//! |--------|--------------------|-----------------------------------------|
//! | `set`  | `{'a', 'b'}`       |                                         |
//! | `list` | `[1, 2]`           |                                         |
//! | `map`  | `{'k':'v'}`        | any non-string key: values only, `{1, 2}` |
//!
//! Strings are single-quoted without escaping, both in literals and when
//! binding. Do not feed untrusted input through this crate.

pub mod ast;
pub mod binder;
pub mod builder;
pub mod config;
pub mod error;
pub mod qualifier;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::binder::{Binder, InlineBinder, bind};
    pub use crate::builder::{QueryBuilder, SortOrder};
    pub use crate::config::{Consistency, ConnectionConfig};
    pub use crate::error::*;
    pub use crate::qualifier::strip_qualifiers;
    pub use crate::transpiler::{RenderedStatement, ToCql, render_collection};
}

/// Compile a descriptor into statement text and ordered parameters.
///
/// # Example
///
/// ```
/// use cql_grammar::ast::QueryDescriptor;
///
/// let stmt = cql_grammar::compile(&QueryDescriptor::delete("people")).unwrap();
/// assert_eq!(stmt.text, "delete from people");
/// ```
pub fn compile(descriptor: &ast::QueryDescriptor) -> error::CqlResult<transpiler::RenderedStatement> {
    transpiler::ToCql::to_cql(descriptor)
}

/// Compile a descriptor and bind its parameters inline.
pub fn compile_and_bind(descriptor: &ast::QueryDescriptor) -> error::CqlResult<String> {
    compile(descriptor)?.bind()
}
