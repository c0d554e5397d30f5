//! SQL generation for the query object model.
//!
//! The pipeline is intentionally small: a [`QomWalker`] validates the query's
//! source against the node type registry, then walks source, constraint and
//! ordering trees exactly once, rendering platform-specific fragments through
//! a [`SqlDialect`] picked from the connection's [`Platform`].

mod alias;
mod dialect;
mod driver;
mod errors;
mod walker;
mod xpath;

pub use alias::AliasTable;
pub use dialect::{dialect_for, Platform, SqlDialect};
pub use driver::{Connection, StaticConnection};
pub use errors::SqlGeneratorError;
pub use walker::{CompiledQuery, QomWalker};

use crate::config::StorageConfig;
use crate::qom::Query;
use crate::registry::{NamespaceRegistry, NodeTypeRegistry};

/// One-shot compilation entry point: build a walker for the connection's
/// platform and run `query` through it.
pub fn compile(
    query: &Query,
    node_types: &dyn NodeTypeRegistry,
    namespaces: &dyn NamespaceRegistry,
    connection: &dyn Connection,
    config: &StorageConfig,
) -> Result<CompiledQuery, SqlGeneratorError> {
    QomWalker::new(node_types, connection, namespaces, config).walk_query(query)
}
