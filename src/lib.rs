//! repoql - relational query compilation for a hierarchical content repository
//!
//! This crate translates a query object model (a tree of selectors, joins,
//! constraints, operands and orderings over a node store) into a single SQL
//! statement for a backend where every repository node is one row and its
//! properties are packed into a per-row XML blob:
//! - Closed QOM types with exhaustive compilation
//! - Node-type subtype expansion and namespace resolution via registry traits
//! - Dialect adapters for MySQL, PostgreSQL and SQLite XML extraction and
//!   pagination

pub mod config;
pub mod qom;
pub mod registry;
pub mod sql_generator;

pub use config::StorageConfig;
pub use registry::{
    InMemoryNamespaceRegistry, InMemoryNodeTypeRegistry, NamespaceRegistry, NodeTypeRegistry,
};
pub use sql_generator::{compile, CompiledQuery, QomWalker, SqlGeneratorError};
pub use sql_generator::{Connection, Platform, StaticConnection};
