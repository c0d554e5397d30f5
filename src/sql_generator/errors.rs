use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SqlGeneratorError {
    /// Message carries the type name, and `AS selector` when one was given.
    #[error("Selected node type does not exist: {0}")]
    UnknownNodeType(String),
    #[error("The namespace {0} was not registered")]
    UnknownNamespacePrefix(String),
    #[error("Trailing slash in ancestor path {0}")]
    TrailingSlashInPath(String),
    #[error("The right side of the join must not consist of another join")]
    JoinOnRightSide,
    #[error("Same-node join conditions have no SQL rendering")]
    SameNodeJoinCondition,
    #[error("Full text search expressions must be literals")]
    NonLiteralFullTextExpression,
    #[error("XPath evaluations cannot be executed on platform '{0}'")]
    UnsupportedPlatform(String),
}
