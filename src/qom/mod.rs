//! The query object model: the immutable, externally constructed tree that
//! the SQL generator walks. Selectors bind node types, joins combine sources,
//! constraints filter rows and operands are the scalar expressions inside
//! comparisons and orderings.

mod ast;

pub use ast::{
    Constraint, Join, JoinCondition, JoinType, Operand, Operator, OrderDirection, Ordering,
    PropertyValue, Query, Selector, Source, Value,
};
pub use ast::{IDENTIFIER_PROPERTY, PATH_PROPERTY};
