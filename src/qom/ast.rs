use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Pseudo property resolving to the row's hierarchical path column.
pub const PATH_PROPERTY: &str = "repo:path";

/// Pseudo property resolving to the row's stable identifier column.
pub const IDENTIFIER_PROPERTY: &str = "repo:uuid";

/// A literal value carried by the query tree.
///
/// Date values keep their original offset until rendering; the SQL generator
/// normalizes them to UTC so literal comparisons are well-defined across
/// timezones.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Text(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Date(DateTime<FixedOffset>),
}

impl Value {
    /// The unquoted textual form handed to the driver for quoting.
    ///
    /// Dates are normalized to UTC and rendered in a fixed sortable form
    /// (RFC 3339 with a `+00:00` offset). Booleans render as `1`/`0` to match
    /// how boolean properties are stored in the blob.
    pub fn sql_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Long(i) => i.to_string(),
            Value::Double(f) => f.to_string(),
            Value::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Date(dt) => dt
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Long(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::Date(dt)
    }
}

/// A named binding of one node type to one table reference.
#[derive(Debug, PartialEq, Clone)]
pub struct Selector {
    pub node_type_name: String,
    /// Optional binding name; a query with a single selector may omit it.
    pub selector_name: Option<String>,
}

impl Selector {
    pub fn new(node_type_name: impl Into<String>) -> Self {
        Selector {
            node_type_name: node_type_name.into(),
            selector_name: None,
        }
    }

    pub fn named(node_type_name: impl Into<String>, selector_name: impl Into<String>) -> Self {
        Selector {
            node_type_name: node_type_name.into(),
            selector_name: Some(selector_name.into()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
}

/// The predicate tying the two sides of a join together.
#[derive(Debug, PartialEq, Clone)]
pub enum JoinCondition {
    /// Child rows of the parent selector's rows.
    ChildNode {
        child_selector: String,
        parent_selector: String,
    },
    /// Rows anywhere below the ancestor selector's rows.
    DescendantNode {
        descendant_selector: String,
        ancestor_selector: String,
    },
    /// Both selectors bind the same node. Recognized in the model but has no
    /// rendering rule; compiling it fails with a not-implemented error.
    SameNode {
        selector1: String,
        selector2: String,
        selector2_path: Option<String>,
    },
    /// Property-value equality between the two selectors.
    EquiJoin {
        selector1: String,
        property1: String,
        selector2: String,
        property2: String,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Join {
    pub left: Source,
    pub right: Source,
    pub join_type: JoinType,
    pub condition: JoinCondition,
}

/// The FROM side of a query: a single selector or a left-deep join tree.
#[derive(Debug, PartialEq, Clone)]
pub enum Source {
    Selector(Selector),
    Join(Box<Join>),
}

/// A property reference on a selector, usable as an operand on its own and
/// inside `Length`.
#[derive(Debug, PartialEq, Clone)]
pub struct PropertyValue {
    pub selector_name: Option<String>,
    pub property_name: String,
}

impl PropertyValue {
    pub fn new(
        selector_name: Option<impl Into<String>>,
        property_name: impl Into<String>,
    ) -> Self {
        PropertyValue {
            selector_name: selector_name.map(Into::into),
            property_name: property_name.into(),
        }
    }
}

/// A scalar expression evaluated per row.
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    PropertyValue(PropertyValue),
    /// The namespaced node name, `namespace:localname` (no colon when the
    /// namespace is empty).
    NodeName { selector_name: Option<String> },
    NodeLocalName { selector_name: Option<String> },
    /// The stored byte length of a property's first value.
    Length(PropertyValue),
    UpperCase(Box<Operand>),
    LowerCase(Box<Operand>),
    Literal(Value),
}

impl Operand {
    pub fn property(selector_name: Option<&str>, property_name: &str) -> Self {
        Operand::PropertyValue(PropertyValue::new(selector_name, property_name))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Operand::Literal(value.into())
    }
}

/// Comparison operators. The seven standard operators render to fixed tokens;
/// `Raw` passes an already-mapped SQL token through unchanged.
#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Like,
    Raw(String),
}

impl Operator {
    pub fn as_sql(&self) -> &str {
        match self {
            Operator::EqualTo => "=",
            Operator::NotEqualTo => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::Like => "LIKE",
            Operator::Raw(token) => token,
        }
    }
}

/// A boolean-valued predicate over one or more selectors.
#[derive(Debug, PartialEq, Clone)]
pub enum Constraint {
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
    Not(Box<Constraint>),
    Comparison {
        operand1: Operand,
        operator: Operator,
        operand2: Operand,
    },
    /// Rows strictly below `ancestor_path`. The root path matches everything;
    /// any other trailing slash is rejected.
    DescendantNode {
        selector_name: Option<String>,
        ancestor_path: String,
    },
    /// Rows whose parent is exactly `parent_path`.
    ChildNode {
        selector_name: Option<String>,
        parent_path: String,
    },
    PropertyExistence {
        selector_name: Option<String>,
        property_name: String,
    },
    /// The selector's row is exactly the node at `path`.
    SameNode {
        selector_name: Option<String>,
        path: String,
    },
    /// Substring match against one property's values, or against any value in
    /// the blob when no property is named. The expression must be a literal.
    FullTextSearch {
        selector_name: Option<String>,
        property_name: Option<String>,
        expression: Operand,
    },
}

impl Constraint {
    pub fn and(left: Constraint, right: Constraint) -> Self {
        Constraint::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Constraint, right: Constraint) -> Self {
        Constraint::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Constraint) -> Self {
        Constraint::Not(Box::new(inner))
    }

    pub fn comparison(operand1: Operand, operator: Operator, operand2: Operand) -> Self {
        Constraint::Comparison {
            operand1,
            operator,
            operand2,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn as_sql(&self) -> &str {
        match self {
            OrderDirection::Ascending => "ASC",
            OrderDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Ordering {
    pub operand: Operand,
    pub direction: OrderDirection,
}

impl Ordering {
    pub fn ascending(operand: Operand) -> Self {
        Ordering {
            operand,
            direction: OrderDirection::Ascending,
        }
    }

    pub fn descending(operand: Operand) -> Self {
        Ordering {
            operand,
            direction: OrderDirection::Descending,
        }
    }
}

/// A complete query: source tree, optional constraint, orderings, pagination.
#[derive(Debug, PartialEq, Clone)]
pub struct Query {
    pub source: Source,
    pub constraint: Option<Constraint>,
    pub orderings: Vec<Ordering>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query {
    pub fn new(source: Source) -> Self {
        Query {
            source,
            constraint: None,
            orderings: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Operator::EqualTo, "=")]
    #[test_case(Operator::NotEqualTo, "!=")]
    #[test_case(Operator::GreaterThan, ">")]
    #[test_case(Operator::GreaterThanOrEqualTo, ">=")]
    #[test_case(Operator::LessThan, "<")]
    #[test_case(Operator::LessThanOrEqualTo, "<=")]
    #[test_case(Operator::Like, "LIKE")]
    fn standard_operators_render_to_fixed_tokens(operator: Operator, expected: &str) {
        assert_eq!(operator.as_sql(), expected);
    }

    #[test]
    fn raw_operator_passes_through_unchanged() {
        assert_eq!(Operator::Raw("SOUNDS LIKE".to_string()).as_sql(), "SOUNDS LIKE");
    }

    #[test]
    fn date_values_normalize_to_utc() {
        let utc: Value = "2021-03-01T12:00:00+00:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap()
            .into();
        let offset: Value = "2021-03-01T14:00:00+02:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap()
            .into();

        // Same instant in different offsets renders identically.
        assert_eq!(utc.sql_text(), offset.sql_text());
        assert_eq!(utc.sql_text(), "2021-03-01T12:00:00+00:00");
    }

    #[test]
    fn boolean_values_render_as_bits() {
        assert_eq!(Value::Boolean(true).sql_text(), "1");
        assert_eq!(Value::Boolean(false).sql_text(), "0");
    }
}
