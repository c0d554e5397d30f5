//! The QOM walker: translates a query tree into one SQL statement over the
//! node table. One walker instance is one compilation; it owns the alias
//! table and the source context and is consumed by [`QomWalker::walk_query`],
//! so concurrent compilations cannot share state.

use log::debug;

use super::alias::AliasTable;
use super::dialect::{dialect_for, SqlDialect};
use super::driver::Connection;
use super::errors::SqlGeneratorError;
use crate::config::StorageConfig;
use crate::qom::{
    Constraint, Join, JoinCondition, JoinType, Operand, Operator, Ordering, PropertyValue, Query,
    Selector, Source, Value, IDENTIFIER_PROPERTY, PATH_PROPERTY,
};
use crate::registry::{NamespaceRegistry, NodeTypeRegistry};

// Column names fixed by the relational storage convention.
const WORKSPACE_COLUMN: &str = "workspace_name";
const PATH_COLUMN: &str = "path";
const IDENTIFIER_COLUMN: &str = "identifier";
const PARENT_COLUMN: &str = "parent";
const DEPTH_COLUMN: &str = "depth";
const TYPE_COLUMN: &str = "type";
const NAMESPACE_COLUMN: &str = "namespace";
const LOCAL_NAME_COLUMN: &str = "local_name";

/// Attribute on a blob value element carrying the stored byte length.
const LENGTH_ATTRIBUTE: &str = "length";

/// Everything a caller gets back from one compilation.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// Validated selectors, primary selector first (right-outer joins put the
    /// originally-right selector first).
    pub selectors: Vec<Selector>,
    /// Selector-scope → alias assignments; the row-hydration layer uses this
    /// to map `alias_column` result columns back to selectors.
    pub aliases: AliasTable,
    /// The statement. Bind the workspace name to every `?` placeholder, in
    /// order.
    pub sql: String,
}

/// Per-compilation QOM→SQL translator.
pub struct QomWalker<'a> {
    node_types: &'a dyn NodeTypeRegistry,
    namespaces: &'a dyn NamespaceRegistry,
    connection: &'a dyn Connection,
    dialect: Box<dyn SqlDialect>,
    config: StorageConfig,
    aliases: AliasTable,
    /// Most recently visited source node; disambiguates the implicit selector
    /// while the source tree is walked.
    current_source: Option<Source>,
}

impl<'a> QomWalker<'a> {
    pub fn new(
        node_types: &'a dyn NodeTypeRegistry,
        connection: &'a dyn Connection,
        namespaces: &'a dyn NamespaceRegistry,
        config: &StorageConfig,
    ) -> Self {
        QomWalker {
            node_types,
            namespaces,
            connection,
            dialect: dialect_for(&connection.platform(), config),
            config: config.clone(),
            aliases: AliasTable::new(),
            current_source: None,
        }
    }

    /// Compile `query`. Consumes the walker: the alias table belongs to
    /// exactly one compilation and is handed back in the result.
    pub fn walk_query(mut self, query: &Query) -> Result<CompiledQuery, SqlGeneratorError> {
        let selectors = self.validate_source(&query.source)?;

        let source_sql = format!(" {}", self.walk_source(&query.source)?);
        let constraint_sql = match &query.constraint {
            Some(constraint) => format!(" AND {}", self.walk_constraint(constraint)?),
            None => String::new(),
        };
        let ordering_sql = if query.orderings.is_empty() {
            String::new()
        } else {
            format!(" {}", self.walk_orderings(&query.orderings)?)
        };

        let mut sql = format!("SELECT {}", self.columns());
        sql.push_str(&source_sql);
        sql.push_str(&constraint_sql);
        sql.push_str(&ordering_sql);

        let mut limit = query.limit;
        if query.offset.is_some() && limit.is_none() && self.dialect.requires_limit_for_offset() {
            // This family cannot express an offset without a limit.
            limit = Some(i64::MAX as u64);
        }
        let sql = self
            .dialect
            .apply_limit_offset(sql, limit, query.offset.unwrap_or(0));

        debug!("compiled query object model to SQL: {}", sql);

        Ok(CompiledQuery {
            selectors,
            aliases: self.aliases,
            sql,
        })
    }

    // ---- alias bookkeeping ----

    /// Normalize a raw selector reference to its alias scope key: strip
    /// bracket quoting, cut a property-qualified string at the first dot, map
    /// an absent name to the first-allocated scope (or the empty key), and
    /// degrade to the empty key when the current single-selector source's
    /// node type carries the same name.
    fn selector_scope_key(&self, selector_name: Option<&str>) -> String {
        let mut key = match selector_name {
            None => self.aliases.first_scope_key().unwrap_or("").to_string(),
            Some(name) => name.split('.').next().unwrap_or("").to_string(),
        };

        if key.len() >= 2 && key.starts_with('[') && key.ends_with(']') {
            key = key[1..key.len() - 1].to_string();
        }

        if let Some(Source::Selector(selector)) = &self.current_source {
            if selector.node_type_name == key {
                key.clear();
            }
        }

        key
    }

    fn table_alias(&mut self, selector_name: Option<&str>) -> String {
        let key = self.selector_scope_key(selector_name);
        self.aliases.alias_for(&key)
    }

    /// Alias for a property-qualified reference (`selector.property`).
    fn property_scope_alias(&mut self, property: &PropertyValue) -> String {
        let qualified = format!(
            "{}.{}",
            property.selector_name.as_deref().unwrap_or(""),
            property.property_name
        );
        self.table_alias(Some(&qualified))
    }

    // ---- projection ----

    fn columns(&self) -> String {
        if self.aliases.is_empty() {
            return "*".to_string();
        }

        let result_columns = [
            PATH_COLUMN,
            IDENTIFIER_COLUMN,
            self.config.props_column.as_str(),
        ];
        let mut parts = Vec::new();
        for token in self.aliases.tokens() {
            for column in result_columns {
                parts.push(format!("{0}.{1} AS {0}_{1}", token, column));
            }
        }
        parts.join(", ")
    }

    // ---- source validation ----

    fn validate_source(&self, source: &Source) -> Result<Vec<Selector>, SqlGeneratorError> {
        match source {
            Source::Selector(selector) => {
                self.validate_selector(selector)?;
                Ok(vec![selector.clone()])
            }
            Source::Join(join) => self.validate_join(join),
        }
    }

    fn validate_selector(&self, selector: &Selector) -> Result<(), SqlGeneratorError> {
        if self.node_types.has_node_type(&selector.node_type_name) {
            return Ok(());
        }
        let mut message = selector.node_type_name.clone();
        if let Some(name) = &selector.selector_name {
            message.push_str(" AS ");
            message.push_str(name);
        }
        Err(SqlGeneratorError::UnknownNodeType(message))
    }

    fn validate_join(&self, join: &Join) -> Result<Vec<Selector>, SqlGeneratorError> {
        let left = self.validate_source(&join.left)?;
        let right = self.validate_source(&join.right)?;

        // The semantically primary side goes first.
        Ok(match join.join_type {
            JoinType::RightOuter => right.into_iter().chain(left).collect(),
            JoinType::Inner | JoinType::LeftOuter => left.into_iter().chain(right).collect(),
        })
    }

    // ---- source compilation ----

    fn walk_source(&mut self, source: &Source) -> Result<String, SqlGeneratorError> {
        match source {
            Source::Selector(selector) => self.walk_selector_source(selector),
            Source::Join(join) => self.walk_join_source(join, true),
        }
    }

    fn node_type_clause(&self, alias: &str, selector: &Selector) -> String {
        let mut types = vec![selector.node_type_name.clone()];
        types.extend(self.node_types.subtypes_of(&selector.node_type_name));
        let list = types
            .iter()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}.{} IN ({})", alias, TYPE_COLUMN, list)
    }

    fn walk_selector_source(&mut self, selector: &Selector) -> Result<String, SqlGeneratorError> {
        self.current_source = Some(Source::Selector(selector.clone()));
        let alias = self.table_alias(selector.selector_name.as_deref());
        let type_clause = self.node_type_clause(&alias, selector);
        Ok(format!(
            "FROM {} {} WHERE {}.{} = ? AND {}",
            self.config.nodes_table, alias, alias, WORKSPACE_COLUMN, type_clause
        ))
    }

    /// The deepest join in a left-deep tree, together with the selector on
    /// its left side.
    fn leftmost_join_and_selector(join: &Join) -> (&Join, &Selector) {
        match &join.left {
            Source::Join(inner) => Self::leftmost_join_and_selector(inner),
            Source::Selector(selector) => (join, selector),
        }
    }

    /// The selector a join condition names on its left side.
    fn left_condition_selector(condition: &JoinCondition) -> &str {
        match condition {
            JoinCondition::ChildNode { child_selector, .. } => child_selector,
            JoinCondition::DescendantNode {
                ancestor_selector, ..
            } => ancestor_selector,
            JoinCondition::SameNode { selector1, .. } => selector1,
            JoinCondition::EquiJoin { selector1, .. } => selector1,
        }
    }

    /// Compile a join tree. The root call appends the single WHERE clause
    /// restricting the leftmost selector's workspace and type closure; nested
    /// calls only produce the FROM/JOIN chain.
    fn walk_join_source(&mut self, join: &Join, root: bool) -> Result<String, SqlGeneratorError> {
        self.current_source = Some(join.left.clone());

        let right = match &join.right {
            Source::Selector(selector) => selector.clone(),
            Source::Join(_) => return Err(SqlGeneratorError::JoinOnRightSide),
        };

        let (mut sql, left_alias, leftmost_selector) = match &join.left {
            Source::Selector(selector) => {
                let left_alias = self.table_alias(selector.selector_name.as_deref());
                (
                    format!("FROM {} {} ", self.config.nodes_table, left_alias),
                    left_alias,
                    selector.clone(),
                )
            }
            Source::Join(inner) => {
                // One step left until the chain bottoms out at a selector.
                let sql = format!("{} ", self.walk_join_source(inner, false)?);
                let (leftmost, leftmost_selector) = Self::leftmost_join_and_selector(join);
                let selector_name = Self::left_condition_selector(&leftmost.condition).to_string();
                let leftmost_selector = leftmost_selector.clone();
                let left_alias = self.table_alias(Some(&selector_name));
                (sql, left_alias, leftmost_selector)
            }
        };

        let right_alias = self.table_alias(right.selector_name.as_deref());
        let type_clause = self.node_type_clause(&right_alias, &right);

        let join_keyword = match join.join_type {
            JoinType::Inner => "INNER JOIN",
            JoinType::LeftOuter => "LEFT JOIN",
            JoinType::RightOuter => "RIGHT JOIN",
        };
        sql.push_str(&format!(
            "{} {} {} ",
            join_keyword, self.config.nodes_table, right_alias
        ));

        sql.push_str(&format!(
            "ON ( {}.{} = {}.{} AND {} ",
            left_alias, WORKSPACE_COLUMN, right_alias, WORKSPACE_COLUMN, type_clause
        ));
        let condition_sql = self.walk_join_condition(&join.left, &right, &join.condition)?;
        sql.push_str(&format!("AND {} ", condition_sql));
        sql.push_str(") ");

        if root {
            let type_clause = self.node_type_clause(&left_alias, &leftmost_selector);
            sql.push_str(&format!(
                "WHERE {}.{} = ? AND {}",
                left_alias, WORKSPACE_COLUMN, type_clause
            ));
        }

        Ok(sql)
    }

    fn walk_join_condition(
        &mut self,
        left: &Source,
        right: &Selector,
        condition: &JoinCondition,
    ) -> Result<String, SqlGeneratorError> {
        match condition {
            JoinCondition::ChildNode {
                child_selector,
                parent_selector,
            } => self.walk_child_node_join_condition(child_selector, parent_selector),
            JoinCondition::DescendantNode {
                descendant_selector,
                ancestor_selector,
            } => self.walk_descendant_node_join_condition(descendant_selector, ancestor_selector),
            JoinCondition::EquiJoin {
                property1,
                property2,
                ..
            } => {
                let left_selector_name = match left {
                    Source::Selector(selector) => selector.selector_name.clone(),
                    Source::Join(inner) => {
                        let (leftmost, _) = Self::leftmost_join_and_selector(inner);
                        Some(Self::left_condition_selector(&leftmost.condition).to_string())
                    }
                };
                self.walk_equi_join_condition(
                    left_selector_name.as_deref(),
                    property1,
                    right.selector_name.as_deref(),
                    property2,
                )
            }
            JoinCondition::SameNode { .. } => Err(SqlGeneratorError::SameNodeJoinCondition),
        }
    }

    fn walk_child_node_join_condition(
        &mut self,
        child_selector: &str,
        parent_selector: &str,
    ) -> Result<String, SqlGeneratorError> {
        let child_alias = self.table_alias(Some(child_selector));
        let parent_alias = self.table_alias(Some(parent_selector));
        let prefix = self
            .dialect
            .concat(&[&format!("{}.{}", parent_alias, PATH_COLUMN), "'/%'"]);
        Ok(format!(
            "({0}.{1} LIKE {2} AND {0}.{3} = {4}.{3} + 1) ",
            child_alias, PATH_COLUMN, prefix, DEPTH_COLUMN, parent_alias
        ))
    }

    fn walk_descendant_node_join_condition(
        &mut self,
        descendant_selector: &str,
        ancestor_selector: &str,
    ) -> Result<String, SqlGeneratorError> {
        let descendant_alias = self.table_alias(Some(descendant_selector));
        let ancestor_alias = self.table_alias(Some(ancestor_selector));
        let prefix = self
            .dialect
            .concat(&[&format!("{}.{}", ancestor_alias, PATH_COLUMN), "'/%'"]);
        Ok(format!(
            "{}.{} LIKE {} ",
            descendant_alias, PATH_COLUMN, prefix
        ))
    }

    fn walk_equi_join_condition(
        &mut self,
        left_selector: Option<&str>,
        left_property: &str,
        right_selector: Option<&str>,
        right_property: &str,
    ) -> Result<String, SqlGeneratorError> {
        let left = self.walk_operand(&Operand::PropertyValue(PropertyValue::new(
            left_selector,
            left_property,
        )))?;
        let right = self.walk_operand(&Operand::PropertyValue(PropertyValue::new(
            right_selector,
            right_property,
        )))?;
        Ok(format!("{} {} {}", left, Operator::EqualTo.as_sql(), right))
    }

    // ---- constraint compilation ----

    fn walk_constraint(&mut self, constraint: &Constraint) -> Result<String, SqlGeneratorError> {
        match constraint {
            Constraint::And(left, right) => Ok(format!(
                "({} AND {})",
                self.walk_constraint(left)?,
                self.walk_constraint(right)?
            )),
            Constraint::Or(left, right) => Ok(format!(
                "({} OR {})",
                self.walk_constraint(left)?,
                self.walk_constraint(right)?
            )),
            Constraint::Not(inner) => Ok(format!("NOT ({})", self.walk_constraint(inner)?)),
            Constraint::Comparison {
                operand1,
                operator,
                operand2,
            } => self.walk_comparison_constraint(operand1, operator, operand2),
            Constraint::DescendantNode {
                selector_name,
                ancestor_path,
            } => self.walk_descendant_node_constraint(selector_name.as_deref(), ancestor_path),
            Constraint::ChildNode {
                selector_name,
                parent_path,
            } => {
                let alias = self.table_alias(selector_name.as_deref());
                Ok(format!(
                    "{}.{} = '{}'",
                    alias,
                    PARENT_COLUMN,
                    parent_path.replace('\'', "\\'")
                ))
            }
            Constraint::PropertyExistence {
                selector_name,
                property_name,
            } => {
                let alias = self.table_alias(selector_name.as_deref());
                self.dialect
                    .xpath_value_exists(&alias, property_name, &self.config.props_column)
            }
            Constraint::SameNode {
                selector_name,
                path,
            } => {
                let alias = self.table_alias(selector_name.as_deref());
                Ok(format!("{}.{} = '{}'", alias, PATH_COLUMN, path))
            }
            Constraint::FullTextSearch {
                selector_name,
                property_name,
                expression,
            } => self.walk_full_text_search_constraint(
                selector_name.as_deref(),
                property_name.as_deref(),
                expression,
            ),
        }
    }

    fn walk_descendant_node_constraint(
        &mut self,
        selector_name: Option<&str>,
        ancestor_path: &str,
    ) -> Result<String, SqlGeneratorError> {
        let ancestor_path = if ancestor_path == "/" {
            // Root: everything is a descendant, the prefix degenerates to /%.
            ""
        } else if ancestor_path.ends_with('/') {
            return Err(SqlGeneratorError::TrailingSlashInPath(
                ancestor_path.to_string(),
            ));
        } else {
            ancestor_path
        };
        let alias = self.table_alias(selector_name);
        Ok(format!(
            "{}.{} LIKE '{}/%'",
            alias, PATH_COLUMN, ancestor_path
        ))
    }

    fn walk_full_text_search_constraint(
        &mut self,
        selector_name: Option<&str>,
        property_name: Option<&str>,
        expression: &Operand,
    ) -> Result<String, SqlGeneratorError> {
        let literal = match expression {
            Operand::Literal(value) => value,
            _ => return Err(SqlGeneratorError::NonLiteralFullTextExpression),
        };
        let pattern = self
            .connection
            .quote(&format!("%{}%", literal.sql_text()));
        let alias = self.table_alias(selector_name);
        let extracted = match property_name {
            Some(property) => {
                self.dialect
                    .xpath_extract_value(&alias, property, &self.config.props_column)?
            }
            None => self
                .dialect
                .xpath_extract_value_any_property(&alias, &self.config.props_column)?,
        };
        Ok(format!("{} LIKE {}", extracted, pattern))
    }

    /// Comparisons between a property (or node name) and a literal need
    /// type-directed rendering: multivalued properties make equality "at
    /// least one value matches", numbers need a cast, booleans are stored as
    /// bits. Everything else renders both sides verbatim.
    fn walk_comparison_constraint(
        &mut self,
        operand1: &Operand,
        operator: &Operator,
        operand2: &Operand,
    ) -> Result<String, SqlGeneratorError> {
        let op = operator.as_sql().to_string();

        fn is_dynamic(operand: &Operand) -> bool {
            matches!(
                operand,
                Operand::PropertyValue(_) | Operand::NodeName { .. }
            )
        }

        let shape = match (operand1, operand2) {
            (Operand::Literal(literal), dynamic) if is_dynamic(dynamic) => Some((dynamic, literal)),
            (dynamic, Operand::Literal(literal)) if is_dynamic(dynamic) => Some((dynamic, literal)),
            _ => None,
        };

        if let Some((dynamic, literal)) = shape {
            // Ordering operators on text have no multivalue-count rendering.
            let plain_text = matches!(literal, Value::Text(_)) && op != "=" && op != "!=";

            if !plain_text {
                if let Operand::NodeName { selector_name } = dynamic {
                    return self.walk_node_name_comparison(
                        selector_name.as_deref(),
                        literal,
                        &op,
                    );
                }

                if let Operand::PropertyValue(property) = dynamic {
                    if property.property_name != PATH_PROPERTY
                        && property.property_name != IDENTIFIER_PROPERTY
                    {
                        return match literal {
                            Value::Long(_) | Value::Double(_) => {
                                self.walk_numeric_comparison(property, literal, &op)
                            }
                            Value::Boolean(value) => {
                                self.walk_boolean_comparison(property, *value, &op)
                            }
                            Value::Text(_) | Value::Date(_) => {
                                self.walk_text_comparison(property, literal, &op)
                            }
                        };
                    }
                }
            }
        }

        let left = self.walk_operand(operand1)?;
        let right = self.walk_operand(operand2)?;
        Ok(format!("{} {} {}", left, op, right))
    }

    fn walk_node_name_comparison(
        &mut self,
        selector_name: Option<&str>,
        literal: &Value,
        operator: &str,
    ) -> Result<String, SqlGeneratorError> {
        let alias = self.table_alias(selector_name);

        let mut literal_text = literal.sql_text();
        if let Some((prefix, local)) = literal_text.split_once(':') {
            let uri = self.namespaces.uri_for(prefix).ok_or_else(|| {
                SqlGeneratorError::UnknownNamespacePrefix(prefix.to_string())
            })?;
            literal_text = format!("{}:{}", uri, local);
        }

        Ok(format!(
            "{} {} {}",
            self.node_name_expression(&alias),
            operator,
            self.connection.quote(&literal_text)
        ))
    }

    fn walk_text_comparison(
        &mut self,
        property: &PropertyValue,
        literal: &Value,
        operator: &str,
    ) -> Result<String, SqlGeneratorError> {
        let alias = self.property_scope_alias(property);
        self.dialect.xpath_compare_value(
            &alias,
            &property.property_name,
            &literal.sql_text(),
            operator,
            &self.config.props_column,
        )
    }

    fn walk_boolean_comparison(
        &mut self,
        property: &PropertyValue,
        value: bool,
        operator: &str,
    ) -> Result<String, SqlGeneratorError> {
        let rendered = self.walk_operand(&Operand::PropertyValue(property.clone()))?;
        let bit = if value { "1" } else { "0" };
        Ok(format!(
            "{} {} {}",
            rendered,
            operator,
            self.connection.quote(bit)
        ))
    }

    fn walk_numeric_comparison(
        &mut self,
        property: &PropertyValue,
        literal: &Value,
        operator: &str,
    ) -> Result<String, SqlGeneratorError> {
        let alias = self.property_scope_alias(property);
        let value = literal.sql_text();

        if operator == "=" {
            // Equality must match any stored value of a multivalued property.
            if let Some(fast) = self.dialect.numeric_equality_fast_path(
                &alias,
                &property.property_name,
                &value,
                &self.config.props_column,
            ) {
                return Ok(fast);
            }
            return self.dialect.xpath_compare_value(
                &alias,
                &property.property_name,
                &value,
                operator,
                &self.config.props_column,
            );
        }

        let extracted = self.dialect.xpath_extract_numeric(
            &alias,
            &property.property_name,
            &self.config.props_column,
        )?;
        Ok(format!("{} {} {}", extracted, operator, value))
    }

    // ---- operand compilation ----

    fn node_name_expression(&self, alias: &str) -> String {
        self.dialect.concat(&[
            &format!("{}.{}", alias, NAMESPACE_COLUMN),
            &format!(
                "(CASE {}.{} WHEN '' THEN '' ELSE ':' END)",
                alias, NAMESPACE_COLUMN
            ),
            &format!("{}.{}", alias, LOCAL_NAME_COLUMN),
        ])
    }

    fn walk_operand(&mut self, operand: &Operand) -> Result<String, SqlGeneratorError> {
        match operand {
            Operand::NodeName { selector_name } => {
                let alias = self.table_alias(selector_name.as_deref());
                Ok(self.node_name_expression(&alias))
            }
            Operand::NodeLocalName { selector_name } => {
                let alias = self.table_alias(selector_name.as_deref());
                Ok(format!("{}.{}", alias, LOCAL_NAME_COLUMN))
            }
            Operand::LowerCase(inner) => {
                let inner_sql = self.walk_operand(inner)?;
                Ok(self.dialect.lower(&inner_sql))
            }
            Operand::UpperCase(inner) => {
                let inner_sql = self.walk_operand(inner)?;
                Ok(self.dialect.upper(&inner_sql))
            }
            Operand::Literal(value) => Ok(self.connection.quote(&value.sql_text())),
            Operand::PropertyValue(property) => {
                let alias = self.property_scope_alias(property);
                if property.property_name == PATH_PROPERTY {
                    return Ok(format!("{}.{}", alias, PATH_COLUMN));
                }
                if property.property_name == IDENTIFIER_PROPERTY {
                    return Ok(format!("{}.{}", alias, IDENTIFIER_COLUMN));
                }
                self.dialect.xpath_extract_value(
                    &alias,
                    &property.property_name,
                    &self.config.props_column,
                )
            }
            Operand::Length(property) => {
                let alias = self.table_alias(property.selector_name.as_deref());
                self.dialect.xpath_extract_value_attribute(
                    &alias,
                    &property.property_name,
                    LENGTH_ATTRIBUTE,
                    1,
                    &self.config.props_column,
                )
            }
        }
    }

    // ---- ordering compilation ----

    fn walk_orderings(&mut self, orderings: &[Ordering]) -> Result<String, SqlGeneratorError> {
        let mut sql = String::new();
        for ordering in orderings {
            if sql.is_empty() {
                sql.push_str("ORDER BY ");
            } else {
                sql.push_str(", ");
            }
            sql.push_str(&self.walk_ordering(ordering)?);
        }
        Ok(sql)
    }

    /// A plain property ordering gets a numeric-cast primary key over the
    /// numeric shadow column, so numeric-looking text sorts numerically with
    /// the lexical rendering as tie-break.
    fn walk_ordering(&mut self, ordering: &Ordering) -> Result<String, SqlGeneratorError> {
        let direction = ordering.direction.as_sql();
        let mut sql = self.walk_operand(&ordering.operand)?;

        if let Operand::PropertyValue(property) = &ordering.operand {
            if property.property_name != PATH_PROPERTY
                && property.property_name != IDENTIFIER_PROPERTY
            {
                let alias = self.property_scope_alias(property);
                let numeric = self.dialect.xpath_extract_value(
                    &alias,
                    &property.property_name,
                    &self.config.numeric_props_column,
                )?;
                sql = format!("CAST({} AS DECIMAL) {}, {}", numeric, direction, sql);
            }
        }

        sql.push(' ');
        sql.push_str(direction);
        Ok(sql)
    }
}
