//! Dialect adapters. Everything the compiled SQL does that differs between
//! backend families lives behind [`SqlDialect`]: string concatenation, case
//! folding, XML value extraction from the properties blob, and pagination.
//! One implementation per family, selected once per compilation from the
//! connection's platform identity.

use std::fmt;

use super::errors::SqlGeneratorError;
use super::xpath;
use crate::config::StorageConfig;

/// Platform identity reported by the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Platform {
    MySql,
    Postgres,
    Sqlite,
    Other(String),
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MySql => write!(f, "mysql"),
            Platform::Postgres => write!(f, "postgresql"),
            Platform::Sqlite => write!(f, "sqlite"),
            Platform::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Capability interface over the SQL families the compiler can target.
///
/// The XPath-family methods return `Result` because an unrecognized platform
/// must fail rather than emit SQL that looks plausible and is wrong. The
/// ANSI-level methods (concat, case folding, pagination) cannot be wrong and
/// render on every platform.
pub trait SqlDialect {
    fn name(&self) -> &str;

    fn concat(&self, parts: &[&str]) -> String {
        parts.join(" || ")
    }

    fn lower(&self, expr: &str) -> String {
        format!("LOWER({})", expr)
    }

    fn upper(&self, expr: &str) -> String {
        format!("UPPER({})", expr)
    }

    /// Boolean expression: does `property` exist on the aliased row?
    fn xpath_value_exists(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError>;

    /// Scalar expression: the first value of `property` on the aliased row.
    fn xpath_extract_value(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError>;

    /// Scalar expression over any value in the blob, for full-text search
    /// without a named property.
    fn xpath_extract_value_any_property(
        &self,
        alias: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError>;

    /// Numeric expression: the first value of `property`, cast for numeric
    /// comparison.
    fn xpath_extract_numeric(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "CAST({} AS DECIMAL)",
            self.xpath_extract_value(alias, property, column)?
        ))
    }

    /// Expression extracting a value-element attribute (e.g. `length`) of the
    /// `value_index`-th value of `property`.
    fn xpath_extract_value_attribute(
        &self,
        alias: &str,
        property: &str,
        attribute: &str,
        value_index: usize,
        column: &str,
    ) -> Result<String, SqlGeneratorError>;

    /// Boolean expression: does at least one stored value of `property`
    /// satisfy `operator` against `value`? This is the multivalued-property
    /// comparison: equality means "any value equals", not "the whole
    /// multivalue equals".
    fn xpath_compare_value(
        &self,
        alias: &str,
        property: &str,
        value: &str,
        operator: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError>;

    /// Dialect shortcut for numeric equality on a multivalued property, when
    /// the family has one.
    fn numeric_equality_fast_path(
        &self,
        _alias: &str,
        _property: &str,
        _value: &str,
        _column: &str,
    ) -> Option<String> {
        None
    }

    /// Whether the family's pagination syntax needs an explicit limit to
    /// express an offset.
    fn requires_limit_for_offset(&self) -> bool {
        false
    }

    fn apply_limit_offset(&self, mut sql: String, limit: Option<u64>, offset: u64) -> String {
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if offset > 0 {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
        sql
    }
}

/// Shared EXTRACTVALUE shapes: MySQL has the function natively, SQLite gets
/// it as a registered user function with the same signature.
mod extractvalue {
    use super::xpath;

    pub fn value_exists(alias: &str, property: &str, column: &str) -> String {
        format!(
            "EXTRACTVALUE({}.{}, 'count(//sv:property[@sv:name={}]/sv:value[1])') = 1",
            alias,
            column,
            xpath::escape(property)
        )
    }

    pub fn extract_value(alias: &str, property: &str, column: &str) -> String {
        format!(
            "EXTRACTVALUE({}.{}, '//sv:property[@sv:name={}]/sv:value[1]')",
            alias,
            column,
            xpath::escape(property)
        )
    }

    pub fn extract_any_value(alias: &str, column: &str) -> String {
        format!("EXTRACTVALUE({}.{}, '//sv:value')", alias, column)
    }

    pub fn extract_value_attribute(
        alias: &str,
        property: &str,
        attribute: &str,
        value_index: usize,
        column: &str,
    ) -> String {
        format!(
            "EXTRACTVALUE({}.{}, '//sv:property[@sv:name={}]/sv:value[{}]/@{}')",
            alias,
            column,
            xpath::escape(property),
            value_index,
            attribute
        )
    }

    pub fn compare_value(
        alias: &str,
        property: &str,
        value: &str,
        operator: &str,
        column: &str,
    ) -> String {
        format!(
            "EXTRACTVALUE({}.{}, 'count(//sv:property[@sv:name={}]/sv:value[text(){}{}]) > 0')",
            alias,
            column,
            xpath::escape(property),
            operator,
            xpath::escape(value)
        )
    }
}

pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn concat(&self, parts: &[&str]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    fn xpath_value_exists(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::value_exists(alias, property, column))
    }

    fn xpath_extract_value(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_value(alias, property, column))
    }

    fn xpath_extract_value_any_property(
        &self,
        alias: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_any_value(alias, column))
    }

    fn xpath_extract_value_attribute(
        &self,
        alias: &str,
        property: &str,
        attribute: &str,
        value_index: usize,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_value_attribute(
            alias,
            property,
            attribute,
            value_index,
            column,
        ))
    }

    fn xpath_compare_value(
        &self,
        alias: &str,
        property: &str,
        value: &str,
        operator: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        // MySQL consumes one level of backslash escaping before the XPath
        // engine runs; the other families do not.
        let value = xpath::escape_backslashes(value);
        Ok(extractvalue::compare_value(
            alias, property, &value, operator, column,
        ))
    }

    fn numeric_equality_fast_path(
        &self,
        alias: &str,
        property: &str,
        value: &str,
        column: &str,
    ) -> Option<String> {
        Some(format!(
            "0 != FIND_IN_SET('{}', REPLACE(EXTRACTVALUE({}.{}, '//sv:property[@sv:name={}]/sv:value'), ' ', ','))",
            value,
            alias,
            column,
            xpath::escape(property)
        ))
    }

    fn requires_limit_for_offset(&self) -> bool {
        true
    }
}

pub struct PostgresDialect {
    sv_namespace_uri: String,
}

impl PostgresDialect {
    pub fn new(sv_namespace_uri: impl Into<String>) -> Self {
        PostgresDialect {
            sv_namespace_uri: sv_namespace_uri.into(),
        }
    }

    /// Namespace bindings argument for `xpath()`/`xpath_exists()`.
    fn namespaces(&self) -> String {
        format!("ARRAY[ARRAY['sv', '{}']]", self.sv_namespace_uri)
    }
}

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &str {
        "postgresql"
    }

    fn xpath_value_exists(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "xpath_exists('//sv:property[@sv:name={}]/sv:value[1]', CAST({}.{} AS xml), {}) = 't'",
            xpath::escape(property),
            alias,
            column,
            self.namespaces()
        ))
    }

    fn xpath_extract_value(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "(xpath('//sv:property[@sv:name={}]/sv:value[1]/text()', CAST({}.{} AS xml), {}))[1]::text",
            xpath::escape(property),
            alias,
            column,
            self.namespaces()
        ))
    }

    fn xpath_extract_value_any_property(
        &self,
        alias: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "(xpath('/sv:value/text()', CAST({}.{} AS xml), {}))[1]::text",
            alias,
            column,
            self.namespaces()
        ))
    }

    fn xpath_extract_numeric(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "(xpath('//sv:property[@sv:name={}]/sv:value[1]/text()', CAST({}.{} AS xml), {}))[1]::text::int",
            xpath::escape(property),
            alias,
            column,
            self.namespaces()
        ))
    }

    fn xpath_extract_value_attribute(
        &self,
        alias: &str,
        property: &str,
        attribute: &str,
        value_index: usize,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "CAST((xpath('//sv:property[@sv:name={}]/sv:value[{}]/@{}', CAST({}.{} AS xml), {}))[1]::text AS bigint)",
            xpath::escape(property),
            value_index,
            attribute,
            alias,
            column,
            self.namespaces()
        ))
    }

    fn xpath_compare_value(
        &self,
        alias: &str,
        property: &str,
        value: &str,
        operator: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(format!(
            "xpath_exists('//sv:property[@sv:name={}]/sv:value[text(){}{}]', CAST({}.{} AS xml), {}) = 't'",
            xpath::escape(property),
            operator,
            xpath::escape(value),
            alias,
            column,
            self.namespaces()
        ))
    }
}

pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn xpath_value_exists(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::value_exists(alias, property, column))
    }

    fn xpath_extract_value(
        &self,
        alias: &str,
        property: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_value(alias, property, column))
    }

    fn xpath_extract_value_any_property(
        &self,
        alias: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_any_value(alias, column))
    }

    fn xpath_extract_value_attribute(
        &self,
        alias: &str,
        property: &str,
        attribute: &str,
        value_index: usize,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::extract_value_attribute(
            alias,
            property,
            attribute,
            value_index,
            column,
        ))
    }

    fn xpath_compare_value(
        &self,
        alias: &str,
        property: &str,
        value: &str,
        operator: &str,
        column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Ok(extractvalue::compare_value(
            alias, property, value, operator, column,
        ))
    }

    fn requires_limit_for_offset(&self) -> bool {
        true
    }
}

/// Placeholder for platforms without an XPath rendering. ANSI-level methods
/// still work; anything touching the blob fails with the platform name.
pub struct UnsupportedDialect {
    platform: String,
}

impl UnsupportedDialect {
    fn err(&self) -> SqlGeneratorError {
        SqlGeneratorError::UnsupportedPlatform(self.platform.clone())
    }
}

impl SqlDialect for UnsupportedDialect {
    fn name(&self) -> &str {
        &self.platform
    }

    fn xpath_value_exists(
        &self,
        _alias: &str,
        _property: &str,
        _column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Err(self.err())
    }

    fn xpath_extract_value(
        &self,
        _alias: &str,
        _property: &str,
        _column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Err(self.err())
    }

    fn xpath_extract_value_any_property(
        &self,
        _alias: &str,
        _column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Err(self.err())
    }

    fn xpath_extract_value_attribute(
        &self,
        _alias: &str,
        _property: &str,
        _attribute: &str,
        _value_index: usize,
        _column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Err(self.err())
    }

    fn xpath_compare_value(
        &self,
        _alias: &str,
        _property: &str,
        _value: &str,
        _operator: &str,
        _column: &str,
    ) -> Result<String, SqlGeneratorError> {
        Err(self.err())
    }
}

/// Select the dialect for a platform, once per compilation.
pub fn dialect_for(platform: &Platform, config: &StorageConfig) -> Box<dyn SqlDialect> {
    log::trace!("selecting SQL dialect for platform {}", platform);
    match platform {
        Platform::MySql => Box::new(MySqlDialect),
        Platform::Postgres => Box::new(PostgresDialect::new(config.sv_namespace_uri.clone())),
        Platform::Sqlite => Box::new(SqliteDialect),
        Platform::Other(name) => Box::new(UnsupportedDialect {
            platform: name.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig::default()
    }

    #[test]
    fn concat_differs_per_family() {
        let mysql = dialect_for(&Platform::MySql, &config());
        let postgres = dialect_for(&Platform::Postgres, &config());
        assert_eq!(mysql.concat(&["a", "b"]), "CONCAT(a, b)");
        assert_eq!(postgres.concat(&["a", "b"]), "a || b");
    }

    #[test]
    fn mysql_comparison_counts_matching_values() {
        let dialect = MySqlDialect;
        let sql = dialect
            .xpath_compare_value("n0", "size", "5", "=", "props")
            .unwrap();
        assert_eq!(
            sql,
            "EXTRACTVALUE(n0.props, 'count(//sv:property[@sv:name=\"size\"]/sv:value[text()=\"5\"]) > 0')"
        );
    }

    #[test]
    fn postgres_comparison_uses_xpath_exists() {
        let dialect = PostgresDialect::new("http://repoql.org/sv/1.0");
        let sql = dialect
            .xpath_compare_value("n0", "size", "5", "=", "props")
            .unwrap();
        assert!(sql.starts_with("xpath_exists('//sv:property[@sv:name=\"size\"]/sv:value[text()=\"5\"]'"));
        assert!(sql.contains("ARRAY[ARRAY['sv', 'http://repoql.org/sv/1.0']]"));
        assert!(sql.ends_with("= 't'"));
    }

    #[test]
    fn mysql_escapes_backslashes_in_compared_values() {
        let dialect = MySqlDialect;
        let sql = dialect
            .xpath_compare_value("n0", "file", "a\\b", "=", "props")
            .unwrap();
        assert!(sql.contains("a\\\\b"));
    }

    #[test]
    fn mysql_has_a_numeric_equality_fast_path() {
        let dialect = MySqlDialect;
        let sql = dialect
            .numeric_equality_fast_path("n0", "size", "5", "props")
            .unwrap();
        assert!(sql.starts_with("0 != FIND_IN_SET('5'"));
        assert!(SqliteDialect
            .numeric_equality_fast_path("n0", "size", "5", "props")
            .is_none());
    }

    #[test]
    fn limit_and_offset_are_appended_in_order() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.apply_limit_offset("SELECT 1".to_string(), Some(10), 20),
            "SELECT 1 LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            dialect.apply_limit_offset("SELECT 1".to_string(), None, 0),
            "SELECT 1"
        );
    }

    #[test]
    fn unknown_platforms_fail_every_xpath_rendering() {
        let dialect = dialect_for(&Platform::Other("oracle".to_string()), &config());
        let err = dialect.xpath_extract_value("n0", "title", "props").unwrap_err();
        assert_eq!(
            err,
            SqlGeneratorError::UnsupportedPlatform("oracle".to_string())
        );
        assert!(dialect.xpath_value_exists("n0", "title", "props").is_err());
        assert!(dialect
            .xpath_compare_value("n0", "title", "x", "=", "props")
            .is_err());
    }
}
