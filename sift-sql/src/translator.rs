//! Rendering of query trees to parameterized WHERE fragments.

use tracing::debug;

use sift_query::{
    AndQuery, AttributeQuery, Operator, OrQuery, QueryError, QueryLimits, QueryVisitor,
    RangeQuery, StructuredQuery, Value,
};

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};

/// A rendered WHERE fragment plus the values to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    sql: String,
    params: Vec<Value>,
}

impl SqlFilter {
    /// The WHERE fragment, parenthesized and parameterized.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Split into the fragment and its bind values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Translator from structured queries to SQL WHERE fragments.
///
/// Comparisons bind their values as parameters, numbered in traversal
/// order; only identifiers and operators are interpolated into the SQL
/// text. Empty composites render the boolean identities: AND-of-none is
/// `TRUE`, OR-of-none is `FALSE`.
///
/// # Example
///
/// ```rust
/// use sift_query::builder::{and, eq, gt};
/// use sift_sql::SqlTranslator;
///
/// let query = and([eq("status", "active"), gt("age", 18)]);
/// let filter = SqlTranslator::postgres().translate(&query).unwrap();
/// assert_eq!(filter.sql(), "(status = $1 AND age > $2)");
/// assert_eq!(filter.params().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SqlTranslator {
    dialect: Dialect,
    limits: QueryLimits,
    params: Vec<Value>,
}

impl SqlTranslator {
    /// Create a translator for the given dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            limits: QueryLimits::default(),
            params: Vec::new(),
        }
    }

    /// Create a PostgreSQL translator.
    pub fn postgres() -> Self {
        Self::new(Dialect::PostgreSQL)
    }

    /// Create a MySQL translator.
    pub fn mysql() -> Self {
        Self::new(Dialect::MySQL)
    }

    /// Create a SQLite translator.
    pub fn sqlite() -> Self {
        Self::new(Dialect::SQLite)
    }

    /// Override the validation limits applied at translation entry.
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Render a query tree to a WHERE fragment.
    ///
    /// The tree is validated before any rendering, and accumulated state is
    /// reset first, so translating the same tree twice yields identical
    /// output.
    pub fn translate(&mut self, query: &StructuredQuery) -> SqlResult<SqlFilter> {
        self.params.clear();
        query.validate_with(&self.limits)?;

        let sql = query.dispatch(self)?;
        let params = std::mem::take(&mut self.params);
        debug!(
            dialect = %self.dialect,
            params = params.len(),
            "rendered WHERE fragment"
        );
        Ok(SqlFilter { sql, params })
    }

    /// Bind a scalar value and return its placeholder.
    fn bind(&mut self, attribute: &str, value: &Value) -> SqlResult<String> {
        match value {
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                self.params.push(value.clone());
                Ok(self.dialect.placeholder(self.params.len()))
            }
            Value::Null | Value::Json(_) | Value::List(_) => Err(SqlError::UnsupportedValue {
                attribute: attribute.to_string(),
                kind: value.kind(),
            }),
        }
    }

    /// Bind a LIKE pattern with `\`, `%`, and `_` escaped in the needle.
    fn bind_like(&mut self, needle: &str, prefix: &str, suffix: &str) -> String {
        let mut escaped = String::with_capacity(needle.len());
        for c in needle.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        self.params
            .push(Value::String(format!("{prefix}{escaped}{suffix}")));
        self.dialect.placeholder(self.params.len())
    }

    fn needle<'a>(&self, query: &'a AttributeQuery) -> SqlResult<&'a str> {
        query.value().as_str().ok_or_else(|| {
            SqlError::Query(
                QueryError::internal("string operator reached rendering with a non-string value")
                    .with_attribute(query.attribute()),
            )
        })
    }

    fn join_children(
        &mut self,
        queries: &[StructuredQuery],
        joiner: &str,
        identity: &str,
    ) -> SqlResult<String> {
        if queries.is_empty() {
            return Ok(identity.to_string());
        }
        let parts: Vec<_> = queries
            .iter()
            .map(|child| child.dispatch(self))
            .collect::<Result<_, _>>()?;
        Ok(format!("({})", parts.join(joiner)))
    }
}

impl QueryVisitor for SqlTranslator {
    type Output = String;
    type Error = SqlError;

    fn visit_attribute(&mut self, query: &AttributeQuery) -> SqlResult<String> {
        let column = self.dialect.quote_identifier(query.attribute());
        let sql = match query.operator() {
            Operator::Equals => {
                if query.value().is_null() {
                    format!("{column} IS NULL")
                } else {
                    let placeholder = self.bind(query.attribute(), query.value())?;
                    format!("{column} = {placeholder}")
                }
            }
            Operator::NotEquals => {
                if query.value().is_null() {
                    format!("{column} IS NOT NULL")
                } else {
                    let placeholder = self.bind(query.attribute(), query.value())?;
                    format!("{column} != {placeholder}")
                }
            }
            Operator::LessThan => {
                let placeholder = self.bind(query.attribute(), query.value())?;
                format!("{column} < {placeholder}")
            }
            Operator::LessThanOrEqual => {
                let placeholder = self.bind(query.attribute(), query.value())?;
                format!("{column} <= {placeholder}")
            }
            Operator::GreaterThan => {
                let placeholder = self.bind(query.attribute(), query.value())?;
                format!("{column} > {placeholder}")
            }
            Operator::GreaterThanOrEqual => {
                let placeholder = self.bind(query.attribute(), query.value())?;
                format!("{column} >= {placeholder}")
            }
            Operator::In => match query.value().as_list() {
                Some([]) => "FALSE".to_string(),
                Some(values) => {
                    let placeholders = self.bind_all(query.attribute(), values)?;
                    format!("{column} IN ({placeholders})")
                }
                None => return Err(shape_error(query)),
            },
            Operator::NotIn => match query.value().as_list() {
                Some([]) => "TRUE".to_string(),
                Some(values) => {
                    let placeholders = self.bind_all(query.attribute(), values)?;
                    format!("{column} NOT IN ({placeholders})")
                }
                None => return Err(shape_error(query)),
            },
            Operator::Contains => {
                let placeholder = self.bind_like(self.needle(query)?, "%", "%");
                format!("{column} LIKE {placeholder} ESCAPE '\\'")
            }
            Operator::StartsWith => {
                let placeholder = self.bind_like(self.needle(query)?, "", "%");
                format!("{column} LIKE {placeholder} ESCAPE '\\'")
            }
            Operator::EndsWith => {
                let placeholder = self.bind_like(self.needle(query)?, "%", "");
                format!("{column} LIKE {placeholder} ESCAPE '\\'")
            }
            Operator::IsNull => format!("{column} IS NULL"),
            Operator::IsNotNull => format!("{column} IS NOT NULL"),
        };
        Ok(sql)
    }

    fn visit_range(&mut self, query: &RangeQuery) -> SqlResult<String> {
        let column = self.dialect.quote_identifier(query.attribute());
        let mut parts = Vec::with_capacity(2);
        if let Some(lower) = query.lower() {
            let op = if query.lower_inclusive() { ">=" } else { ">" };
            let placeholder = self.bind(query.attribute(), lower)?;
            parts.push(format!("{column} {op} {placeholder}"));
        }
        if let Some(upper) = query.upper() {
            let op = if query.upper_inclusive() { "<=" } else { "<" };
            let placeholder = self.bind(query.attribute(), upper)?;
            parts.push(format!("{column} {op} {placeholder}"));
        }
        match parts.len() {
            2 => Ok(format!("({})", parts.join(" AND "))),
            1 => Ok(parts.remove(0)),
            _ => Err(SqlError::Query(
                QueryError::internal("unbounded range reached rendering")
                    .with_attribute(query.attribute()),
            )),
        }
    }

    fn visit_and(&mut self, query: &AndQuery) -> SqlResult<String> {
        // AND-of-none is the identity: always true.
        self.join_children(query.queries(), " AND ", "TRUE")
    }

    fn visit_or(&mut self, query: &OrQuery) -> SqlResult<String> {
        // OR-of-none is the identity: always false.
        self.join_children(query.queries(), " OR ", "FALSE")
    }
}

impl SqlTranslator {
    fn bind_all(&mut self, attribute: &str, values: &[Value]) -> SqlResult<String> {
        let placeholders: Vec<_> = values
            .iter()
            .map(|value| self.bind(attribute, value))
            .collect::<Result<_, _>>()?;
        Ok(placeholders.join(", "))
    }
}

fn shape_error(query: &AttributeQuery) -> SqlError {
    SqlError::Query(
        QueryError::internal("membership operator reached rendering without a list value")
            .with_attribute(query.attribute()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sift_query::builder::{and, at_least, between, contains, eq, gt, is_in, ne, or};

    #[test]
    fn test_postgres_placeholders_number_in_traversal_order() {
        let query = and([eq("a", 1i64), eq("b", 2i64), eq("c", 3i64)]);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "(a = $1 AND b = $2 AND c = $3)");
        assert_eq!(
            filter.params(),
            &[Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_mysql_placeholders() {
        let query = and([eq("a", 1i64), gt("b", 2i64)]);
        let filter = SqlTranslator::mysql().translate(&query).unwrap();
        assert_eq!(filter.sql(), "(a = ? AND b > ?)");
    }

    #[test]
    fn test_nested_tree_renders_parenthesized() {
        let query = or([and([eq("p1", 1i64), eq("p2", 2i64)]), eq("p3", 3i64)]);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "((p1 = $1 AND p2 = $2) OR p3 = $3)");
    }

    #[test]
    fn test_equals_null_renders_is_null() {
        let query = eq("deleted_at", Value::Null);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "deleted_at IS NULL");
        assert!(filter.params().is_empty());

        let query = ne("deleted_at", Value::Null);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "deleted_at IS NOT NULL");
    }

    #[test]
    fn test_in_list() {
        let query = is_in("status", vec!["active", "pending"]);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "status IN ($1, $2)");
        assert_eq!(filter.params().len(), 2);
    }

    #[test]
    fn test_empty_in_renders_constant_false() {
        let query = is_in("status", Vec::<String>::new());
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "FALSE");
        assert!(filter.params().is_empty());
    }

    #[test]
    fn test_like_escapes_wildcards() {
        let query = contains("name", "50%_off");
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "name LIKE $1 ESCAPE '\\'");
        assert_eq!(
            filter.params(),
            &[Value::String("%50\\%\\_off%".to_string())]
        );
    }

    #[test]
    fn test_range_bounds() {
        let query = between("age", 18i64, 65i64);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "(age >= $1 AND age <= $2)");

        let query = at_least("age", 18i64);
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "age >= $1");
    }

    #[test]
    fn test_reserved_identifiers_are_quoted() {
        let query = eq("user", "alice");
        let filter = SqlTranslator::postgres().translate(&query).unwrap();
        assert_eq!(filter.sql(), "\"user\" = $1");

        let filter = SqlTranslator::mysql().translate(&query).unwrap();
        assert_eq!(filter.sql(), "`user` = ?");
    }

    #[test]
    fn test_empty_composites_render_identities() {
        let filter = SqlTranslator::postgres()
            .translate(&StructuredQuery::And(AndQuery::default()))
            .unwrap();
        assert_eq!(filter.sql(), "TRUE");

        let filter = SqlTranslator::postgres()
            .translate(&StructuredQuery::Or(OrQuery::default()))
            .unwrap();
        assert_eq!(filter.sql(), "FALSE");
    }

    #[test]
    fn test_translate_is_idempotent() {
        let query = and([eq("a", 1i64), is_in("b", vec![2i64, 3])]);
        let mut translator = SqlTranslator::postgres();
        let first = translator.translate(&query).unwrap();
        let second = translator.translate(&query).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_value_is_unsupported() {
        let query = eq("payload", serde_json::json!({"a": 1}));
        let err = SqlTranslator::postgres().translate(&query).unwrap_err();
        assert!(matches!(err, SqlError::UnsupportedValue { .. }));
    }

    #[test]
    fn test_invalid_tree_rejected_before_rendering() {
        let query: StructuredQuery =
            AttributeQuery::new("status", Operator::In, "not-a-list").into();
        let err = SqlTranslator::postgres().translate(&query).unwrap_err();
        assert!(matches!(err, SqlError::Query(_)));
    }
}
