//! Rendering of query trees to a boolean search DSL.

use serde_json::{Value as Json, json};
use tracing::debug;

use sift_query::{
    AndQuery, AttributeQuery, Operator, OrQuery, QueryError, QueryLimits, QueryVisitor,
    RangeQuery, StructuredQuery, Value,
};

use crate::error::{SearchError, SearchResult};

/// Translator from structured queries to a boolean search DSL fragment.
///
/// The output follows the Elasticsearch-style query DSL: leaves render as
/// `term`/`terms`/`range`/`wildcard`/`exists` clauses, conjunctions as
/// `bool.must`, disjunctions as `bool.should` with
/// `minimum_should_match: 1`. Empty composites render the identities:
/// AND-of-none is `match_all`, OR-of-none is `match_none`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sift_query::builder::{eq, gt, or};
/// use sift_search::SearchTranslator;
///
/// let query = or([eq("role", "admin"), gt("age", 18)]);
/// let dsl = SearchTranslator::new().translate(&query).unwrap();
/// assert_eq!(
///     dsl,
///     json!({
///         "bool": {
///             "should": [
///                 { "term": { "role": "admin" } },
///                 { "range": { "age": { "gt": 18 } } },
///             ],
///             "minimum_should_match": 1,
///         }
///     })
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchTranslator {
    limits: QueryLimits,
}

impl SearchTranslator {
    /// Create a translator with default validation limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the validation limits applied at translation entry.
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Render a query tree to a DSL fragment.
    ///
    /// The tree is validated before any rendering. The translator holds no
    /// per-call state, so translating the same tree twice yields identical
    /// fragments.
    pub fn translate(&mut self, query: &StructuredQuery) -> SearchResult<Json> {
        query.validate_with(&self.limits)?;
        let dsl = query.dispatch(self)?;
        debug!("rendered search DSL fragment");
        Ok(dsl)
    }
}

/// Convert a scalar query value to JSON for a term-level clause.
fn scalar(attribute: &str, value: &Value) -> SearchResult<Json> {
    match value {
        Value::Bool(b) => Ok(json!(b)),
        Value::Int(i) => Ok(json!(i)),
        Value::Float(f) => Ok(json!(f)),
        Value::String(s) => Ok(json!(s)),
        Value::Null | Value::Json(_) | Value::List(_) => Err(SearchError::UnsupportedValue {
            attribute: attribute.to_string(),
            kind: value.kind(),
        }),
    }
}

fn scalar_list(attribute: &str, values: &[Value]) -> SearchResult<Vec<Json>> {
    values.iter().map(|value| scalar(attribute, value)).collect()
}

/// Escape wildcard metacharacters in a literal needle.
fn escape_wildcard(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn needle<'a>(query: &'a AttributeQuery) -> SearchResult<&'a str> {
    query.value().as_str().ok_or_else(|| {
        SearchError::Query(
            QueryError::internal("string operator reached rendering with a non-string value")
                .with_attribute(query.attribute()),
        )
    })
}

fn list_values<'a>(query: &'a AttributeQuery) -> SearchResult<&'a [Value]> {
    query.value().as_list().ok_or_else(|| {
        SearchError::Query(
            QueryError::internal("membership operator reached rendering without a list value")
                .with_attribute(query.attribute()),
        )
    })
}

fn exists(attribute: &str) -> Json {
    json!({ "exists": { "field": attribute } })
}

fn must_not(clause: Json) -> Json {
    json!({ "bool": { "must_not": [clause] } })
}

impl QueryVisitor for SearchTranslator {
    type Output = Json;
    type Error = SearchError;

    fn visit_attribute(&mut self, query: &AttributeQuery) -> SearchResult<Json> {
        let attribute = query.attribute();
        let dsl = match query.operator() {
            Operator::Equals => {
                if query.value().is_null() {
                    must_not(exists(attribute))
                } else {
                    json!({ "term": { attribute: scalar(attribute, query.value())? } })
                }
            }
            Operator::NotEquals => {
                if query.value().is_null() {
                    exists(attribute)
                } else {
                    must_not(json!({ "term": { attribute: scalar(attribute, query.value())? } }))
                }
            }
            Operator::LessThan => {
                json!({ "range": { attribute: { "lt": scalar(attribute, query.value())? } } })
            }
            Operator::LessThanOrEqual => {
                json!({ "range": { attribute: { "lte": scalar(attribute, query.value())? } } })
            }
            Operator::GreaterThan => {
                json!({ "range": { attribute: { "gt": scalar(attribute, query.value())? } } })
            }
            Operator::GreaterThanOrEqual => {
                json!({ "range": { attribute: { "gte": scalar(attribute, query.value())? } } })
            }
            Operator::In => {
                let values = scalar_list(attribute, list_values(query)?)?;
                json!({ "terms": { attribute: values } })
            }
            Operator::NotIn => {
                let values = scalar_list(attribute, list_values(query)?)?;
                must_not(json!({ "terms": { attribute: values } }))
            }
            Operator::Contains => {
                let pattern = format!("*{}*", escape_wildcard(needle(query)?));
                json!({ "wildcard": { attribute: { "value": pattern } } })
            }
            Operator::StartsWith => {
                let pattern = format!("{}*", escape_wildcard(needle(query)?));
                json!({ "wildcard": { attribute: { "value": pattern } } })
            }
            Operator::EndsWith => {
                let pattern = format!("*{}", escape_wildcard(needle(query)?));
                json!({ "wildcard": { attribute: { "value": pattern } } })
            }
            Operator::IsNull => must_not(exists(attribute)),
            Operator::IsNotNull => exists(attribute),
        };
        Ok(dsl)
    }

    fn visit_range(&mut self, query: &RangeQuery) -> SearchResult<Json> {
        let attribute = query.attribute();
        let mut bounds = serde_json::Map::new();
        if let Some(lower) = query.lower() {
            let op = if query.lower_inclusive() { "gte" } else { "gt" };
            bounds.insert(op.to_string(), scalar(attribute, lower)?);
        }
        if let Some(upper) = query.upper() {
            let op = if query.upper_inclusive() { "lte" } else { "lt" };
            bounds.insert(op.to_string(), scalar(attribute, upper)?);
        }
        Ok(json!({ "range": { attribute: bounds } }))
    }

    fn visit_and(&mut self, query: &AndQuery) -> SearchResult<Json> {
        // AND-of-none is the identity: match everything.
        if query.is_empty() {
            return Ok(json!({ "match_all": {} }));
        }
        let children = self.translate_children(query.queries())?;
        Ok(json!({ "bool": { "must": children } }))
    }

    fn visit_or(&mut self, query: &OrQuery) -> SearchResult<Json> {
        // OR-of-none is the identity: match nothing.
        if query.is_empty() {
            return Ok(json!({ "match_none": {} }));
        }
        let children = self.translate_children(query.queries())?;
        Ok(json!({ "bool": { "should": children, "minimum_should_match": 1 } }))
    }
}

impl SearchTranslator {
    fn translate_children(&mut self, queries: &[StructuredQuery]) -> SearchResult<Vec<Json>> {
        queries.iter().map(|child| child.dispatch(self)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sift_query::builder::{
        and, between, contains, eq, is_in, is_not_null, is_null, lt, ne, or,
    };

    #[test]
    fn test_equals_renders_term() {
        let dsl = SearchTranslator::new().translate(&eq("role", "admin")).unwrap();
        assert_eq!(dsl, json!({ "term": { "role": "admin" } }));
    }

    #[test]
    fn test_not_equals_renders_must_not_term() {
        let dsl = SearchTranslator::new().translate(&ne("role", "admin")).unwrap();
        assert_eq!(
            dsl,
            json!({ "bool": { "must_not": [{ "term": { "role": "admin" } }] } })
        );
    }

    #[test]
    fn test_comparison_renders_range() {
        let dsl = SearchTranslator::new().translate(&lt("age", 30i64)).unwrap();
        assert_eq!(dsl, json!({ "range": { "age": { "lt": 30 } } }));
    }

    #[test]
    fn test_in_renders_terms() {
        let dsl = SearchTranslator::new()
            .translate(&is_in("status", vec!["active", "pending"]))
            .unwrap();
        assert_eq!(dsl, json!({ "terms": { "status": ["active", "pending"] } }));
    }

    #[test]
    fn test_contains_renders_escaped_wildcard() {
        let dsl = SearchTranslator::new()
            .translate(&contains("title", "2*2=4?"))
            .unwrap();
        assert_eq!(
            dsl,
            json!({ "wildcard": { "title": { "value": r"*2\*2=4\?*" } } })
        );
    }

    #[test]
    fn test_null_checks_render_exists() {
        let dsl = SearchTranslator::new().translate(&is_null("deleted_at")).unwrap();
        assert_eq!(
            dsl,
            json!({ "bool": { "must_not": [{ "exists": { "field": "deleted_at" } }] } })
        );

        let dsl = SearchTranslator::new()
            .translate(&is_not_null("deleted_at"))
            .unwrap();
        assert_eq!(dsl, json!({ "exists": { "field": "deleted_at" } }));
    }

    #[test]
    fn test_range_merges_bounds() {
        let dsl = SearchTranslator::new()
            .translate(&between("age", 18i64, 65i64))
            .unwrap();
        assert_eq!(dsl, json!({ "range": { "age": { "gte": 18, "lte": 65 } } }));
    }

    #[test]
    fn test_composites_render_bool_clauses() {
        let query = or([and([eq("a", 1i64), eq("b", 2i64)]), eq("c", 3i64)]);
        let dsl = SearchTranslator::new().translate(&query).unwrap();
        assert_eq!(
            dsl,
            json!({
                "bool": {
                    "should": [
                        {
                            "bool": {
                                "must": [
                                    { "term": { "a": 1 } },
                                    { "term": { "b": 2 } },
                                ]
                            }
                        },
                        { "term": { "c": 3 } },
                    ],
                    "minimum_should_match": 1,
                }
            })
        );
    }

    #[test]
    fn test_empty_composites_render_identities() {
        let dsl = SearchTranslator::new()
            .translate(&StructuredQuery::And(AndQuery::default()))
            .unwrap();
        assert_eq!(dsl, json!({ "match_all": {} }));

        let dsl = SearchTranslator::new()
            .translate(&StructuredQuery::Or(OrQuery::default()))
            .unwrap();
        assert_eq!(dsl, json!({ "match_none": {} }));
    }

    #[test]
    fn test_translate_is_idempotent() {
        let query = and([eq("a", 1i64), is_in("b", vec![2i64, 3])]);
        let mut translator = SearchTranslator::new();
        let first = translator.translate(&query).unwrap();
        let second = translator.translate(&query).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_value_is_unsupported() {
        let query = eq("payload", serde_json::json!({"a": 1}));
        let err = SearchTranslator::new().translate(&query).unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedValue { .. }));
    }
}
