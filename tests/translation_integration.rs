//! Integration tests for end-to-end translation.
//!
//! The same trees are rendered through every bundled translator to verify:
//! - Deterministic, order-preserving output per backend
//! - The empty-composite identity policy end-to-end
//! - Idempotence of repeated translation
//! - That a custom backend plugs in through the visitor contract alone

use bson::doc;
use pretty_assertions::assert_eq;
use serde_json::json;

use sift::prelude::*;

/// `(status = "active" AND age > 18) OR role = "admin"`
fn sample_tree() -> StructuredQuery {
    or([
        and([eq("status", "active"), gt("age", 18)]),
        eq("role", "admin"),
    ])
}

#[test]
fn test_sql_translation_end_to_end() {
    let filter = SqlTranslator::postgres().translate(&sample_tree()).unwrap();
    assert_eq!(
        filter.sql(),
        "((status = $1 AND age > $2) OR role = $3)"
    );
    assert_eq!(
        filter.params(),
        &[
            Value::String("active".to_string()),
            Value::Int(18),
            Value::String("admin".to_string()),
        ]
    );
}

#[test]
fn test_mongodb_translation_end_to_end() {
    let filter = DocumentTranslator::new().translate(&sample_tree()).unwrap();
    assert_eq!(
        filter,
        doc! {
            "$or": [
                { "$and": [ { "status": "active" }, { "age": { "$gt": 18_i64 } } ] },
                { "role": "admin" },
            ]
        }
    );
}

#[test]
fn test_search_translation_end_to_end() {
    let dsl = SearchTranslator::new().translate(&sample_tree()).unwrap();
    assert_eq!(
        dsl,
        json!({
            "bool": {
                "should": [
                    {
                        "bool": {
                            "must": [
                                { "term": { "status": "active" } },
                                { "range": { "age": { "gt": 18 } } },
                            ]
                        }
                    },
                    { "term": { "role": "admin" } },
                ],
                "minimum_should_match": 1,
            }
        })
    );
}

#[test]
fn test_empty_or_policy_end_to_end() {
    let query = StructuredQuery::Or(OrQuery::new([]));
    assert!(query.validate().is_ok());

    // OR-of-none matches nothing, rendered per backend.
    let filter = SqlTranslator::postgres().translate(&query).unwrap();
    assert_eq!(filter.sql(), "FALSE");

    let filter = DocumentTranslator::new().translate(&query).unwrap();
    assert_eq!(filter, doc! { "$nor": [ {} ] });

    let dsl = SearchTranslator::new().translate(&query).unwrap();
    assert_eq!(dsl, json!({ "match_none": {} }));
}

#[test]
fn test_empty_and_policy_end_to_end() {
    let query = StructuredQuery::And(AndQuery::default());

    // AND-of-none matches everything, rendered per backend.
    let filter = SqlTranslator::postgres().translate(&query).unwrap();
    assert_eq!(filter.sql(), "TRUE");

    let filter = DocumentTranslator::new().translate(&query).unwrap();
    assert!(filter.is_empty());

    let dsl = SearchTranslator::new().translate(&query).unwrap();
    assert_eq!(dsl, json!({ "match_all": {} }));
}

#[test]
fn test_child_order_is_preserved_in_output() {
    let query = and([eq("first", 1i64), eq("second", 2i64), eq("third", 3i64)]);

    let filter = SqlTranslator::postgres().translate(&query).unwrap();
    assert_eq!(filter.sql(), "(first = $1 AND second = $2 AND third = $3)");

    let reordered = and([eq("third", 3i64), eq("second", 2i64), eq("first", 1i64)]);
    let filter = SqlTranslator::postgres().translate(&reordered).unwrap();
    assert_eq!(filter.sql(), "(third = $1 AND second = $2 AND first = $3)");
}

#[test]
fn test_translators_are_idempotent_over_an_immutable_tree() {
    let query = sample_tree();

    let mut sql = SqlTranslator::postgres();
    assert_eq!(sql.translate(&query).unwrap(), sql.translate(&query).unwrap());

    let mut mongo = DocumentTranslator::new();
    assert_eq!(
        mongo.translate(&query).unwrap(),
        mongo.translate(&query).unwrap()
    );

    let mut search = SearchTranslator::new();
    assert_eq!(
        search.translate(&query).unwrap(),
        search.translate(&query).unwrap()
    );
}

/// A complete backend in a few lines: renders trees as s-expressions.
struct SexprTranslator;

impl QueryVisitor for SexprTranslator {
    type Output = String;
    type Error = QueryError;

    fn visit_attribute(&mut self, query: &AttributeQuery) -> Result<String, QueryError> {
        Ok(format!("({} {})", query.operator(), query.attribute()))
    }

    fn visit_range(&mut self, query: &RangeQuery) -> Result<String, QueryError> {
        Ok(format!("(range {})", query.attribute()))
    }

    fn visit_and(&mut self, query: &AndQuery) -> Result<String, QueryError> {
        let children = query
            .queries()
            .iter()
            .map(|child| child.dispatch(self))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("(and {})", children.join(" ")))
    }

    fn visit_or(&mut self, query: &OrQuery) -> Result<String, QueryError> {
        let children = query
            .queries()
            .iter()
            .map(|child| child.dispatch(self))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("(or {})", children.join(" ")))
    }
}

#[test]
fn test_a_new_backend_is_one_visitor_implementation() {
    let rendered = sample_tree().dispatch(&mut SexprTranslator).unwrap();
    assert_eq!(
        rendered,
        "(or (and (equals status) (greater_than age)) (equals role))"
    );
}
