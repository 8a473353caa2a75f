//! Rendering of query trees to MongoDB filter documents.

use bson::{Bson, Document, doc};
use tracing::debug;

use sift_query::{
    AndQuery, AttributeQuery, Operator, OrQuery, QueryError, QueryLimits, QueryVisitor,
    RangeQuery, StructuredQuery, Value,
};

use crate::error::{DocumentError, DocumentResult};

/// Translator from structured queries to MongoDB filter documents.
///
/// Substring operators render as anchored `$regex` conditions with regex
/// metacharacters escaped. Empty composites render the identities: an AND
/// with no children becomes the empty document (matches everything), an OR
/// with no children becomes `{"$nor": [{}]}` (matches nothing).
///
/// # Example
///
/// ```rust
/// use sift_mongodb::DocumentTranslator;
/// use sift_query::builder::{and, eq, gte};
///
/// let query = and([eq("status", "active"), gte("age", 18)]);
/// let filter = DocumentTranslator::new().translate(&query).unwrap();
/// assert!(filter.contains_key("$and"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentTranslator {
    limits: QueryLimits,
}

impl DocumentTranslator {
    /// Create a translator with default validation limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the validation limits applied at translation entry.
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Render a query tree to a filter document.
    ///
    /// The tree is validated before any rendering. The translator holds no
    /// per-call state, so translating the same tree twice yields identical
    /// documents.
    pub fn translate(&mut self, query: &StructuredQuery) -> DocumentResult<Document> {
        query.validate_with(&self.limits)?;
        let filter = query.dispatch(self)?;
        debug!(keys = filter.len(), "rendered filter document");
        Ok(filter)
    }
}

/// Convert a query value to BSON.
fn bson_value(value: &Value) -> DocumentResult<Bson> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(i) => Bson::Int64(*i),
        Value::Float(f) => Bson::Double(*f),
        Value::String(s) => Bson::String(s.clone()),
        Value::Json(json) => bson::to_bson(json)?,
        Value::List(values) => Bson::Array(
            values
                .iter()
                .map(bson_value)
                .collect::<DocumentResult<Vec<_>>>()?,
        ),
    })
}

/// Escape regex metacharacters in a literal needle.
fn escape_regex(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if ".^$*+?()[]{}|\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn needle<'a>(query: &'a AttributeQuery) -> DocumentResult<&'a str> {
    query.value().as_str().ok_or_else(|| {
        DocumentError::Query(
            QueryError::internal("string operator reached rendering with a non-string value")
                .with_attribute(query.attribute()),
        )
    })
}

impl QueryVisitor for DocumentTranslator {
    type Output = Document;
    type Error = DocumentError;

    fn visit_attribute(&mut self, query: &AttributeQuery) -> DocumentResult<Document> {
        let mut filter = Document::new();
        let condition = match query.operator() {
            Operator::Equals => bson_value(query.value())?,
            Operator::NotEquals => Bson::Document(doc! { "$ne": bson_value(query.value())? }),
            Operator::LessThan => Bson::Document(doc! { "$lt": bson_value(query.value())? }),
            Operator::LessThanOrEqual => {
                Bson::Document(doc! { "$lte": bson_value(query.value())? })
            }
            Operator::GreaterThan => Bson::Document(doc! { "$gt": bson_value(query.value())? }),
            Operator::GreaterThanOrEqual => {
                Bson::Document(doc! { "$gte": bson_value(query.value())? })
            }
            Operator::In => Bson::Document(doc! { "$in": bson_value(query.value())? }),
            Operator::NotIn => Bson::Document(doc! { "$nin": bson_value(query.value())? }),
            Operator::Contains => {
                Bson::Document(doc! { "$regex": escape_regex(needle(query)?) })
            }
            Operator::StartsWith => {
                Bson::Document(doc! { "$regex": format!("^{}", escape_regex(needle(query)?)) })
            }
            Operator::EndsWith => {
                Bson::Document(doc! { "$regex": format!("{}$", escape_regex(needle(query)?)) })
            }
            Operator::IsNull => Bson::Null,
            Operator::IsNotNull => Bson::Document(doc! { "$ne": Bson::Null }),
        };
        filter.insert(query.attribute(), condition);
        Ok(filter)
    }

    fn visit_range(&mut self, query: &RangeQuery) -> DocumentResult<Document> {
        let mut bounds = Document::new();
        if let Some(lower) = query.lower() {
            let op = if query.lower_inclusive() { "$gte" } else { "$gt" };
            bounds.insert(op, bson_value(lower)?);
        }
        if let Some(upper) = query.upper() {
            let op = if query.upper_inclusive() { "$lte" } else { "$lt" };
            bounds.insert(op, bson_value(upper)?);
        }
        let mut filter = Document::new();
        filter.insert(query.attribute(), bounds);
        Ok(filter)
    }

    fn visit_and(&mut self, query: &AndQuery) -> DocumentResult<Document> {
        // AND-of-none is the identity: the empty filter matches everything.
        // An empty `$and` array is rejected server-side, so it never renders.
        if query.is_empty() {
            return Ok(Document::new());
        }
        let children = self.translate_children(query.queries())?;
        Ok(doc! { "$and": children })
    }

    fn visit_or(&mut self, query: &OrQuery) -> DocumentResult<Document> {
        // OR-of-none is the identity: match nothing. `$nor` of the
        // match-everything filter expresses that with logical operators only.
        if query.is_empty() {
            return Ok(doc! { "$nor": vec![Document::new()] });
        }
        let children = self.translate_children(query.queries())?;
        Ok(doc! { "$or": children })
    }
}

impl DocumentTranslator {
    fn translate_children(
        &mut self,
        queries: &[StructuredQuery],
    ) -> DocumentResult<Vec<Document>> {
        queries.iter().map(|child| child.dispatch(self)).collect()
    }
}
