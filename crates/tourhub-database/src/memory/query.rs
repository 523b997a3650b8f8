//! [`QuerySpec`] evaluation over JSON documents.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use tourhub_core::QuerySpec;
use tourhub_core::result::AppResult;
use tourhub_core::types::{Projection, SortDirection};

use crate::schema::{FieldDef, FieldKind, Predicate, Scalar, Schema, parse_timestamp};

/// Filter, order, page, and project `documents`.
pub fn run(schema: &Schema, documents: Vec<Value>, spec: &QuerySpec) -> AppResult<Vec<Value>> {
    let predicates = schema.compile(&spec.filter)?;

    let mut matched: Vec<Value> = documents
        .into_iter()
        .filter(|doc| predicates.iter().all(|p| matches(doc, p)))
        .collect();

    let mut keys: Vec<(&FieldDef, SortDirection)> = spec
        .sort
        .iter()
        .filter_map(|sort| schema.field(&sort.field).map(|def| (def, sort.direction)))
        .collect();
    if let Some(id) = schema.field("id") {
        if !keys.iter().any(|(def, _)| def.name == id.name) {
            keys.push((id, SortDirection::Asc));
        }
    }
    matched.sort_by(|a, b| {
        keys.iter()
            .map(|(def, direction)| {
                let ordering = compare_field(a.get(def.name), b.get(def.name), def.kind);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    let skip = usize::try_from(spec.skip()).unwrap_or(usize::MAX);
    let limit = usize::try_from(spec.limit()).unwrap_or(usize::MAX);
    Ok(matched
        .into_iter()
        .skip(skip)
        .take(limit)
        .map(|doc| project(schema, doc, &spec.projection))
        .collect())
}

/// Null and missing fields never satisfy a predicate.
fn matches(doc: &Value, predicate: &Predicate) -> bool {
    doc.get(predicate.field.name)
        .filter(|v| !v.is_null())
        .and_then(|actual| compare_scalar(actual, &predicate.value))
        .is_some_and(|ordering| predicate.op.accepts(ordering))
}

fn compare_scalar(actual: &Value, expected: &Scalar) -> Option<Ordering> {
    match expected {
        Scalar::Uuid(v) => actual.as_str()?.parse::<uuid::Uuid>().ok().map(|a| a.cmp(v)),
        Scalar::Text(v) => actual.as_str().map(|a| a.cmp(v.as_str())),
        Scalar::Integer(v) => actual.as_f64()?.partial_cmp(&(*v as f64)),
        Scalar::Float(v) => actual.as_f64()?.partial_cmp(v),
        Scalar::Boolean(v) => actual.as_bool().map(|a| a.cmp(v)),
        Scalar::Timestamp(v) => parse_timestamp(actual.as_str()?).map(|a| a.cmp(v)),
    }
}

/// Missing values order after present ones, like PostgreSQL's
/// `NULLS LAST` for ascending sorts.
fn compare_field(a: Option<&Value>, b: Option<&Value>, kind: FieldKind) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match kind {
            FieldKind::Integer | FieldKind::Float => a
                .as_f64()
                .zip(b.as_f64())
                .and_then(|(a, b)| a.partial_cmp(&b))
                .unwrap_or(Ordering::Equal),
            FieldKind::Uuid | FieldKind::Text => a.as_str().cmp(&b.as_str()),
            FieldKind::Boolean => a.as_bool().cmp(&b.as_bool()),
            FieldKind::Timestamp => a
                .as_str()
                .and_then(parse_timestamp)
                .cmp(&b.as_str().and_then(parse_timestamp)),
        },
    }
}

fn project(schema: &Schema, doc: Value, projection: &Projection) -> Value {
    let Value::Object(fields) = doc else {
        return doc;
    };
    let kept: Map<String, Value> = fields
        .into_iter()
        .filter(|(name, _)| {
            schema.field(name).is_some_and(|def| !def.hidden) && projection.includes(name)
        })
        .collect();
    Value::Object(kept)
}
