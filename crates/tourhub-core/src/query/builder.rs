//! Translation of raw list-endpoint query parameters into a [`QuerySpec`].
//!
//! Accepted filter syntax:
//!
//! - `field=value`: equality
//! - `field=gte:100`: comparison token in value position
//! - `field[gte]=100`: comparison token in key position
//!
//! Only `eq`, `gt`, `gte`, `lt`, `lte` are recognized. A bracketed token
//! outside that set, or a field name that is not a plain identifier, drops
//! the parameter entirely.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::types::projection::REVISION_FIELD;
use crate::types::{Filter, FilterField, FilterOp, PageRequest, Projection, SortField};

use super::spec::QuerySpec;

/// Parameters that control the query shape instead of filtering.
pub const RESERVED_PARAMS: [&str; 5] = ["page", "sort", "limit", "pageSize", "fields"];
/// Field used when no `sort` parameter is supplied (descending).
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

const MAX_FIELD_LEN: usize = 64;

/// Build a [`QuerySpec`] from a flat parameter map.
///
/// Deterministic and order-independent: equal maps always produce equal
/// specs. The input is never modified.
pub fn build(params: &HashMap<String, String>) -> QuerySpec {
    QuerySpec {
        filter: build_filter(params),
        sort: build_sort(params.get("sort").map(String::as_str)),
        projection: build_projection(params.get("fields").map(String::as_str)),
        page: PageRequest::from_raw(
            params.get("page").map(String::as_str),
            params
                .get("limit")
                .or_else(|| params.get("pageSize"))
                .map(String::as_str),
        ),
    }
}

fn build_filter(params: &HashMap<String, String>) -> Filter {
    let conditions = params
        .iter()
        .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let condition = parse_condition(key, value);
            if condition.is_none() {
                debug!(param = %key, "Ignoring unsupported filter parameter");
            }
            condition
        })
        .collect();

    Filter::from_conditions(conditions)
}

fn parse_condition(key: &str, value: &str) -> Option<FilterField> {
    if let Some((field, rest)) = key.split_once('[') {
        let token = rest.strip_suffix(']')?;
        let op = FilterOp::from_token(token)?;
        if !is_field_name(field) {
            return None;
        }
        return Some(FilterField::new(field, op, value));
    }

    if !is_field_name(key) {
        return None;
    }

    let (op, operand) = split_value_operator(value);
    Some(FilterField::new(key, op, operand))
}

/// Split `gte:100` into (`Gte`, `100`). Anything else is an equality match
/// on the whole value.
fn split_value_operator(value: &str) -> (FilterOp, &str) {
    if let Some((token, operand)) = value.split_once(':') {
        if let Some(op) = FilterOp::from_token(token) {
            return (op, operand);
        }
    }
    (FilterOp::Eq, value)
}

fn build_sort(raw: Option<&str>) -> Vec<SortField> {
    let sort: Vec<SortField> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .map(SortField::parse)
        .filter(|s| is_field_name(&s.field))
        .collect();

    if sort.is_empty() {
        vec![SortField::desc(DEFAULT_SORT_FIELD)]
    } else {
        sort
    }
}

fn build_projection(raw: Option<&str>) -> Projection {
    let mut include = BTreeSet::new();
    let mut exclude = BTreeSet::from([REVISION_FIELD.to_string()]);

    for token in raw.unwrap_or_default().split(',').map(str::trim) {
        match token.strip_prefix('-') {
            Some(name) if is_field_name(name) => {
                exclude.insert(name.to_string());
            }
            None if is_field_name(token) => {
                include.insert(token.to_string());
            }
            _ => {}
        }
    }

    if include.is_empty() {
        Projection::Exclude(exclude)
    } else {
        Projection::Include(include)
    }
}

/// A plain identifier: ASCII letters, digits, and `_`, not starting with a
/// digit. Rejects `$`-prefixed operators, dotted paths, and brackets.
fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= MAX_FIELD_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
