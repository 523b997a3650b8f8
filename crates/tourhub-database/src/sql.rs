//! Translation of a [`QuerySpec`] into parameterised PostgreSQL.

use sqlx::{Postgres, QueryBuilder};

use tourhub_core::QuerySpec;
use tourhub_core::result::AppResult;

use crate::schema::{Scalar, Schema};

/// Build a `SELECT` returning one JSON document per row.
///
/// Identifiers come only from the schema catalogue; every client value is
/// a bind parameter. Rows are ordered by the requested keys with the
/// primary key as final tie-breaker so pages never overlap.
pub fn select_documents(
    schema: &Schema,
    spec: &QuerySpec,
) -> AppResult<QueryBuilder<'static, Postgres>> {
    let predicates = schema.compile(&spec.filter)?;

    let mut qb = QueryBuilder::new("SELECT jsonb_build_object(");
    let projected = schema
        .visible()
        .filter(|def| spec.projection.includes(def.name));
    for (i, def) in projected.enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push("'").push(def.name).push("', ").push(def.column);
    }
    qb.push(") AS doc FROM ").push(schema.table);

    for (i, predicate) in predicates.into_iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(predicate.field.column)
            .push(" ")
            .push(predicate.op.as_sql())
            .push(" ");
        push_scalar(&mut qb, predicate.value);
    }

    let mut order: Vec<String> = spec
        .sort
        .iter()
        .filter_map(|sort| {
            schema
                .field(&sort.field)
                .map(|def| format!("{} {}", def.column, sort.direction.as_sql()))
        })
        .collect();
    if !spec.sort.iter().any(|sort| sort.field == "id") {
        order.push("id ASC".to_string());
    }
    qb.push(" ORDER BY ").push(order.join(", "));

    qb.push(" LIMIT ")
        .push_bind(to_i64(spec.limit()))
        .push(" OFFSET ")
        .push_bind(to_i64(spec.skip()));

    Ok(qb)
}

fn push_scalar(qb: &mut QueryBuilder<'static, Postgres>, value: Scalar) {
    match value {
        Scalar::Uuid(v) => qb.push_bind(v),
        Scalar::Text(v) => qb.push_bind(v),
        Scalar::Integer(v) => qb.push_bind(v),
        Scalar::Float(v) => qb.push_bind(v),
        Scalar::Boolean(v) => qb.push_bind(v),
        Scalar::Timestamp(v) => qb.push_bind(v),
    };
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
