//! Queryable field catalogues for each collection.
//!
//! A [`QuerySpec`](tourhub_core::QuerySpec) names fields by their API
//! (camelCase) names. Stores only ever resolve those names through a
//! [`Schema`], so a client can never reach a column that is not listed
//! here, and every filter value is cast to the field's type before it is
//! compared.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use tourhub_core::types::{Filter, FilterOp, FilterValue};
use tourhub_core::{AppError, AppResult};

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Uuid,
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

/// One field of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// API name used in query parameters and documents.
    pub name: &'static str,
    /// SQL expression selecting the field.
    pub column: &'static str,
    pub kind: FieldKind,
    /// Filterable but never returned to clients.
    pub hidden: bool,
}

const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name,
        column,
        kind,
        hidden: false,
    }
}

const fn hidden(name: &'static str, column: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        name,
        column,
        kind,
        hidden: true,
    }
}

/// The field catalogue of one collection.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub table: &'static str,
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Look up a field by API name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that may appear in returned documents.
    pub fn visible(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| !f.hidden)
    }

    /// Resolve and cast every filter condition.
    ///
    /// Conditions on unknown fields are skipped. A value that cannot be
    /// cast to the field type fails the whole query.
    pub fn compile(&self, filter: &Filter) -> AppResult<Vec<Predicate>> {
        let mut predicates = Vec::with_capacity(filter.conditions().len());
        for condition in filter.conditions() {
            let Some(def) = self.field(&condition.field) else {
                debug!(
                    table = self.table,
                    field = %condition.field,
                    "Skipping filter on unknown field"
                );
                continue;
            };
            if def.kind == FieldKind::Boolean && condition.op != FilterOp::Eq {
                return Err(AppError::validation(format!(
                    "Operator '{}' is not supported on field '{}'",
                    condition.op, def.name
                )));
            }
            predicates.push(Predicate {
                field: def,
                op: condition.op,
                value: Scalar::coerce(def, &condition.value)?,
            });
        }
        Ok(predicates)
    }
}

/// A filter condition resolved against a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static FieldDef,
    pub op: FilterOp,
    pub value: Scalar,
}

/// A filter value cast to its field type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Uuid(Uuid),
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Cast a raw value to the type of `def`.
    pub fn coerce(def: &FieldDef, raw: &FilterValue) -> AppResult<Self> {
        let value = match def.kind {
            FieldKind::Uuid => raw.as_str().trim().parse().ok().map(Self::Uuid),
            FieldKind::Text => Some(Self::Text(raw.as_str().to_string())),
            FieldKind::Integer => raw.as_i64().map(Self::Integer),
            FieldKind::Float => raw.as_f64().map(Self::Float),
            FieldKind::Boolean => raw.as_bool().map(Self::Boolean),
            FieldKind::Timestamp => parse_timestamp(raw.as_str()).map(Self::Timestamp),
        };
        value.ok_or_else(|| {
            AppError::validation(format!(
                "Invalid {}: {}",
                def.name,
                raw.as_str()
            ))
        })
    }
}

/// Accept RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Principal collection.
pub const USERS: Schema = Schema {
    table: "users",
    fields: &[
        field("id", "id", FieldKind::Uuid),
        field("name", "name", FieldKind::Text),
        field("email", "email", FieldKind::Text),
        field("photo", "photo", FieldKind::Text),
        field("role", "role::text", FieldKind::Text),
        field("createdAt", "created_at", FieldKind::Timestamp),
        hidden("active", "active", FieldKind::Boolean),
    ],
};

/// Tour collection.
pub const TOURS: Schema = Schema {
    table: "tours",
    fields: &[
        field("id", "id", FieldKind::Uuid),
        field("name", "name", FieldKind::Text),
        field("slug", "slug", FieldKind::Text),
        field("duration", "duration", FieldKind::Integer),
        field("maxGroupSize", "max_group_size", FieldKind::Integer),
        field("difficulty", "difficulty::text", FieldKind::Text),
        field("ratingsAverage", "ratings_average", FieldKind::Float),
        field("ratingsQuantity", "ratings_quantity", FieldKind::Integer),
        field("price", "price", FieldKind::Float),
        field("priceDiscount", "price_discount", FieldKind::Float),
        field("summary", "summary", FieldKind::Text),
        field("description", "description", FieldKind::Text),
        field("secretTour", "secret_tour", FieldKind::Boolean),
        field("createdAt", "created_at", FieldKind::Timestamp),
        field("revision", "revision", FieldKind::Integer),
    ],
};

/// Review collection.
pub const REVIEWS: Schema = Schema {
    table: "reviews",
    fields: &[
        field("id", "id", FieldKind::Uuid),
        field("review", "review", FieldKind::Text),
        field("rating", "rating", FieldKind::Float),
        field("tour", "tour_id", FieldKind::Uuid),
        field("user", "user_id", FieldKind::Uuid),
        field("createdAt", "created_at", FieldKind::Timestamp),
    ],
};
