//! PostgreSQL repository implementations.

pub mod review;
pub mod tour;
pub mod user;

pub use review::ReviewRepository;
pub use tour::TourRepository;
pub use user::UserRepository;

use tourhub_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning a violation of `unique_constraint` into a
/// `Conflict` carrying `conflict_message`.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    unique_constraint: &str,
    conflict_message: impl Into<String>,
    context: &str,
) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(unique_constraint) => {
            AppError::conflict(conflict_message)
        }
        e => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}
