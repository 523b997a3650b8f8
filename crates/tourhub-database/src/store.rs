//! Store traits consumed by the auth and API layers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::review::Review;
use tourhub_entity::tour::Tour;
use tourhub_entity::user::User;

/// Options for [`UserStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Check profile invariants before writing.
    pub validate: bool,
}

impl SaveOptions {
    /// Persist the record as-is. Used when only credential bookkeeping
    /// fields changed.
    pub fn skip_validation() -> Self {
        Self { validate: false }
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Principal store.
#[async_trait]
pub trait UserStore: Repository<User, Uuid> + Collection {
    /// Find an account by its (normalised) email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Atomically redeem reset token `digest`: if an active account still
    /// holds it live at `now`, store `password_hash`, stamp the change at
    /// `now` and clear the token. Returns `None` when nothing matched.
    ///
    /// Of concurrent calls with the same digest at most one returns `Some`.
    async fn redeem_reset_token(
        &self,
        digest: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// Persist every field of an existing account.
    async fn save(&self, user: &User, options: SaveOptions) -> AppResult<User>;
}

/// Tour store.
pub trait TourStore: Repository<Tour, Uuid> + Collection {}

impl<T> TourStore for T where T: Repository<Tour, Uuid> + Collection {}

/// Review store.
pub trait ReviewStore: Repository<Review, Uuid> + Collection {}

impl<T> ReviewStore for T where T: Repository<Review, Uuid> + Collection {}
