//! In-memory principal store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use uuid::Uuid;

use tourhub_core::QuerySpec;
use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::user::User;
use tourhub_entity::user::model::normalize_email;

use super::query;
use crate::schema::USERS;
use crate::store::{SaveOptions, UserStore};

/// Principal store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<Uuid, User>>,
    /// Email → id index enforcing uniqueness.
    emails: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_email(&self, email: &str, id: Uuid) -> AppResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(entry) if *entry.get() != id => Err(AppError::conflict(format!(
                "Email '{email}' is already registered"
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                Ok(())
            }
        }
    }
}

/// JSON form used for list queries, including filter-only fields.
fn document(user: &User) -> AppResult<Value> {
    let mut doc = serde_json::to_value(user)?;
    if let Value::Object(fields) = &mut doc {
        fields.insert("active".to_string(), Value::Bool(user.active));
    }
    Ok(doc)
}

#[async_trait]
impl Repository<User, Uuid> for MemoryUserStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        user.validate()?;
        self.claim_email(&user.email, user.id)?;
        self.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        self.save(user, SaveOptions::default()).await
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        match self.users.remove(id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Collection for MemoryUserStore {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let documents = self
            .users
            .iter()
            .map(|entry| document(entry.value()))
            .collect::<AppResult<Vec<_>>>()?;
        query::run(&USERS, documents, spec)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&normalize_email(email)).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn redeem_reset_token(
        &self,
        digest: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let Some(id) = self
            .users
            .iter()
            .find(|entry| entry.password_reset_token.as_deref() == Some(digest))
            .map(|entry| *entry.key())
        else {
            return Ok(None);
        };

        // Re-check under the entry lock; a racing redeem may have won.
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(None);
        };
        if user.password_reset_token.as_deref() != Some(digest)
            || !user.reset_token_live(now)
            || !user.active
        {
            return Ok(None);
        }
        user.set_password(password_hash, now);
        user.clear_reset_token();
        Ok(Some(user.clone()))
    }

    async fn save(&self, user: &User, options: SaveOptions) -> AppResult<User> {
        if options.validate {
            user.validate()?;
        }
        let previous_email = self
            .users
            .get(&user.id)
            .map(|existing| existing.email.clone())
            .ok_or_else(|| AppError::not_found("No user found with that ID"))?;

        if previous_email != user.email {
            self.claim_email(&user.email, user.id)?;
            self.emails.remove(&previous_email);
        }
        self.users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}
