//! In-memory review store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use uuid::Uuid;

use tourhub_core::QuerySpec;
use tourhub_core::error::AppError;
use tourhub_core::result::AppResult;
use tourhub_core::traits::{Collection, Repository};
use tourhub_entity::review::Review;

use super::query;
use crate::schema::REVIEWS;

const DUPLICATE: &str = "You have already reviewed this tour";

/// Review store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviewStore {
    reviews: Arc<DashMap<Uuid, Review>>,
    /// (tour, author) → review id. One review per author and tour.
    authored: Arc<DashMap<(Uuid, Uuid), Uuid>>,
}

impl MemoryReviewStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Review, Uuid> for MemoryReviewStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Review>> {
        Ok(self.reviews.get(id).map(|r| r.clone()))
    }

    async fn create(&self, review: &Review) -> AppResult<Review> {
        review.validate()?;
        match self.authored.entry((review.tour, review.user)) {
            Entry::Occupied(_) => return Err(AppError::conflict(DUPLICATE)),
            Entry::Vacant(entry) => {
                entry.insert(review.id);
            }
        }
        self.reviews.insert(review.id, review.clone());
        Ok(review.clone())
    }

    async fn update(&self, review: &Review) -> AppResult<Review> {
        review.validate()?;
        let mut stored = self
            .reviews
            .get_mut(&review.id)
            .ok_or_else(|| AppError::not_found("No review found with that ID"))?;
        stored.review = review.review.clone();
        stored.rating = review.rating;
        Ok(stored.clone())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        match self.reviews.remove(id) {
            Some((_, review)) => {
                self.authored.remove(&(review.tour, review.user));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Collection for MemoryReviewStore {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let documents = self
            .reviews
            .iter()
            .map(|entry| serde_json::to_value(entry.value()).map_err(AppError::from))
            .collect::<AppResult<Vec<_>>>()?;
        query::run(&REVIEWS, documents, spec)
    }
}
