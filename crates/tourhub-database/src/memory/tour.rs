//! In-memory tour store.

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
use tourhub_entity::tour::Tour;

use super::query;
use crate::schema::TOURS;

/// Tour store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTourStore {
    tours: Arc<DashMap<Uuid, Tour>>,
    /// Name → id index enforcing uniqueness.
    names: Arc<DashMap<String, Uuid>>,
}

impl MemoryTourStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_name(&self, name: &str, id: Uuid) -> AppResult<()> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) if *entry.get() != id => Err(AppError::conflict(format!(
                "A tour named '{name}' already exists"
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Repository<Tour, Uuid> for MemoryTourStore {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Tour>> {
        Ok(self.tours.get(id).map(|t| t.clone()))
    }

    async fn create(&self, tour: &Tour) -> AppResult<Tour> {
        tour.validate()?;
        self.claim_name(&tour.name, tour.id)?;
        self.tours.insert(tour.id, tour.clone());
        Ok(tour.clone())
    }

    async fn update(&self, tour: &Tour) -> AppResult<Tour> {
        tour.validate()?;
        let previous_name = self
            .tours
            .get(&tour.id)
            .map(|existing| existing.name.clone())
            .ok_or_else(|| AppError::not_found("No tour found with that ID"))?;

        if previous_name != tour.name {
            self.claim_name(&tour.name, tour.id)?;
            self.names.remove(&previous_name);
        }
        self.tours.insert(tour.id, tour.clone());
        Ok(tour.clone())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        match self.tours.remove(id) {
            Some((_, tour)) => {
                self.names.remove(&tour.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Collection for MemoryTourStore {
    async fn find(&self, spec: &QuerySpec) -> AppResult<Vec<Value>> {
        let documents = self
            .tours
            .iter()
            .map(|entry| serde_json::to_value(entry.value()).map_err(AppError::from))
            .collect::<AppResult<Vec<_>>>()?;
        query::run(&TOURS, documents, spec)
    }
}
