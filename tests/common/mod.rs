//! Shared fixtures: the Widget entity and in-memory repositories.

use async_trait::async_trait;
use crudkit::{Entity, ModelRoutes, RepoError, Repository};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: i64,
    pub name: String,
}

impl Entity for Widget {
    const NAME: &'static str = "widget";
}

/// In-memory store seeded per test.
pub struct MemoryRepo {
    rows: Mutex<Vec<Widget>>,
}

impl MemoryRepo {
    pub fn seeded(rows: Vec<Widget>) -> Arc<Self> {
        Arc::new(MemoryRepo {
            rows: Mutex::new(rows),
        })
    }
}

#[async_trait]
impl Repository<Widget> for MemoryRepo {
    async fn find_all(&self, out: &mut Vec<Widget>) -> Result<(), RepoError> {
        let rows = self.rows.lock().expect("rows lock");
        out.clear();
        out.extend(rows.iter().cloned());
        Ok(())
    }

    async fn find_by_id(&self, out: &mut Widget, id: i64) -> Result<(), RepoError> {
        let rows = self.rows.lock().expect("rows lock");
        let row = rows
            .iter()
            .find(|w| w.id == id)
            .ok_or(RepoError::NotFound(id))?;
        *out = row.clone();
        Ok(())
    }

    async fn create(&self, record: &Widget) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if rows.iter().any(|w| w.id == record.id) {
            return Err(RepoError::Backend(format!("duplicate id {}", record.id)));
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn delete(&self, record: &Widget) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        rows.retain(|w| w.id != record.id);
        Ok(())
    }

    async fn save(&self, record: &Widget) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let row = rows
            .iter_mut()
            .find(|w| w.id == record.id)
            .ok_or(RepoError::NotFound(record.id))?;
        *row = record.clone();
        Ok(())
    }
}

/// Repository whose every call fails, for the 500 mapping.
pub struct BrokenRepo;

#[async_trait]
impl Repository<Widget> for BrokenRepo {
    async fn find_all(&self, _out: &mut Vec<Widget>) -> Result<(), RepoError> {
        Err(RepoError::Backend("store offline".into()))
    }

    async fn find_by_id(&self, _out: &mut Widget, _id: i64) -> Result<(), RepoError> {
        Err(RepoError::Backend("store offline".into()))
    }

    async fn create(&self, _record: &Widget) -> Result<(), RepoError> {
        Err(RepoError::Backend("store offline".into()))
    }

    async fn delete(&self, _record: &Widget) -> Result<(), RepoError> {
        Err(RepoError::Backend("store offline".into()))
    }

    async fn save(&self, _record: &Widget) -> Result<(), RepoError> {
        Err(RepoError::Backend("store offline".into()))
    }
}

pub fn seed() -> Vec<Widget> {
    vec![
        Widget {
            id: 1,
            name: "a".into(),
        },
        Widget {
            id: 2,
            name: "b".into(),
        },
    ]
}

/// Widget routes mounted at /api/v1 against the given repository.
pub fn widget_app<R: Repository<Widget>>(repo: Arc<R>) -> Router {
    ModelRoutes::<Widget, R>::new(repo, "/api/v1").register(Router::new())
}
