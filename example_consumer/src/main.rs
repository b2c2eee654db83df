//! Example consumer: registers one entity against an in-memory store and
//! serves the generated CRUD routes.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Then try: `curl -s localhost:3000/api/v1/book | jq`

use async_trait::async_trait;
use axum::Router;
use crudkit::{common_routes, Entity, ModelRoutes, RepoError, Repository};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
struct Book {
    id: i64,
    title: String,
    author: String,
}

impl Entity for Book {
    const NAME: &'static str = "book";
}

struct BookStore {
    rows: Mutex<Vec<Book>>,
}

#[async_trait]
impl Repository<Book> for BookStore {
    async fn find_all(&self, out: &mut Vec<Book>) -> Result<(), RepoError> {
        let rows = self.rows.lock().map_err(|_| RepoError::Backend("poisoned lock".into()))?;
        out.clear();
        out.extend(rows.iter().cloned());
        Ok(())
    }

    async fn find_by_id(&self, out: &mut Book, id: i64) -> Result<(), RepoError> {
        let rows = self.rows.lock().map_err(|_| RepoError::Backend("poisoned lock".into()))?;
        let row = rows
            .iter()
            .find(|b| b.id == id)
            .ok_or(RepoError::NotFound(id))?;
        *out = row.clone();
        Ok(())
    }

    async fn create(&self, record: &Book) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().map_err(|_| RepoError::Backend("poisoned lock".into()))?;
        if rows.iter().any(|b| b.id == record.id) {
            return Err(RepoError::Backend(format!("duplicate id {}", record.id)));
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn delete(&self, record: &Book) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().map_err(|_| RepoError::Backend("poisoned lock".into()))?;
        rows.retain(|b| b.id != record.id);
        Ok(())
    }

    async fn save(&self, record: &Book) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().map_err(|_| RepoError::Backend("poisoned lock".into()))?;
        let row = rows
            .iter_mut()
            .find(|b| b.id == record.id)
            .ok_or(RepoError::NotFound(record.id))?;
        *row = record.clone();
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crudkit=debug")),
        )
        .init();

    let store = Arc::new(BookStore {
        rows: Mutex::new(vec![Book {
            id: 1,
            title: "The Pragmatic Programmer".into(),
            author: "Hunt & Thomas".into(),
        }]),
    });

    let app = common_routes().merge(
        ModelRoutes::<Book, BookStore>::new(store, "/api/v1")
            .with_pool_capacity(8)
            .register(Router::new()),
    );

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
