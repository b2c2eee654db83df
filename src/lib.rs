//! Crudkit: generated CRUD REST handlers over a bounded pool of reusable
//! entity instances.
//!
//! Implement [`Entity`] for a record type and [`Repository`] for its store,
//! then mount [`ModelRoutes`] on an axum router. Each request borrows a
//! pre-built instance (or collection) handle from the per-entity pool and
//! falls back to a fresh allocation when the pool is empty, so handlers never
//! block on the pool.

pub mod entity;
pub mod error;
pub mod factory;
pub mod handlers;
pub mod pool;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

pub use entity::{Entity, EntityDescriptor};
pub use error::{AppError, RepoError};
pub use factory::{make_collection, make_instance, DEFAULT_COLLECTION_CAPACITY};
pub use pool::{InstancePool, PooledCollection, PooledInstance, DEFAULT_POOL_CAPACITY};
pub use repository::Repository;
pub use routes::{common_routes, ModelRoutes};
pub use state::ModelState;
