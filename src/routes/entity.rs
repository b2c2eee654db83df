//! Registration surface: binds the five generated handlers for one entity
//! type, with an optional override slot per operation.

use crate::entity::{Entity, EntityDescriptor};
use crate::handlers;
use crate::pool::{InstancePool, DEFAULT_POOL_CAPACITY};
use crate::repository::Repository;
use crate::state::ModelState;
use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;
use std::sync::Arc;

/// Builder for one entity registration. Construct, optionally adjust the pool
/// capacity or replace handlers, then [`register`](Self::register) onto the
/// application router.
pub struct ModelRoutes<T: Entity, R: Repository<T>> {
    state: ModelState<T, R>,
    list: Option<MethodRouter<ModelState<T, R>>>,
    read: Option<MethodRouter<ModelState<T, R>>>,
    create: Option<MethodRouter<ModelState<T, R>>>,
    delete: Option<MethodRouter<ModelState<T, R>>>,
    update: Option<MethodRouter<ModelState<T, R>>>,
}

impl<T: Entity, R: Repository<T>> ModelRoutes<T, R> {
    /// Register `T` against a persistence collaborator, mounted under
    /// `base_path` (for example "/api/v1"; may be empty for the root). Seeds
    /// the pool at [`DEFAULT_POOL_CAPACITY`].
    pub fn new(repo: Arc<R>, base_path: &str) -> Self {
        let base_path = normalize_base(base_path);
        ModelRoutes {
            state: ModelState {
                descriptor: Arc::new(EntityDescriptor::of::<T>()),
                pool: Arc::new(InstancePool::new(DEFAULT_POOL_CAPACITY)),
                repo,
                base_path: base_path.into(),
            },
            list: None,
            read: None,
            create: None,
            delete: None,
            update: None,
        }
    }

    /// Re-seed the pool at a new capacity. Configuration-time only; no
    /// handlers can be in flight before registration.
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        match Arc::get_mut(&mut self.state.pool) {
            Some(pool) => pool.set_capacity(capacity),
            None => self.state.pool = Arc::new(InstancePool::new(capacity)),
        }
        self
    }

    /// Replace the generated list handler.
    pub fn with_list(mut self, route: MethodRouter<ModelState<T, R>>) -> Self {
        self.list = Some(route);
        self
    }

    /// Replace the generated read-by-id handler.
    pub fn with_read(mut self, route: MethodRouter<ModelState<T, R>>) -> Self {
        self.read = Some(route);
        self
    }

    /// Replace the generated create handler.
    pub fn with_create(mut self, route: MethodRouter<ModelState<T, R>>) -> Self {
        self.create = Some(route);
        self
    }

    /// Replace the generated delete-by-id handler.
    pub fn with_delete(mut self, route: MethodRouter<ModelState<T, R>>) -> Self {
        self.delete = Some(route);
        self
    }

    /// Replace the generated update-by-id handler.
    pub fn with_update(mut self, route: MethodRouter<ModelState<T, R>>) -> Self {
        self.update = Some(route);
        self
    }

    /// Read access to the handler state, for custom handlers built outside
    /// the defaults.
    pub fn state(&self) -> &ModelState<T, R> {
        &self.state
    }

    /// Bind `GET /{name}`, `POST /{name}`, `GET|PUT|DELETE /{name}/:id` under
    /// the base path and return the extended router. Duplicate registration
    /// follows the router's own rules (axum panics on a repeated path).
    pub fn register(self, app: Router) -> Router {
        let name = self.state.descriptor.name().to_string();
        let base = self.state.base_path.to_string();

        let collection = self
            .list
            .unwrap_or_else(|| get(handlers::list::<T, R>))
            .merge(self.create.unwrap_or_else(|| post(handlers::create::<T, R>)));
        let item = self
            .read
            .unwrap_or_else(|| get(handlers::read::<T, R>))
            .merge(self.update.unwrap_or_else(|| put(handlers::update::<T, R>)))
            .merge(
                self.delete
                    .unwrap_or_else(|| delete(handlers::delete::<T, R>)),
            );

        let routes = Router::new()
            .route(&format!("/{name}"), collection)
            .route(&format!("/{name}/:id"), item)
            .with_state(self.state);

        if base.is_empty() {
            app.merge(routes)
        } else {
            app.nest(&base, routes)
        }
    }
}

fn normalize_base(base_path: &str) -> String {
    let trimmed = base_path.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
