//! Shared handler state for one registered entity type.

use crate::entity::{Entity, EntityDescriptor};
use crate::pool::InstancePool;
use crate::repository::Repository;
use std::sync::Arc;

pub struct ModelState<T: Entity, R: Repository<T>> {
    pub descriptor: Arc<EntityDescriptor>,
    pub pool: Arc<InstancePool<T>>,
    pub repo: Arc<R>,
    /// Mount prefix, used when building the collection self link.
    pub base_path: Arc<str>,
}

// Manual impl: T and R need not be Clone themselves.
impl<T: Entity, R: Repository<T>> Clone for ModelState<T, R> {
    fn clone(&self) -> Self {
        ModelState {
            descriptor: Arc::clone(&self.descriptor),
            pool: Arc::clone(&self.pool),
            repo: Arc::clone(&self.repo),
            base_path: Arc::clone(&self.base_path),
        }
    }
}
