//! Persistence collaborator seam. Query execution lives behind this trait;
//! the generated handlers only lend it pre-built handles to populate.

use crate::entity::Entity;
use crate::error::RepoError;
use async_trait::async_trait;

/// Executes find/create/save/delete against a data store for one entity type.
///
/// Populate-in-place contract: `find_all` must replace the collection's entire
/// contents, and `find_by_id` must overwrite every field of `out`. Handles are
/// recycled across requests without a field reset, so a partial write would
/// leak a previous request's values.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    /// Load all records into `out`.
    async fn find_all(&self, out: &mut Vec<T>) -> Result<(), RepoError>;

    /// Load the record with the given primary key into `out`.
    async fn find_by_id(&self, out: &mut T, id: i64) -> Result<(), RepoError>;

    /// Insert a new record.
    async fn create(&self, record: &T) -> Result<(), RepoError>;

    /// Delete a previously fetched record.
    async fn delete(&self, record: &T) -> Result<(), RepoError>;

    /// Persist changes to a previously fetched record.
    async fn save(&self, record: &T) -> Result<(), RepoError>;
}
