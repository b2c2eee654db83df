//! Construction of fresh zero-valued instances and collections.

use crate::entity::Entity;

/// Initial capacity of a freshly built collection handle. The persistence
/// collaborator replaces the contents wholesale, so only capacity matters.
pub const DEFAULT_COLLECTION_CAPACITY: usize = 10;

/// Build a fresh zero-valued instance. Boxed so the handle stays addressable
/// at a stable location while it is populated in place and recycled.
pub fn make_instance<T: Entity>() -> Box<T> {
    Box::new(T::default())
}

/// Build a fresh empty collection with the given capacity.
pub fn make_collection<T: Entity>(capacity: usize) -> Vec<T> {
    Vec::with_capacity(capacity)
}
