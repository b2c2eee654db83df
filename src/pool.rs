//! Bounded pool of pre-built entity handles with non-blocking borrow/return.
//!
//! Two ownership channels per registered entity type: one of single instances,
//! one of collections. `acquire` takes without blocking and falls back to a
//! fresh allocation when the channel is empty; a fallback handle carries no
//! return slot and is dropped after use, so steady-state memory stays bounded
//! by the configured capacity.

use crate::entity::Entity;
use crate::factory::{make_collection, make_instance, DEFAULT_COLLECTION_CAPACITY};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Handles of each kind pre-seeded per entity type.
pub const DEFAULT_POOL_CAPACITY: usize = 20;

pub struct InstancePool<T: Entity> {
    instance_tx: Sender<Box<T>>,
    instance_rx: Receiver<Box<T>>,
    collection_tx: Sender<Vec<T>>,
    collection_rx: Receiver<Vec<T>>,
    capacity: usize,
}

impl<T: Entity> InstancePool<T> {
    /// Build a pool pre-seeded with `capacity` instances and `capacity`
    /// collections.
    pub fn new(capacity: usize) -> Self {
        let (instance_tx, instance_rx) = seeded_channel(capacity, || make_instance::<T>());
        let (collection_tx, collection_rx) =
            seeded_channel(capacity, || make_collection::<T>(DEFAULT_COLLECTION_CAPACITY));
        InstancePool {
            instance_tx,
            instance_rx,
            collection_tx,
            collection_rx,
            capacity,
        }
    }

    /// Borrow an instance handle. Never blocks: an empty channel means a fresh
    /// allocation that will not be returned to the pool.
    pub fn acquire(&self) -> PooledInstance<T> {
        match self.instance_rx.try_recv() {
            Ok(value) => PooledInstance {
                value: Some(value),
                slot: Some(self.instance_tx.clone()),
            },
            Err(_) => {
                tracing::debug!(
                    entity = std::any::type_name::<T>(),
                    "instance pool empty, allocating fresh"
                );
                PooledInstance {
                    value: Some(make_instance()),
                    slot: None,
                }
            }
        }
    }

    /// Borrow a collection handle; same non-blocking fallback as [`acquire`](Self::acquire).
    pub fn acquire_collection(&self) -> PooledCollection<T> {
        match self.collection_rx.try_recv() {
            Ok(value) => PooledCollection {
                value: Some(value),
                slot: Some(self.collection_tx.clone()),
            },
            Err(_) => {
                tracing::debug!(
                    entity = std::any::type_name::<T>(),
                    "collection pool empty, allocating fresh"
                );
                PooledCollection {
                    value: Some(make_collection(DEFAULT_COLLECTION_CAPACITY)),
                    slot: None,
                }
            }
        }
    }

    /// Replace both channels with freshly seeded ones. Configuration-time
    /// only: must not run while operations are in flight. Handles still out
    /// return into the replaced channel and are dropped with it.
    pub fn set_capacity(&mut self, capacity: usize) {
        let (instance_tx, instance_rx) = seeded_channel(capacity, || make_instance::<T>());
        let (collection_tx, collection_rx) =
            seeded_channel(capacity, || make_collection::<T>(DEFAULT_COLLECTION_CAPACITY));
        self.instance_tx = instance_tx;
        self.instance_rx = instance_rx;
        self.collection_tx = collection_tx;
        self.collection_rx = collection_rx;
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances currently resting in the pool (not loaned out).
    pub fn idle_instances(&self) -> usize {
        self.instance_rx.len()
    }

    /// Collections currently resting in the pool.
    pub fn idle_collections(&self) -> usize {
        self.collection_rx.len()
    }
}

impl<T: Entity> Default for InstancePool<T> {
    fn default() -> Self {
        InstancePool::new(DEFAULT_POOL_CAPACITY)
    }
}

fn seeded_channel<V>(capacity: usize, mut fresh: impl FnMut() -> V) -> (Sender<V>, Receiver<V>) {
    let (tx, rx) = bounded(capacity);
    for _ in 0..capacity {
        // Cannot fail: the channel has exactly `capacity` free slots.
        let _ = tx.try_send(fresh());
    }
    (tx, rx)
}

/// A borrowed single-instance handle. Dereferences to the entity record;
/// returned to its channel on drop, or simply dropped if it was a fallback
/// allocation or the pool has been replaced since the loan.
pub struct PooledInstance<T: Entity> {
    value: Option<Box<T>>,
    slot: Option<Sender<Box<T>>>,
}

impl<T: Entity> PooledInstance<T> {
    /// Whether this handle came out of the pool (fallback handles never go back).
    pub fn is_pooled(&self) -> bool {
        self.slot.is_some()
    }
}

impl<T: Entity> Deref for PooledInstance<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value.as_deref().expect("handle present until drop")
    }
}

impl<T: Entity> DerefMut for PooledInstance<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_deref_mut().expect("handle present until drop")
    }
}

impl<T: Entity> Drop for PooledInstance<T> {
    fn drop(&mut self) {
        if let (Some(value), Some(slot)) = (self.value.take(), self.slot.take()) {
            let _ = slot.try_send(value);
        }
    }
}

/// A borrowed collection handle; see [`PooledInstance`].
pub struct PooledCollection<T: Entity> {
    value: Option<Vec<T>>,
    slot: Option<Sender<Vec<T>>>,
}

impl<T: Entity> PooledCollection<T> {
    pub fn is_pooled(&self) -> bool {
        self.slot.is_some()
    }
}

impl<T: Entity> Deref for PooledCollection<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        self.value.as_ref().expect("handle present until drop")
    }
}

impl<T: Entity> DerefMut for PooledCollection<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        self.value.as_mut().expect("handle present until drop")
    }
}

impl<T: Entity> Drop for PooledCollection<T> {
    fn drop(&mut self) {
        if let (Some(value), Some(slot)) = (self.value.take(), self.slot.take()) {
            let _ = slot.try_send(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};

    #[derive(Default, Serialize, Deserialize)]
    struct Rec {
        id: i64,
    }

    impl Entity for Rec {
        const NAME: &'static str = "rec";
    }

    #[test]
    fn seeds_capacity_distinct_handles() {
        let pool: InstancePool<Rec> = InstancePool::new(4);
        assert_eq!(pool.idle_instances(), 4);
        assert_eq!(pool.idle_collections(), 4);

        let handles: Vec<_> = (0..4).map(|_| pool.acquire()).collect();
        let addrs: HashSet<usize> = handles.iter().map(|h| &**h as *const Rec as usize).collect();
        assert_eq!(addrs.len(), 4);
        assert!(handles.iter().all(|h| h.is_pooled()));
        assert!(!pool.acquire().is_pooled());
    }

    #[test]
    fn zero_capacity_always_falls_back() {
        let pool: InstancePool<Rec> = InstancePool::new(0);
        for _ in 0..3 {
            let h = pool.acquire();
            assert!(!h.is_pooled());
            drop(h);
            assert_eq!(pool.idle_instances(), 0);
        }
        assert!(!pool.acquire_collection().is_pooled());
    }

    #[test]
    fn release_then_acquire_round_trips_same_handle() {
        let pool: InstancePool<Rec> = InstancePool::new(1);
        let mut first = pool.acquire();
        let addr = &*first as *const Rec as usize;
        assert!(first.is_pooled());
        first.id = 7;
        drop(first);
        assert_eq!(pool.idle_instances(), 1);

        let second = pool.acquire();
        assert!(second.is_pooled());
        assert_eq!(&*second as *const Rec as usize, addr);
        // Fields are not reset between loans; operations overwrite wholesale.
        assert_eq!(second.id, 7);
        assert_eq!(pool.idle_instances(), 0);
    }

    #[test]
    fn fallback_collection_has_default_capacity() {
        let pool: InstancePool<Rec> = InstancePool::new(0);
        let c = pool.acquire_collection();
        assert!(c.capacity() >= DEFAULT_COLLECTION_CAPACITY);
        assert!(c.is_empty());
    }

    #[test]
    fn concurrent_acquires_split_pooled_and_fresh() {
        const K: usize = 3;
        const N: usize = 10;
        let pool: Arc<InstancePool<Rec>> = Arc::new(InstancePool::new(K));
        let barrier = Arc::new(Barrier::new(N));

        let workers: Vec<_> = (0..N)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    let h = pool.acquire();
                    let pooled = h.is_pooled();
                    // Hold all loans simultaneously so pooled handles cannot
                    // be recycled mid-test.
                    barrier.wait();
                    pooled
                })
            })
            .collect();

        let results: Vec<bool> = workers
            .into_iter()
            .map(|w| w.join().expect("worker"))
            .collect();
        let pooled = results.iter().filter(|p| **p).count();
        assert_eq!(pooled, K);
        assert_eq!(pool.idle_instances(), K);
    }

    #[test]
    fn set_capacity_replaces_channels() {
        let mut pool: InstancePool<Rec> = InstancePool::new(2);
        let stale = pool.acquire();
        pool.set_capacity(5);
        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.idle_instances(), 5);

        // Loan from the replaced channel does not rejoin the new pool.
        drop(stale);
        assert_eq!(pool.idle_instances(), 5);
    }
}
