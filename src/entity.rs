//! Entity trait and per-registration descriptor.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record kind that can be CRUD-managed: default-constructible, (de)serializable,
/// and safe to move across request workers. Implemented per concrete entity type;
/// each implementation is monomorphized at compile time, so the factory and pool
/// need no runtime type inspection.
pub trait Entity: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Canonical entity name. The descriptor lowercases it for route segments
    /// and response envelope keys.
    const NAME: &'static str;
}

/// Identity of one registered entity kind. Built once at registration and
/// immutable for the lifetime of the registration.
#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    name: String,
    type_name: &'static str,
}

impl EntityDescriptor {
    pub fn of<T: Entity>() -> Self {
        EntityDescriptor {
            name: T::NAME.to_ascii_lowercase(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Lowercase name used in route paths and the `_embedded` envelope key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
