//! HTTP handlers generated per registered entity type.

pub mod entity;

pub use entity::*;
