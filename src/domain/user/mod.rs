// src/domain/user/mod.rs
pub mod entity;
pub mod value_objects;

pub use entity::Actor;
pub use value_objects::{Capability, Role, UserId};
