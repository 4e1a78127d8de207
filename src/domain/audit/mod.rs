// src/domain/audit/mod.rs
pub mod entity;
pub mod filter;
pub mod repository;
pub mod stats;
pub mod value_objects;

pub use entity::{AuditLog, AuditLogEntry, NewAuditLog, dedupe_by_id, stitch_actors};
pub use filter::{AuditLogFilter, FilterValue, TimeRange};
pub use repository::AuditLogRepository;
pub use stats::{ActionTypeCount, EntityTypeCount};
pub use value_objects::{ActionType, AuditLogId, EntityType};
