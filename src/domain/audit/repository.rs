use crate::domain::audit::entity::{AuditLog, AuditLogEntry, NewAuditLog};
use crate::domain::audit::filter::AuditLogFilter;
use crate::domain::audit::stats::{ActionTypeCount, EntityTypeCount};
use crate::domain::audit::value_objects::EntityType;
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;

/// Append-only store of audit rows. There is no update or delete path.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog>;

    /// Rows matching `filter`, newest first (`action_time DESC, id DESC`),
    /// with actors resolved and no repeated ids.
    async fn find_page(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<Page<AuditLogEntry>>;

    /// Every row for one resource instance in append order
    /// (`action_time ASC, id ASC`).
    async fn find_history(
        &self,
        entity_type: &EntityType,
        entity_id: i64,
    ) -> DomainResult<Vec<AuditLogEntry>>;

    async fn count(&self) -> DomainResult<u64>;

    async fn count_by_action_type(&self) -> DomainResult<Vec<ActionTypeCount>>;

    /// Sorted by count descending.
    async fn count_by_entity_type(&self) -> DomainResult<Vec<EntityTypeCount>>;
}
