use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{ActionTypeCountDto, AuditSummaryDto, AuthenticatedUser, EntityTypeCountDto},
        error::ApplicationResult,
    },
    domain::audit::stats::{sort_action_counts, sort_entity_counts},
};

impl AuditQueryService {
    pub async fn count_by_action_type(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<ActionTypeCountDto>> {
        common::ensure_audit_capability(actor)?;
        let mut counts = self.repo.count_by_action_type().await?;
        sort_action_counts(&mut counts);
        Ok(counts.into_iter().map(Into::into).collect())
    }

    /// Most frequent entity type first.
    pub async fn count_by_entity_type(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<EntityTypeCountDto>> {
        common::ensure_audit_capability(actor)?;
        let mut counts = self.repo.count_by_entity_type().await?;
        sort_entity_counts(&mut counts);
        Ok(counts.into_iter().map(Into::into).collect())
    }

    pub async fn summary(&self, actor: &AuthenticatedUser) -> ApplicationResult<AuditSummaryDto> {
        common::ensure_audit_capability(actor)?;
        let (total, mut by_action_type, mut by_entity_type) = tokio::try_join!(
            self.repo.count(),
            self.repo.count_by_action_type(),
            self.repo.count_by_entity_type(),
        )?;
        sort_action_counts(&mut by_action_type);
        sort_entity_counts(&mut by_entity_type);

        Ok(AuditSummaryDto {
            total,
            by_action_type: by_action_type.into_iter().map(Into::into).collect(),
            by_entity_type: by_entity_type.into_iter().map(Into::into).collect(),
        })
    }
}
