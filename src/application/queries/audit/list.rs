use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser, PageDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditLogFilter, TimeRange},
        pagination::{Page, PageRequest},
    },
};
use chrono::{DateTime, Utc};

/// Raw paging parameters as they arrive from the caller; validated by the
/// service before any repository call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub struct ListAuditLogsByActorQuery {
    pub user_id: i64,
    pub paging: PageQuery,
}

pub struct ListAuditLogsByActorInRangeQuery {
    pub user_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub paging: PageQuery,
}

pub struct ListAuditLogsByEntityTypeQuery {
    pub entity_type: String,
    pub paging: PageQuery,
}

pub struct ListAuditLogsInRangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub paging: PageQuery,
}

pub struct AuditHistoryQuery {
    pub entity_type: String,
    pub entity_id: i64,
}

impl AuditQueryService {
    /// Newest entries across all actors and resources.
    pub async fn recent_for_dashboard(
        &self,
        actor: &AuthenticatedUser,
        paging: PageQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let page = common::page_request(&paging, self.max_page_size)?;
        self.fetch_page(AuditLogFilter::all(), page).await
    }

    pub async fn list_by_actor(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsByActorQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let user_id = common::user_id(query.user_id)?;
        let page = common::page_request(&query.paging, self.max_page_size)?;
        self.fetch_page(AuditLogFilter::by_actor(user_id), page).await
    }

    pub async fn list_by_actor_in_range(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsByActorInRangeQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let user_id = common::user_id(query.user_id)?;
        let page = common::page_request(&query.paging, self.max_page_size)?;
        let filter =
            AuditLogFilter::by_actor(user_id).within(TimeRange::new(query.start, query.end));
        self.fetch_page(filter, page).await
    }

    pub async fn list_by_entity_type(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsByEntityTypeQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let entity_type = common::entity_type(&query.entity_type)?;
        let page = common::page_request(&query.paging, self.max_page_size)?;
        self.fetch_page(AuditLogFilter::by_entity_type(entity_type), page)
            .await
    }

    /// Inclusive bounds; an inverted range yields an empty page.
    pub async fn list_in_range(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsInRangeQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let page = common::page_request(&query.paging, self.max_page_size)?;
        let filter = AuditLogFilter::all().within(TimeRange::new(query.start, query.end));
        self.fetch_page(filter, page).await
    }

    /// Complete change history of one resource, oldest first. Not paginated.
    pub async fn history(
        &self,
        actor: &AuthenticatedUser,
        query: AuditHistoryQuery,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let entity_type = common::entity_type(&query.entity_type)?;
        let entries = self
            .repo
            .find_history(&entity_type, query.entity_id)
            .await?;
        tracing::debug!(
            entity_type = %entity_type,
            entity_id = query.entity_id,
            rows = entries.len(),
            "loaded audit history"
        );
        Ok(entries.into_iter().map(Into::into).collect())
    }

    pub(super) async fn fetch_page(
        &self,
        filter: AuditLogFilter,
        page: PageRequest,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        if filter.is_unsatisfiable() {
            return Ok(PageDto::from_page(Page::<AuditLogDto>::empty(page)));
        }

        let result = self.repo.find_page(&filter, page).await?;
        tracing::debug!(
            page = result.page_number,
            size = result.page_size,
            total = result.total_elements,
            "loaded audit page"
        );
        Ok(PageDto::from_page(result))
    }
}
