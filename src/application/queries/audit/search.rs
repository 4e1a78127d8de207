use super::{AuditQueryService, common, list::PageQuery};
use crate::{
    application::{
        dto::{AuditLogDto, AuthenticatedUser, PageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::{ActionType, AuditLogFilter, EntityType, FilterValue, TimeRange},
};
use chrono::{DateTime, Utc};

/// Composite search. `Unset` filters match every value; a missing `start`
/// means the Unix epoch and a missing `end` means now.
#[derive(Debug, Clone, Default)]
pub struct SearchAuditLogsQuery {
    pub action_type: FilterValue<String>,
    pub entity_type: FilterValue<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub paging: PageQuery,
}

impl AuditQueryService {
    pub async fn search(
        &self,
        actor: &AuthenticatedUser,
        query: SearchAuditLogsQuery,
    ) -> ApplicationResult<PageDto<AuditLogDto>> {
        common::ensure_audit_capability(actor)?;
        let page = common::page_request(&query.paging, self.max_page_size)?;

        let action_type = match query.action_type {
            FilterValue::Unset => FilterValue::Unset,
            FilterValue::Equals(raw) => FilterValue::Equals(
                raw.parse::<ActionType>().map_err(ApplicationError::from)?,
            ),
        };
        let entity_type = match query.entity_type {
            FilterValue::Unset => FilterValue::Unset,
            FilterValue::Equals(raw) => {
                FilterValue::Equals(EntityType::new(raw).map_err(ApplicationError::from)?)
            }
        };

        let start = query.start.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let end = query.end.unwrap_or_else(|| self.clock.now());

        let filter = AuditLogFilter::all()
            .with_action_type(action_type)
            .with_entity_type(entity_type)
            .within(TimeRange::new(start, end));

        self.fetch_page(filter, page).await
    }
}
