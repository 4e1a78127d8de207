mod common;
mod list;
mod search;
mod service;
mod stats;

pub use list::{
    AuditHistoryQuery, ListAuditLogsByActorInRangeQuery, ListAuditLogsByActorQuery,
    ListAuditLogsByEntityTypeQuery, ListAuditLogsInRangeQuery, PageQuery,
};
pub use search::SearchAuditLogsQuery;
pub use service::{AuditQueryService, DEFAULT_MAX_PAGE_SIZE};
