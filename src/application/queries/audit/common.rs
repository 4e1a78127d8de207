use super::list::PageQuery;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::EntityType,
        pagination::PageRequest,
        user::UserId,
    },
};

const DEFAULT_PAGE: i64 = 0;
const DEFAULT_PAGE_SIZE: i64 = 20;

pub(super) fn ensure_audit_capability(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.can_read_audit() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("missing capability audit:read"))
    }
}

pub(super) fn page_request(query: &PageQuery, max_size: u32) -> ApplicationResult<PageRequest> {
    PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
        max_size,
    )
    .map_err(ApplicationError::from)
}

pub(super) fn entity_type(value: &str) -> ApplicationResult<EntityType> {
    EntityType::new(value).map_err(ApplicationError::from)
}

pub(super) fn user_id(value: i64) -> ApplicationResult<UserId> {
    UserId::new(value).map_err(ApplicationError::from)
}
