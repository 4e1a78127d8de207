use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::audit::AuditLogRepository;

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) max_page_size: u32,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }
}
