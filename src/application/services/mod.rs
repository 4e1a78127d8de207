// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::audit::AuditCommandService,
        ports::{security::TokenManager, time::Clock},
        queries::audit::AuditQueryService,
    },
    domain::audit::AuditLogRepository,
};

pub struct ApplicationServices {
    pub audit_queries: Arc<AuditQueryService>,
    pub audit_commands: Arc<AuditCommandService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        audit_log_repo: Arc<dyn AuditLogRepository>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        max_page_size: u32,
    ) -> Self {
        let audit_queries = Arc::new(
            AuditQueryService::new(Arc::clone(&audit_log_repo), Arc::clone(&clock))
                .with_max_page_size(max_page_size),
        );
        let audit_commands = Arc::new(AuditCommandService::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&clock),
        ));

        Self {
            audit_queries,
            audit_commands,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
