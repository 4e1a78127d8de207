use super::AuditCommandService;
use crate::{
    application::{
        dto::AuditLogDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{ActionType, AuditLogEntry, EntityType, NewAuditLog},
        user::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct RecordAuditCommand {
    pub performed_by: Option<UserId>,
    pub action_type: ActionType,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub description: Option<String>,
    pub previous_state: Option<serde_json::Value>,
    pub new_state: Option<serde_json::Value>,
}

impl AuditCommandService {
    /// Append one row stamped with the current time. Call only after the
    /// audited action has succeeded.
    pub async fn record(&self, command: RecordAuditCommand) -> ApplicationResult<AuditLogDto> {
        let entity_type = EntityType::new(command.entity_type).map_err(ApplicationError::from)?;
        let description = command
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let new_log = NewAuditLog {
            performed_by: command.performed_by,
            action_type: command.action_type,
            entity_type,
            entity_id: command.entity_id,
            action_time: self.clock.now(),
            description,
            previous_state: command.previous_state,
            new_state: command.new_state,
        };

        let stored = self.repo.insert(new_log).await?;
        tracing::info!(
            audit_id = stored.id.0,
            action = %stored.action_type,
            entity_type = %stored.entity_type,
            entity_id = ?stored.entity_id,
            "audit log recorded"
        );

        Ok(AuditLogEntry {
            log: stored,
            actor: None,
        }
        .into())
    }
}
