use crate::domain::audit::{ActionType, ActionTypeCount, AuditLogEntry, EntityTypeCount};
use crate::domain::user::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActorDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Actor> for ActorDto {
    fn from(actor: Actor) -> Self {
        Self {
            id: actor.id.into(),
            name: actor.name,
            email: actor.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub id: i64,
    pub performed_by: Option<ActorDto>,
    pub performed_by_id: Option<i64>,
    pub action_type: ActionType,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub action_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<serde_json::Value>,
}

impl From<AuditLogEntry> for AuditLogDto {
    fn from(entry: AuditLogEntry) -> Self {
        let AuditLogEntry { log, actor } = entry;
        Self {
            id: log.id.into(),
            performed_by: actor.map(Into::into),
            performed_by_id: log.performed_by.map(Into::into),
            action_type: log.action_type,
            entity_type: log.entity_type.into(),
            entity_id: log.entity_id,
            action_time: log.action_time,
            description: log.description,
            previous_state: log.previous_state,
            new_state: log.new_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeCountDto {
    pub action_type: ActionType,
    pub count: u64,
}

impl From<ActionTypeCount> for ActionTypeCountDto {
    fn from(value: ActionTypeCount) -> Self {
        Self {
            action_type: value.action_type,
            count: value.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeCountDto {
    pub entity_type: String,
    pub count: u64,
}

impl From<EntityTypeCount> for EntityTypeCountDto {
    fn from(value: EntityTypeCount) -> Self {
        Self {
            entity_type: value.entity_type.into(),
            count: value.count,
        }
    }
}

/// Payload for the dashboard summary widgets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummaryDto {
    pub total: u64,
    pub by_action_type: Vec<ActionTypeCountDto>,
    pub by_entity_type: Vec<EntityTypeCountDto>,
}
