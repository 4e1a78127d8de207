use crate::domain::audit::value_objects::{ActionType, AuditLogId, EntityType};
use crate::domain::user::{Actor, UserId};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap, HashSet};

/// One recorded administrative action. Rows are append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub performed_by: Option<UserId>,
    pub action_type: ActionType,
    pub entity_type: EntityType,
    pub entity_id: Option<i64>,
    pub action_time: DateTime<Utc>,
    pub description: Option<String>,
    pub previous_state: Option<serde_json::Value>,
    pub new_state: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub performed_by: Option<UserId>,
    pub action_type: ActionType,
    pub entity_type: EntityType,
    pub entity_id: Option<i64>,
    pub action_time: DateTime<Utc>,
    pub description: Option<String>,
    pub previous_state: Option<serde_json::Value>,
    pub new_state: Option<serde_json::Value>,
}

/// An audit row together with its resolved actor. `actor` is `None` when the
/// row has no performer or the performer no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub log: AuditLog,
    pub actor: Option<Actor>,
}

/// Distinct performer ids referenced by `logs`, for a batched actor lookup.
pub fn actor_ids(logs: &[AuditLog]) -> BTreeSet<UserId> {
    logs.iter().filter_map(|log| log.performed_by).collect()
}

/// Attach actors fetched in a separate batch to their rows.
pub fn stitch_actors(logs: Vec<AuditLog>, actors: &HashMap<UserId, Actor>) -> Vec<AuditLogEntry> {
    logs.into_iter()
        .map(|log| {
            let actor = log.performed_by.and_then(|id| actors.get(&id).cloned());
            AuditLogEntry { log, actor }
        })
        .collect()
}

/// Drop repeated rows by primary key, keeping the first occurrence and the
/// original order.
pub fn dedupe_by_id(entries: Vec<AuditLogEntry>) -> Vec<AuditLogEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.log.id))
        .collect()
}
