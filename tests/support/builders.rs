// tests/support/builders.rs
use chrono::{DateTime, TimeZone, Utc};
use onboarding_audit::domain::audit::{ActionType, EntityType, NewAuditLog};
use onboarding_audit::domain::user::UserId;

/// Seconds since the epoch as a UTC timestamp.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

pub struct AuditLogBuilder {
    log: NewAuditLog,
}

impl AuditLogBuilder {
    pub fn new(action_type: ActionType, entity_type: &str) -> Self {
        Self {
            log: NewAuditLog {
                performed_by: None,
                action_type,
                entity_type: EntityType::new(entity_type).expect("entity type"),
                entity_id: None,
                action_time: at(0),
                description: None,
                previous_state: None,
                new_state: None,
            },
        }
    }

    pub fn by(mut self, user_id: i64) -> Self {
        self.log.performed_by = Some(UserId::new(user_id).expect("user id"));
        self
    }

    pub fn entity(mut self, id: i64) -> Self {
        self.log.entity_id = Some(id);
        self
    }

    pub fn at(mut self, secs: i64) -> Self {
        self.log.action_time = at(secs);
        self
    }

    pub fn describe(mut self, text: &str) -> Self {
        self.log.description = Some(text.into());
        self
    }

    pub fn states(mut self, previous: serde_json::Value, next: serde_json::Value) -> Self {
        self.log.previous_state = Some(previous);
        self.log.new_state = Some(next);
        self
    }

    pub fn build(self) -> NewAuditLog {
        self.log
    }
}

pub fn log(action_type: ActionType, entity_type: &str) -> AuditLogBuilder {
    AuditLogBuilder::new(action_type, entity_type)
}
