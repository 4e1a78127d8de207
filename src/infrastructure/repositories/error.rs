use crate::domain::errors::DomainError;

const CNT_AUDIT_PERFORMED_BY: &str = "audit_logs_performed_by_fkey";
const CNT_AUDIT_ACTION_TYPE: &str = "audit_logs_action_type_check";
const CNT_AUDIT_ENTITY_TYPE: &str = "audit_logs_entity_type_check";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_AUDIT_PERFORMED_BY => DomainError::NotFound("performer not found".into()),
                    CNT_AUDIT_ACTION_TYPE => {
                        DomainError::Validation("unsupported action type".into())
                    }
                    CNT_AUDIT_ENTITY_TYPE => {
                        DomainError::Validation("entity type must be 1-100 characters".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
