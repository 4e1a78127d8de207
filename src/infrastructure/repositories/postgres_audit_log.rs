use super::map_sqlx;
use crate::domain::audit::{
    ActionType, ActionTypeCount, AuditLog, AuditLogEntry, AuditLogFilter, AuditLogId,
    AuditLogRepository, EntityType, EntityTypeCount, FilterValue, NewAuditLog, dedupe_by_id,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{Actor, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

/// Every listing selects through the same `LEFT JOIN users` so the actor is
/// resolved in the same round trip as the row.
const SELECT_ENTRY: &str = r#"
    SELECT a.id, a.performed_by, a.action_type, a.entity_type, a.entity_id, a.action_time,
           a.description, a.previous_state, a.new_state,
           u.name AS actor_name, u.email AS actor_email
    FROM audit_logs a
    LEFT JOIN users u ON u.id = a.performed_by
"#;

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AuditLogFilter) {
        builder.push(" WHERE TRUE");

        if let FilterValue::Equals(user_id) = &filter.performed_by {
            builder.push(" AND a.performed_by = ");
            builder.push_bind(i64::from(*user_id));
        }

        if let FilterValue::Equals(action_type) = &filter.action_type {
            builder.push(" AND a.action_type = ");
            builder.push_bind(action_type.as_str());
        }

        if let FilterValue::Equals(entity_type) = &filter.entity_type {
            builder.push(" AND a.entity_type = ");
            builder.push_bind(entity_type.as_str().to_string());
        }

        if let FilterValue::Equals(entity_id) = &filter.entity_id {
            builder.push(" AND a.entity_id = ");
            builder.push_bind(*entity_id);
        }

        if let Some(range) = filter.time_range {
            builder.push(" AND a.action_time BETWEEN ");
            builder.push_bind(range.start);
            builder.push(" AND ");
            builder.push_bind(range.end);
        }
    }

    async fn count_matching(
        conn: &mut PgConnection,
        filter: &AuditLogFilter,
    ) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM audit_logs a");
        Self::push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map(|count| count.max(0) as u64)
            .map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    performed_by: Option<i64>,
    action_type: String,
    entity_type: String,
    entity_id: Option<i64>,
    action_time: DateTime<Utc>,
    description: Option<String>,
    previous_state: Option<serde_json::Value>,
    new_state: Option<serde_json::Value>,
    actor_name: Option<String>,
    actor_email: Option<String>,
}

impl TryFrom<AuditLogRow> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let performed_by = row
            .performed_by
            .map(UserId::new)
            .transpose()
            .map_err(|_| corrupt_row(row.id, "performed_by is not a valid user id"))?;
        let actor = match (performed_by, row.actor_name, row.actor_email) {
            (Some(id), Some(name), Some(email)) => Some(Actor { id, name, email }),
            _ => None,
        };
        let action_type = row.action_type.parse::<ActionType>().map_err(|_| {
            DomainError::Persistence(format!("unknown action type '{}'", row.action_type))
        })?;

        Ok(AuditLogEntry {
            log: AuditLog {
                id: AuditLogId(row.id),
                performed_by,
                action_type,
                entity_type: stored_entity_type(row.entity_type)?,
                entity_id: row.entity_id,
                action_time: row.action_time,
                description: row.description,
                previous_state: row.previous_state,
                new_state: row.new_state,
            },
            actor,
        })
    }
}

fn corrupt_row(id: i64, problem: &str) -> DomainError {
    DomainError::Persistence(format!("audit row {id}: {problem}"))
}

/// Stored values are already trimmed by the table CHECK; anything else is a
/// storage fault, not caller input.
fn stored_entity_type(raw: String) -> DomainResult<EntityType> {
    match EntityType::new(raw.as_str()) {
        Ok(entity_type) if entity_type.as_str() == raw => Ok(entity_type),
        _ => Err(DomainError::Persistence(format!(
            "stored entity type '{raw}' is not normalised"
        ))),
    }
}

#[derive(Debug, FromRow)]
struct GroupCountRow {
    label: String,
    count: i64,
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        let NewAuditLog {
            performed_by,
            action_type,
            entity_type,
            entity_id,
            action_time,
            description,
            previous_state,
            new_state,
        } = log;

        let row = sqlx::query_as::<_, AuditLogRow>(
            r#"
            INSERT INTO audit_logs
                (performed_by, action_type, entity_type, entity_id, action_time, description, previous_state, new_state)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, performed_by, action_type, entity_type, entity_id, action_time,
                      description, previous_state, new_state,
                      NULL::TEXT AS actor_name, NULL::TEXT AS actor_email
            "#,
        )
        .bind(performed_by.map(i64::from))
        .bind(action_type.as_str())
        .bind(entity_type.as_str())
        .bind(entity_id)
        .bind(action_time)
        .bind(description)
        .bind(previous_state)
        .bind(new_state)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        AuditLogEntry::try_from(row).map(|entry| entry.log)
    }

    async fn find_page(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<Page<AuditLogEntry>> {
        // Count and page read the same snapshot so `totalElements` agrees
        // with `content` under concurrent inserts.
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let total = Self::count_matching(&mut *tx, filter).await?;
        if total == 0 || page.offset() >= total as i64 {
            tx.commit().await.map_err(map_sqlx)?;
            return Ok(Page::new(Vec::new(), total, page));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ENTRY);
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY a.action_time DESC, a.id DESC LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;

        let entries = rows
            .into_iter()
            .map(AuditLogEntry::try_from)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page::new(dedupe_by_id(entries), total, page))
    }

    async fn find_history(
        &self,
        entity_type: &EntityType,
        entity_id: i64,
    ) -> DomainResult<Vec<AuditLogEntry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ENTRY);
        Self::push_filter(
            &mut builder,
            &AuditLogFilter::by_entity(entity_type.clone(), entity_id),
        );
        builder.push(" ORDER BY a.action_time ASC, a.id ASC");

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        Self::count_matching(&mut *conn, &AuditLogFilter::all()).await
    }

    async fn count_by_action_type(&self) -> DomainResult<Vec<ActionTypeCount>> {
        let rows = sqlx::query_as::<_, GroupCountRow>(
            "SELECT action_type AS label, COUNT(*) AS count
             FROM audit_logs
             GROUP BY action_type
             ORDER BY action_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                let action_type = row.label.parse::<ActionType>().map_err(|_| {
                    DomainError::Persistence(format!("unknown action type '{}'", row.label))
                })?;
                Ok(ActionTypeCount {
                    action_type,
                    count: row.count.max(0) as u64,
                })
            })
            .collect()
    }

    async fn count_by_entity_type(&self) -> DomainResult<Vec<EntityTypeCount>> {
        let rows = sqlx::query_as::<_, GroupCountRow>(
            "SELECT entity_type AS label, COUNT(*) AS count
             FROM audit_logs
             GROUP BY entity_type
             ORDER BY COUNT(*) DESC, entity_type ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok(EntityTypeCount {
                    entity_type: stored_entity_type(row.label)?,
                    count: row.count.max(0) as u64,
                })
            })
            .collect()
    }
}
