// tests/support/mocks/audit_repo.rs
use async_trait::async_trait;
use onboarding_audit::domain::audit::{
    ActionTypeCount, AuditLog, AuditLogEntry, AuditLogFilter, AuditLogId, AuditLogRepository,
    EntityType, EntityTypeCount, NewAuditLog, dedupe_by_id, entity::actor_ids, stitch_actors,
};
use onboarding_audit::domain::errors::{DomainError, DomainResult};
use onboarding_audit::domain::pagination::{Page, PageRequest};
use onboarding_audit::domain::user::{Actor, UserId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/* -------------------------------- InMemoryAuditRepo -------------------------------- */

/// In-memory store with the same ordering and paging rules as the Postgres
/// repository. It has no join, so actors are resolved by a second batched
/// lookup and stitched onto the rows.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepo {
    logs: Mutex<Vec<AuditLog>>,
    actors: Mutex<HashMap<UserId, Actor>>,
    actor_lookups: AtomicUsize,
}

impl InMemoryAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(self, id: i64, name: &str, email: &str) -> Self {
        let id = UserId::new(id).expect("actor id");
        self.actors.lock().unwrap().insert(
            id,
            Actor {
                id,
                name: name.into(),
                email: email.into(),
            },
        );
        self
    }

    /// Insert synchronously; handy when arranging fixtures.
    pub fn seed(&self, log: NewAuditLog) -> AuditLog {
        let mut logs = self.logs.lock().unwrap();
        let stored = AuditLog {
            id: AuditLogId(logs.len() as i64 + 1),
            performed_by: log.performed_by,
            action_type: log.action_type,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            action_time: log.action_time,
            description: log.description,
            previous_state: log.previous_state,
            new_state: log.new_state,
        };
        logs.push(stored.clone());
        stored
    }

    pub fn len(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    /// Number of batched actor lookups performed so far.
    pub fn actor_lookups(&self) -> usize {
        self.actor_lookups.load(Ordering::SeqCst)
    }

    fn resolve(&self, logs: Vec<AuditLog>) -> Vec<AuditLogEntry> {
        if logs.is_empty() {
            return Vec::new();
        }
        self.actor_lookups.fetch_add(1, Ordering::SeqCst);
        let ids = actor_ids(&logs);
        let directory = self.actors.lock().unwrap();
        let batch: HashMap<UserId, Actor> = ids
            .into_iter()
            .filter_map(|id| directory.get(&id).map(|actor| (id, actor.clone())))
            .collect();
        stitch_actors(logs, &batch)
    }

    fn matching(&self, filter: &AuditLogFilter) -> Vec<AuditLog> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        if let Some(actor) = log.performed_by {
            if !self.actors.lock().unwrap().contains_key(&actor) {
                return Err(DomainError::NotFound("performer not found".into()));
            }
        }
        Ok(self.seed(log))
    }

    async fn find_page(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<Page<AuditLogEntry>> {
        let mut rows = self.matching(filter);
        rows.sort_by(|a, b| {
            b.action_time
                .cmp(&a.action_time)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = rows.len() as u64;
        let slice: Vec<AuditLog> = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .collect();

        Ok(Page::new(dedupe_by_id(self.resolve(slice)), total, page))
    }

    async fn find_history(
        &self,
        entity_type: &EntityType,
        entity_id: i64,
    ) -> DomainResult<Vec<AuditLogEntry>> {
        let mut rows = self.matching(&AuditLogFilter::by_entity(entity_type.clone(), entity_id));
        rows.sort_by(|a, b| {
            a.action_time
                .cmp(&b.action_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(self.resolve(rows))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.len() as u64)
    }

    async fn count_by_action_type(&self) -> DomainResult<Vec<ActionTypeCount>> {
        let mut grouped = BTreeMap::new();
        for log in self.logs.lock().unwrap().iter() {
            *grouped.entry(log.action_type).or_insert(0u64) += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(action_type, count)| ActionTypeCount { action_type, count })
            .collect())
    }

    /// Ordered by name only; the query service applies the count ordering.
    async fn count_by_entity_type(&self) -> DomainResult<Vec<EntityTypeCount>> {
        let mut grouped = BTreeMap::new();
        for log in self.logs.lock().unwrap().iter() {
            *grouped.entry(log.entity_type.clone()).or_insert(0u64) += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(entity_type, count)| EntityTypeCount { entity_type, count })
            .collect())
    }
}

/* -------------------------------- FailingAuditRepo -------------------------------- */

/// Every call fails the way a dropped database connection would.
#[derive(Clone, Debug, Default)]
pub struct FailingAuditRepo;

fn connection_lost<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("connection reset by peer".into()))
}

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<AuditLog> {
        connection_lost()
    }

    async fn find_page(
        &self,
        _filter: &AuditLogFilter,
        _page: PageRequest,
    ) -> DomainResult<Page<AuditLogEntry>> {
        connection_lost()
    }

    async fn find_history(
        &self,
        _entity_type: &EntityType,
        _entity_id: i64,
    ) -> DomainResult<Vec<AuditLogEntry>> {
        connection_lost()
    }

    async fn count(&self) -> DomainResult<u64> {
        connection_lost()
    }

    async fn count_by_action_type(&self) -> DomainResult<Vec<ActionTypeCount>> {
        connection_lost()
    }

    async fn count_by_entity_type(&self) -> DomainResult<Vec<EntityTypeCount>> {
        connection_lost()
    }
}
