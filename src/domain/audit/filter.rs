use crate::domain::audit::entity::AuditLog;
use crate::domain::audit::value_objects::{ActionType, EntityType};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// An optional equality filter. `Unset` matches every value, including rows
/// where the column is null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue<T> {
    #[default]
    Unset,
    Equals(T),
}

impl<T: PartialEq> FilterValue<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            FilterValue::Unset => true,
            FilterValue::Equals(expected) => expected == value,
        }
    }

    /// Like [`matches`](Self::matches) for a nullable column: an `Equals`
    /// filter never matches null.
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (FilterValue::Unset, _) => true,
            (FilterValue::Equals(expected), Some(actual)) => expected == actual,
            (FilterValue::Equals(_), None) => false,
        }
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FilterValue::Equals(value),
            None => FilterValue::Unset,
        }
    }
}

/// Inclusive `[start, end]` interval on `action_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// An inverted range selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Conjunction of the predicates every paged listing is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLogFilter {
    pub performed_by: FilterValue<UserId>,
    pub action_type: FilterValue<ActionType>,
    pub entity_type: FilterValue<EntityType>,
    pub entity_id: FilterValue<i64>,
    pub time_range: Option<TimeRange>,
}

impl AuditLogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_actor(actor: UserId) -> Self {
        Self {
            performed_by: FilterValue::Equals(actor),
            ..Self::default()
        }
    }

    pub fn by_entity_type(entity_type: EntityType) -> Self {
        Self {
            entity_type: FilterValue::Equals(entity_type),
            ..Self::default()
        }
    }

    pub fn by_entity(entity_type: EntityType, entity_id: i64) -> Self {
        Self {
            entity_type: FilterValue::Equals(entity_type),
            entity_id: FilterValue::Equals(entity_id),
            ..Self::default()
        }
    }

    pub fn within(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn with_action_type(mut self, action_type: FilterValue<ActionType>) -> Self {
        self.action_type = action_type;
        self
    }

    pub fn with_entity_type(mut self, entity_type: FilterValue<EntityType>) -> Self {
        self.entity_type = entity_type;
        self
    }

    /// True when no row can satisfy the filter.
    pub fn is_unsatisfiable(&self) -> bool {
        self.time_range.is_some_and(|range| range.is_empty())
    }

    pub fn matches(&self, log: &AuditLog) -> bool {
        self.performed_by.matches_opt(log.performed_by.as_ref())
            && self.action_type.matches(&log.action_type)
            && self.entity_type.matches(&log.entity_type)
            && self.entity_id.matches_opt(log.entity_id.as_ref())
            && self
                .time_range
                .is_none_or(|range| range.contains(log.action_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::value_objects::AuditLogId;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn login_without_entity() -> AuditLog {
        AuditLog {
            id: AuditLogId(1),
            performed_by: Some(UserId(4)),
            action_type: ActionType::Login,
            entity_type: EntityType::new("User").unwrap(),
            entity_id: None,
            action_time: at(100),
            description: None,
            previous_state: None,
            new_state: None,
        }
    }

    #[test]
    fn unset_matches_everything_including_null() {
        let filter: FilterValue<i64> = FilterValue::Unset;
        assert!(filter.matches(&3));
        assert!(filter.matches_opt(None));
    }

    #[test]
    fn equals_never_matches_null() {
        assert!(!FilterValue::Equals(5).matches_opt(None));
        assert!(FilterValue::Equals(5).matches_opt(Some(&5)));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = TimeRange::new(at(10), at(20));
        assert!(range.contains(at(10)));
        assert!(range.contains(at(20)));
        assert!(!range.contains(at(21)));
        assert!(TimeRange::new(at(20), at(10)).is_empty());
        assert!(!TimeRange::new(at(10), at(10)).is_empty());
    }

    #[test]
    fn filter_combines_predicates() {
        let log = login_without_entity();
        assert!(AuditLogFilter::all().matches(&log));
        assert!(AuditLogFilter::by_actor(UserId(4)).matches(&log));
        assert!(!AuditLogFilter::by_actor(UserId(5)).matches(&log));
        assert!(
            !AuditLogFilter::by_entity(EntityType::new("User").unwrap(), 4).matches(&log)
        );
        assert!(
            AuditLogFilter::all()
                .with_action_type(FilterValue::Equals(ActionType::Login))
                .within(TimeRange::new(at(0), at(100)))
                .matches(&log)
        );
        assert!(
            !AuditLogFilter::all()
                .within(TimeRange::new(at(101), at(200)))
                .matches(&log)
        );
    }

    #[test]
    fn inverted_range_is_unsatisfiable() {
        let filter = AuditLogFilter::all().within(TimeRange::new(at(5), at(1)));
        assert!(filter.is_unsatisfiable());
        assert!(!AuditLogFilter::all().is_unsatisfiable());
    }
}
