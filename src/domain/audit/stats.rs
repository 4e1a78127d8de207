use crate::domain::audit::value_objects::{ActionType, EntityType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypeCount {
    pub action_type: ActionType,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeCount {
    pub entity_type: EntityType,
    pub count: u64,
}

/// Most frequent entity type first; equal counts fall back to the name.
pub fn sort_entity_counts(counts: &mut [EntityTypeCount]) {
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.entity_type.cmp(&b.entity_type))
    });
}

pub fn sort_action_counts(counts: &mut [ActionTypeCount]) {
    counts.sort_by(|a, b| a.action_type.as_str().cmp(b.action_type.as_str()));
}
