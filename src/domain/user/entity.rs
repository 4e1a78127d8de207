use crate::domain::user::value_objects::UserId;

/// The user who performed a logged action, as shown next to each audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
