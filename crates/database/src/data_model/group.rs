use chrono::{DateTime, Utc};
use model::{
    group::{Group, GroupColor},
    WithId,
};
use utility::id::Id;

/// Table: `groups`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupRow {
    pub id: String,
    pub name: String,
    pub color: i64,
    pub updated_at: DateTime<Utc>,
}

impl GroupRow {
    pub fn to_model(self) -> WithId<Group> {
        WithId::new(
            Id::new(self.id),
            Group {
                name: self.name,
                color: GroupColor::new(self.color),
                updated_at: self.updated_at,
            },
        )
    }
}
