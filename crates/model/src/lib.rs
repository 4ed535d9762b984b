use std::fmt::Debug;

use schemars::JsonSchema;
use serde::Serialize;
use utility::id::{HasId, Id};

pub mod group;
pub mod measure;
pub mod point;

/// Pairs an entity with its database identity.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
