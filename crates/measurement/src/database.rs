use std::{error, result};

use async_trait::async_trait;
use model::{group::Group, measure::Measure, WithId};
use utility::id::Id;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    /// A stored measure carries a kind tag this version does not know.
    UnknownKind(String),
    Other(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait MeasureRepo {
    async fn measures(&mut self) -> Result<Vec<WithId<Measure>>>;
    async fn measures_in_group(
        &mut self,
        group: &Id<Group>,
    ) -> Result<Vec<WithId<Measure>>>;
    async fn measure(&mut self, id: &Id<Measure>) -> Result<WithId<Measure>>;
    async fn insert_measure(&mut self, measure: Measure)
        -> Result<WithId<Measure>>;
    async fn put_measure(
        &mut self,
        measure: WithId<Measure>,
    ) -> Result<WithId<Measure>>;
    async fn delete_measure(&mut self, id: &Id<Measure>) -> Result<()>;
}

#[async_trait]
pub trait GroupRepo {
    async fn groups(&mut self) -> Result<Vec<WithId<Group>>>;
    async fn group(&mut self, id: &Id<Group>) -> Result<WithId<Group>>;
    async fn insert_group(&mut self, group: Group) -> Result<WithId<Group>>;
    async fn put_group(&mut self, group: WithId<Group>)
        -> Result<WithId<Group>>;
    /// Deleting a group also deletes the measures filed under it.
    async fn delete_group(&mut self, id: &Id<Group>) -> Result<()>;
    async fn count_measures(&mut self, group: &Id<Group>) -> Result<i64>;
}

pub trait DatabaseOperations: MeasureRepo + GroupRepo + Send {}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

#[async_trait]
pub trait Database: Clone + Send + Sync {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseOperations + Send;

    /// Operations that commit statement by statement.
    fn auto(&self) -> Self::Autocommit;

    /// Operations that only take effect once `commit` is called.
    async fn transaction(&self) -> Result<Self::Transaction>;
}
