use std::{env, error::Error};

use async_trait::async_trait;
use measurement::database::{
    Database, DatabaseOperations, DatabaseTransaction, GroupRepo, MeasureRepo,
};
use model::{group::Group, measure::Measure, WithId};
use queries::convert_error;
use sqlx::Transaction;
use utility::id::Id;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { connection: pool })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(
        &self,
    ) -> measurement::database::Result<Self::Transaction> {
        let tx = self.connection.begin().await.map_err(convert_error)?;
        Ok(PgDatabaseTransaction { tx })
    }
}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> measurement::database::Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

impl<'a> DatabaseOperations for PgDatabaseTransaction<'a> {}
impl DatabaseOperations for PgDatabaseAutocommit {}

#[async_trait]
impl<'a> MeasureRepo for PgDatabaseTransaction<'a> {
    async fn measures(
        &mut self,
    ) -> measurement::database::Result<Vec<WithId<Measure>>> {
        queries::measure::get_all(&mut *self.tx).await
    }

    async fn measures_in_group(
        &mut self,
        group: &Id<Group>,
    ) -> measurement::database::Result<Vec<WithId<Measure>>> {
        queries::measure::get_in_group(&mut *self.tx, group).await
    }

    async fn measure(
        &mut self,
        id: &Id<Measure>,
    ) -> measurement::database::Result<WithId<Measure>> {
        queries::measure::get(&mut *self.tx, id).await
    }

    async fn insert_measure(
        &mut self,
        measure: Measure,
    ) -> measurement::database::Result<WithId<Measure>> {
        queries::measure::insert(&mut *self.tx, measure).await
    }

    async fn put_measure(
        &mut self,
        measure: WithId<Measure>,
    ) -> measurement::database::Result<WithId<Measure>> {
        queries::measure::put(&mut *self.tx, measure).await
    }

    async fn delete_measure(
        &mut self,
        id: &Id<Measure>,
    ) -> measurement::database::Result<()> {
        queries::measure::delete(&mut *self.tx, id).await
    }
}

#[async_trait]
impl<'a> GroupRepo for PgDatabaseTransaction<'a> {
    async fn groups(
        &mut self,
    ) -> measurement::database::Result<Vec<WithId<Group>>> {
        queries::group::get_all(&mut *self.tx).await
    }

    async fn group(
        &mut self,
        id: &Id<Group>,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::get(&mut *self.tx, id).await
    }

    async fn insert_group(
        &mut self,
        group: Group,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::insert(&mut *self.tx, group).await
    }

    async fn put_group(
        &mut self,
        group: WithId<Group>,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::put(&mut *self.tx, group).await
    }

    async fn delete_group(
        &mut self,
        id: &Id<Group>,
    ) -> measurement::database::Result<()> {
        queries::group::delete(&mut *self.tx, id).await
    }

    async fn count_measures(
        &mut self,
        group: &Id<Group>,
    ) -> measurement::database::Result<i64> {
        queries::group::count_measures(&mut *self.tx, group).await
    }
}

#[async_trait]
impl MeasureRepo for PgDatabaseAutocommit {
    async fn measures(
        &mut self,
    ) -> measurement::database::Result<Vec<WithId<Measure>>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        queries::measure::get_all(&mut connection).await
    }

    async fn measures_in_group(
        &mut self,
        group: &Id<Group>,
    ) -> measurement::database::Result<Vec<WithId<Measure>>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        queries::measure::get_in_group(&mut connection, group).await
    }

    async fn measure(
        &mut self,
        id: &Id<Measure>,
    ) -> measurement::database::Result<WithId<Measure>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        queries::measure::get(&mut connection, id).await
    }

    async fn insert_measure(
        &mut self,
        measure: Measure,
    ) -> measurement::database::Result<WithId<Measure>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        queries::measure::insert(&mut connection, measure).await
    }

    async fn put_measure(
        &mut self,
        measure: WithId<Measure>,
    ) -> measurement::database::Result<WithId<Measure>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        queries::measure::put(&mut connection, measure).await
    }

    async fn delete_measure(
        &mut self,
        id: &Id<Measure>,
    ) -> measurement::database::Result<()> {
        queries::measure::delete(&self.pool, id).await
    }
}

#[async_trait]
impl GroupRepo for PgDatabaseAutocommit {
    async fn groups(
        &mut self,
    ) -> measurement::database::Result<Vec<WithId<Group>>> {
        queries::group::get_all(&self.pool).await
    }

    async fn group(
        &mut self,
        id: &Id<Group>,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::get(&self.pool, id).await
    }

    async fn insert_group(
        &mut self,
        group: Group,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::insert(&self.pool, group).await
    }

    async fn put_group(
        &mut self,
        group: WithId<Group>,
    ) -> measurement::database::Result<WithId<Group>> {
        queries::group::put(&self.pool, group).await
    }

    async fn delete_group(
        &mut self,
        id: &Id<Group>,
    ) -> measurement::database::Result<()> {
        queries::group::delete(&self.pool, id).await
    }

    async fn count_measures(
        &mut self,
        group: &Id<Group>,
    ) -> measurement::database::Result<i64> {
        queries::group::count_measures(&self.pool, group).await
    }
}
