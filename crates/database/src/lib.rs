use std::{env, error::Error, str::FromStr, time::Duration};

use async_trait::async_trait;
use log::info;
use queries::convert_error;
use registry::database::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Transaction,
};

pub mod data_model;
pub mod queries;

const DEFAULT_DATABASE_URL: &str = "sqlite://devices.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const IN_MEMORY_URL: &str = "sqlite::memory:";
// how long a writer waits for a concurrent one to commit before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct DatabaseConnectionInfo {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConnectionInfo {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`, falling back to a
    /// `devices.db` file in the working directory.
    pub fn from_env() -> Self {
        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        Self {
            url,
            max_connections,
        }
    }

    /// A private database that lives as long as the pool. Limited to one
    /// connection, since every sqlite in-memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_URL.to_owned(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    connection: sqlx::SqlitePool,
}

pub struct SqliteDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Sqlite>,
}

#[async_trait]
impl<'a> DatabaseTransaction for SqliteDatabaseTransaction<'a> {
    async fn commit(self) -> registry::database::Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

impl<'a> DatabaseOperations for SqliteDatabaseTransaction<'a> {}

pub struct SqliteDatabaseAutocommit {
    pool: sqlx::SqlitePool,
}

impl DatabaseAutocommit for SqliteDatabaseAutocommit {}

impl DatabaseOperations for SqliteDatabaseAutocommit {}

impl SqliteDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let in_memory = database_connection_info.is_in_memory();

        let mut options = SqliteConnectOptions::from_str(&database_connection_info.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options =
            SqlitePoolOptions::new().max_connections(database_connection_info.max_connections);
        if in_memory {
            // closing the only connection would drop the database with it
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("connected to {}", database_connection_info.url);
        Ok(Self { connection: pool })
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    type Transaction = SqliteDatabaseTransaction<'static>;
    type Autocommit = SqliteDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        SqliteDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> registry::database::Result<Self::Transaction> {
        let tx: Transaction<'static, sqlx::Sqlite> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(SqliteDatabaseTransaction { tx })
    }
}
