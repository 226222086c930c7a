use std::sync::Arc;

use mockito::{Server, ServerGuard};
use sea_orm::{
    sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema,
};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Shared test fixture: a mockito server standing in for every upstream
/// (Star Citizen API and Discord), one in-memory sqlite database per
/// storage scope, and a session over a memory store.
pub struct TestSetup {
    pub server: ServerGuard,
    pub app_db: DatabaseConnection,
    pub auth_db: DatabaseConnection,
    pub session: Session,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let app_db = Database::connect("sqlite::memory:").await?;
        let auth_db = Database::connect("sqlite::memory:").await?;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        Ok(TestSetup {
            server,
            app_db,
            auth_db,
            session,
        })
    }

    /// Creates the given tables on the app database.
    pub async fn with_app_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.app_db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Creates the auth-scope tables on the auth database.
    pub async fn create_auth_tables(&self) -> Result<(), TestError> {
        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(entity::prelude::AuthUser);

        self.auth_db.execute(&stmt).await?;

        Ok(())
    }
}

/// Builds a [`TestSetup`] with the listed entities created on the app
/// database.
#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_app_tables(stmts).await?;

            Ok::<_, $crate::TestError>(setup)
        }.await
    }};
}

/// Builds a [`TestSetup`] with the auth store ready; any listed entities
/// are additionally created on the app database.
#[macro_export]
macro_rules! test_setup_with_auth_tables {
    // Pattern 1: No app entities provided
    () => {{
        async {
            let setup = $crate::TestSetup::new().await?;
            setup.create_auth_tables().await?;

            Ok::<_, $crate::TestError>(setup)
        }.await
    }};

    // Pattern 2: App entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestSetup::new().await?;
            setup.create_auth_tables().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_app_tables(stmts).await?;

            Ok::<_, $crate::TestError>(setup)
        }.await
    }};
}
