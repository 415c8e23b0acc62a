//! Row existence and uniqueness lookups backed by the live connection

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::{DomainError, ReferenceChecker};

pub struct SeaOrmReferenceChecker {
    db: DatabaseConnection,
}

impl SeaOrmReferenceChecker {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Table and column names come from the static field tables only.
#[async_trait]
impl ReferenceChecker for SeaOrmReferenceChecker {
    async fn exists(&self, table: &'static str, id: i32) -> Result<bool, DomainError> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            format!("SELECT 1 FROM {} WHERE id = ? LIMIT 1", table),
            [id.into()],
        );

        Ok(self.db.query_one(stmt).await?.is_some())
    }

    async fn is_taken(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DomainError> {
        let backend = self.db.get_database_backend();
        let stmt = match exclude_id {
            Some(id) => Statement::from_sql_and_values(
                backend,
                format!(
                    "SELECT 1 FROM {} WHERE {} = ? AND id <> ? LIMIT 1",
                    table, column
                ),
                [value.into(), id.into()],
            ),
            None => Statement::from_sql_and_values(
                backend,
                format!("SELECT 1 FROM {} WHERE {} = ? LIMIT 1", table, column),
                [value.into()],
            ),
        };

        Ok(self.db.query_one(stmt).await?.is_some())
    }
}
