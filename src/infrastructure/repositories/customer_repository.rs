//! SeaORM implementation of the Customer repository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, SqlErr,
};

use crate::domain::{DomainError, FieldErrors, FieldSpec, Repository};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity};
use crate::serializers::CustomerSerializer;

/// A concurrent writer can claim an email between validation and insert;
/// surface that as the same field error validation would have produced.
fn email_conflict(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Validation(FieldErrors::single(
            "email",
            "customer with this email already exists.",
        )),
        _ => e.into(),
    }
}

/// SeaORM-based implementation of the Customer repository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<DatabaseConnection> for SeaOrmCustomerRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

#[async_trait]
impl Repository for SeaOrmCustomerRepository {
    type Record = CustomerSerializer;

    const MODEL: &'static str = "Customer";
    const RESOURCE: &'static str = "customers";
    const TABLE: &'static str = "customers";
    const FIELDS: &'static [FieldSpec] = CustomerSerializer::FIELDS;

    async fn label(&self, record: &CustomerSerializer) -> Result<String, DomainError> {
        Ok(record.label())
    }

    fn record_id(record: &CustomerSerializer) -> Option<i32> {
        record.id
    }

    async fn find_all(&self) -> Result<Vec<CustomerSerializer>, DomainError> {
        let rows = CustomerEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(CustomerSerializer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerSerializer>, DomainError> {
        let row = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(CustomerSerializer::from))
    }

    async fn create(&self, mut record: CustomerSerializer) -> Result<CustomerSerializer, DomainError> {
        record.id = None;
        let model = ActiveModel::from(record)
            .insert(&self.db)
            .await
            .map_err(email_conflict)?;
        Ok(model.into())
    }

    async fn update(&self, id: i32, mut record: CustomerSerializer) -> Result<CustomerSerializer, DomainError> {
        if CustomerEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        record.id = Some(id);
        let model = ActiveModel::from(record)
            .update(&self.db)
            .await
            .map_err(email_conflict)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = CustomerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(CustomerEntity::find().count(&self.db).await?)
    }
}
