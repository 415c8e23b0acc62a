//! SeaORM implementation of the Discount repository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use crate::domain::{DomainError, FieldSpec, Repository};
use crate::models::discount::{ActiveModel, Column, Entity as DiscountEntity};
use crate::models::{product, store};
use crate::serializers::{DiscountSerializer, ProductSerializer, StoreSerializer};

/// SeaORM-based implementation of the Discount repository
pub struct SeaOrmDiscountRepository {
    db: DatabaseConnection,
}

impl SeaOrmDiscountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<DatabaseConnection> for SeaOrmDiscountRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

#[async_trait]
impl Repository for SeaOrmDiscountRepository {
    type Record = DiscountSerializer;

    const MODEL: &'static str = "Discount";
    const RESOURCE: &'static str = "discounts";
    const TABLE: &'static str = "discounts";
    const FIELDS: &'static [FieldSpec] = DiscountSerializer::FIELDS;

    async fn label(&self, record: &DiscountSerializer) -> Result<String, DomainError> {
        let product = match record.products_id {
            Some(id) => product::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|model| ProductSerializer::from_model(model, Vec::new()).label()),
            None => None,
        };
        let store = match record.store_id {
            Some(id) => store::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|model| StoreSerializer::from(model).label()),
            None => None,
        };

        Ok(DiscountSerializer::label(product.as_deref(), store.as_deref()))
    }

    fn record_id(record: &DiscountSerializer) -> Option<i32> {
        record.id
    }

    async fn find_all(&self) -> Result<Vec<DiscountSerializer>, DomainError> {
        let rows = DiscountEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(DiscountSerializer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DiscountSerializer>, DomainError> {
        let row = DiscountEntity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(DiscountSerializer::from))
    }

    async fn create(&self, mut record: DiscountSerializer) -> Result<DiscountSerializer, DomainError> {
        record.id = None;
        let model = ActiveModel::from(record).insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(&self, id: i32, mut record: DiscountSerializer) -> Result<DiscountSerializer, DomainError> {
        if DiscountEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        record.id = Some(id);
        let model = ActiveModel::from(record).update(&self.db).await?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = DiscountEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(DiscountEntity::find().count(&self.db).await?)
    }
}
