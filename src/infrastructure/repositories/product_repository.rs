//! SeaORM implementation of the Product repository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::normalize_ids;
use crate::domain::{DomainError, FieldSpec, Repository};
use crate::models::product::{ActiveModel, Column, Entity as ProductEntity};
use crate::models::product_categories;
use crate::serializers::ProductSerializer;

/// SeaORM-based implementation of the Product repository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<DatabaseConnection> for SeaOrmProductRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

async fn category_ids<C: ConnectionTrait>(db: &C, product_id: i32) -> Result<Vec<i32>, DbErr> {
    let links = product_categories::Entity::find()
        .filter(product_categories::Column::ProductId.eq(product_id))
        .order_by_asc(product_categories::Column::CategoryId)
        .all(db)
        .await?;

    Ok(links.into_iter().map(|l| l.category_id).collect())
}

/// Replace the category set of a product
async fn set_categories<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
    category_ids: &[i32],
) -> Result<(), DbErr> {
    product_categories::Entity::delete_many()
        .filter(product_categories::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    if category_ids.is_empty() {
        return Ok(());
    }

    let links = category_ids
        .iter()
        .map(|&category_id| product_categories::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
        });
    product_categories::Entity::insert_many(links).exec(db).await?;

    Ok(())
}

#[async_trait]
impl Repository for SeaOrmProductRepository {
    type Record = ProductSerializer;

    const MODEL: &'static str = "Product";
    const RESOURCE: &'static str = "products";
    const TABLE: &'static str = "products";
    const FIELDS: &'static [FieldSpec] = ProductSerializer::FIELDS;

    async fn label(&self, record: &ProductSerializer) -> Result<String, DomainError> {
        Ok(record.label())
    }

    fn record_id(record: &ProductSerializer) -> Option<i32> {
        record.id
    }

    async fn find_all(&self) -> Result<Vec<ProductSerializer>, DomainError> {
        let products = ProductEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        // One pass over the junction table instead of a query per product
        let mut categories: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in product_categories::Entity::find()
            .order_by_asc(product_categories::Column::CategoryId)
            .all(&self.db)
            .await?
        {
            categories
                .entry(link.product_id)
                .or_default()
                .push(link.category_id);
        }

        Ok(products
            .into_iter()
            .map(|p| {
                let ids = categories.remove(&p.id).unwrap_or_default();
                ProductSerializer::from_model(p, ids)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductSerializer>, DomainError> {
        let Some(model) = ProductEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let ids = category_ids(&self.db, id).await?;
        Ok(Some(ProductSerializer::from_model(model, ids)))
    }

    async fn create(&self, mut record: ProductSerializer) -> Result<ProductSerializer, DomainError> {
        let category = normalize_ids(std::mem::take(&mut record.category));
        record.id = None;

        let txn = self.db.begin().await?;
        let model = ActiveModel::from(record).insert(&txn).await?;
        set_categories(&txn, model.id, &category).await?;
        txn.commit().await?;

        Ok(ProductSerializer::from_model(model, category))
    }

    async fn update(
        &self,
        id: i32,
        mut record: ProductSerializer,
    ) -> Result<ProductSerializer, DomainError> {
        let category = normalize_ids(std::mem::take(&mut record.category));
        record.id = Some(id);

        let txn = self.db.begin().await?;
        if ProductEntity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        let model = ActiveModel::from(record).update(&txn).await?;
        set_categories(&txn, id, &category).await?;
        txn.commit().await?;

        Ok(ProductSerializer::from_model(model, category))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(ProductEntity::find().count(&self.db).await?)
    }
}
