//! SeaORM implementation of the Delivery repository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::normalize_ids;
use crate::domain::{DomainError, FieldSpec, Repository};
use crate::models::delivery::{ActiveModel, Column, Entity as DeliveryEntity};
use crate::models::{delivery_packages, delivery_products};
use crate::serializers::DeliverySerializer;

/// SeaORM-based implementation of the Delivery repository
pub struct SeaOrmDeliveryRepository {
    db: DatabaseConnection,
}

impl SeaOrmDeliveryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<DatabaseConnection> for SeaOrmDeliveryRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

/// Product and package ids linked to one delivery
async fn linked_ids<C: ConnectionTrait>(
    db: &C,
    delivery_id: i32,
) -> Result<(Vec<i32>, Vec<i32>), DbErr> {
    let products: Vec<i32> = delivery_products::Entity::find()
        .filter(delivery_products::Column::DeliveryId.eq(delivery_id))
        .order_by_asc(delivery_products::Column::ProductId)
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.product_id)
        .collect();

    let packages: Vec<i32> = delivery_packages::Entity::find()
        .filter(delivery_packages::Column::DeliveryId.eq(delivery_id))
        .order_by_asc(delivery_packages::Column::PackageId)
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.package_id)
        .collect();

    Ok((products, packages))
}

async fn set_links<C: ConnectionTrait>(
    db: &C,
    delivery_id: i32,
    product_ids: &[i32],
    package_ids: &[i32],
) -> Result<(), DbErr> {
    delivery_products::Entity::delete_many()
        .filter(delivery_products::Column::DeliveryId.eq(delivery_id))
        .exec(db)
        .await?;
    delivery_packages::Entity::delete_many()
        .filter(delivery_packages::Column::DeliveryId.eq(delivery_id))
        .exec(db)
        .await?;

    if !product_ids.is_empty() {
        let links = product_ids
            .iter()
            .map(|&product_id| delivery_products::ActiveModel {
                delivery_id: Set(delivery_id),
                product_id: Set(product_id),
            });
        delivery_products::Entity::insert_many(links).exec(db).await?;
    }

    if !package_ids.is_empty() {
        let links = package_ids
            .iter()
            .map(|&package_id| delivery_packages::ActiveModel {
                delivery_id: Set(delivery_id),
                package_id: Set(package_id),
            });
        delivery_packages::Entity::insert_many(links).exec(db).await?;
    }

    Ok(())
}

#[async_trait]
impl Repository for SeaOrmDeliveryRepository {
    type Record = DeliverySerializer;

    const MODEL: &'static str = "Delivery";
    const RESOURCE: &'static str = "deliveries";
    const TABLE: &'static str = "deliveries";
    const FIELDS: &'static [FieldSpec] = DeliverySerializer::FIELDS;

    async fn label(&self, record: &DeliverySerializer) -> Result<String, DomainError> {
        Ok(record.label())
    }

    fn record_id(record: &DeliverySerializer) -> Option<i32> {
        record.id
    }

    async fn find_all(&self) -> Result<Vec<DeliverySerializer>, DomainError> {
        let deliveries = DeliveryEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        let mut products: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in delivery_products::Entity::find()
            .order_by_asc(delivery_products::Column::ProductId)
            .all(&self.db)
            .await?
        {
            products.entry(link.delivery_id).or_default().push(link.product_id);
        }

        let mut packages: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in delivery_packages::Entity::find()
            .order_by_asc(delivery_packages::Column::PackageId)
            .all(&self.db)
            .await?
        {
            packages.entry(link.delivery_id).or_default().push(link.package_id);
        }

        Ok(deliveries
            .into_iter()
            .map(|d| {
                let product_ids = products.remove(&d.id).unwrap_or_default();
                let package_ids = packages.remove(&d.id).unwrap_or_default();
                DeliverySerializer::from_model(d, product_ids, package_ids)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DeliverySerializer>, DomainError> {
        let Some(model) = DeliveryEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let (product_ids, package_ids) = linked_ids(&self.db, id).await?;
        Ok(Some(DeliverySerializer::from_model(
            model,
            product_ids,
            package_ids,
        )))
    }

    async fn create(
        &self,
        mut record: DeliverySerializer,
    ) -> Result<DeliverySerializer, DomainError> {
        let product_ids = normalize_ids(std::mem::take(&mut record.product_id));
        let package_ids = normalize_ids(std::mem::take(&mut record.package_id));
        record.id = None;

        let txn = self.db.begin().await?;
        let model = ActiveModel::from(record).insert(&txn).await?;
        set_links(&txn, model.id, &product_ids, &package_ids).await?;
        txn.commit().await?;

        Ok(DeliverySerializer::from_model(model, product_ids, package_ids))
    }

    async fn update(
        &self,
        id: i32,
        mut record: DeliverySerializer,
    ) -> Result<DeliverySerializer, DomainError> {
        let product_ids = normalize_ids(std::mem::take(&mut record.product_id));
        let package_ids = normalize_ids(std::mem::take(&mut record.package_id));
        record.id = Some(id);

        let txn = self.db.begin().await?;
        if DeliveryEntity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        let model = ActiveModel::from(record).update(&txn).await?;
        set_links(&txn, id, &product_ids, &package_ids).await?;
        txn.commit().await?;

        Ok(DeliverySerializer::from_model(model, product_ids, package_ids))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = DeliveryEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(DeliveryEntity::find().count(&self.db).await?)
    }
}
