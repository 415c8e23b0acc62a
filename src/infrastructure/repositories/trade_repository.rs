//! SeaORM implementation of the Trade repository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::normalize_ids;
use crate::domain::{DomainError, FieldSpec, Repository};
use crate::models::trade::{ActiveModel, Column, Entity as TradeEntity};
use crate::models::trade_discounts;
use crate::serializers::TradeSerializer;

/// SeaORM-based implementation of the Trade repository
pub struct SeaOrmTradeRepository {
    db: DatabaseConnection,
}

impl SeaOrmTradeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<DatabaseConnection> for SeaOrmTradeRepository {
    fn from(db: DatabaseConnection) -> Self {
        Self::new(db)
    }
}

async fn discount_ids<C: ConnectionTrait>(db: &C, trade_id: i32) -> Result<Vec<i32>, DbErr> {
    let links = trade_discounts::Entity::find()
        .filter(trade_discounts::Column::TradeId.eq(trade_id))
        .order_by_asc(trade_discounts::Column::DiscountId)
        .all(db)
        .await?;

    Ok(links.into_iter().map(|l| l.discount_id).collect())
}

async fn set_discounts<C: ConnectionTrait>(
    db: &C,
    trade_id: i32,
    discount_ids: &[i32],
) -> Result<(), DbErr> {
    trade_discounts::Entity::delete_many()
        .filter(trade_discounts::Column::TradeId.eq(trade_id))
        .exec(db)
        .await?;

    if discount_ids.is_empty() {
        return Ok(());
    }

    let links = discount_ids
        .iter()
        .map(|&discount_id| trade_discounts::ActiveModel {
            trade_id: Set(trade_id),
            discount_id: Set(discount_id),
        });
    trade_discounts::Entity::insert_many(links).exec(db).await?;

    Ok(())
}

#[async_trait]
impl Repository for SeaOrmTradeRepository {
    type Record = TradeSerializer;

    const MODEL: &'static str = "Trade";
    const RESOURCE: &'static str = "trades";
    const TABLE: &'static str = "trades";
    const FIELDS: &'static [FieldSpec] = TradeSerializer::FIELDS;

    async fn label(&self, record: &TradeSerializer) -> Result<String, DomainError> {
        Ok(record.label())
    }

    fn record_id(record: &TradeSerializer) -> Option<i32> {
        record.id
    }

    async fn find_all(&self) -> Result<Vec<TradeSerializer>, DomainError> {
        let trades = TradeEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        let mut discounts: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in trade_discounts::Entity::find()
            .order_by_asc(trade_discounts::Column::DiscountId)
            .all(&self.db)
            .await?
        {
            discounts
                .entry(link.trade_id)
                .or_default()
                .push(link.discount_id);
        }

        Ok(trades
            .into_iter()
            .map(|t| {
                let ids = discounts.remove(&t.id).unwrap_or_default();
                TradeSerializer::from_model(t, ids)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TradeSerializer>, DomainError> {
        let Some(model) = TradeEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let ids = discount_ids(&self.db, id).await?;
        Ok(Some(TradeSerializer::from_model(model, ids)))
    }

    async fn create(&self, mut record: TradeSerializer) -> Result<TradeSerializer, DomainError> {
        let discounts = normalize_ids(std::mem::take(&mut record.discount_id));
        record.id = None;

        let mut trade = ActiveModel::from(record);
        trade.date = Set(chrono::Utc::now());

        let txn = self.db.begin().await?;
        let model = trade.insert(&txn).await?;
        set_discounts(&txn, model.id, &discounts).await?;
        txn.commit().await?;

        tracing::debug!("Trade {} recorded at {}", model.id, model.date);
        Ok(TradeSerializer::from_model(model, discounts))
    }

    async fn update(&self, id: i32, mut record: TradeSerializer) -> Result<TradeSerializer, DomainError> {
        let discounts = normalize_ids(std::mem::take(&mut record.discount_id));
        record.id = Some(id);

        let txn = self.db.begin().await?;
        if TradeEntity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(DomainError::NotFound);
        }
        // `date` stays NotSet; the insert timestamp is kept
        let model = ActiveModel::from(record).update(&txn).await?;
        set_discounts(&txn, id, &discounts).await?;
        txn.commit().await?;

        Ok(TradeSerializer::from_model(model, discounts))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = TradeEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(TradeEntity::find().count(&self.db).await?)
    }
}
