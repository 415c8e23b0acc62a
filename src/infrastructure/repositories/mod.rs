//! Repository implementations using SeaORM

/// Plain `Repository` for an entity without many-to-many fields: ordered
/// reads, single-row writes and `NotFound` for missing ids.
macro_rules! sea_orm_repository {
    (
        $(#[$meta:meta])*
        $repo:ident, $model:ident, $record:ty,
        model = $model_name:literal,
        resource = $resource:literal,
        table = $table:literal $(,)?
    ) => {
        use async_trait::async_trait;
        use sea_orm::{
            ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
        };

        use crate::domain::{DomainError, FieldSpec, Repository};

        $(#[$meta])*
        pub struct $repo {
            db: DatabaseConnection,
        }

        impl $repo {
            pub fn new(db: DatabaseConnection) -> Self {
                Self { db }
            }
        }

        impl From<DatabaseConnection> for $repo {
            fn from(db: DatabaseConnection) -> Self {
                Self::new(db)
            }
        }

        #[async_trait]
        impl Repository for $repo {
            type Record = $record;

            const MODEL: &'static str = $model_name;
            const RESOURCE: &'static str = $resource;
            const TABLE: &'static str = $table;
            const FIELDS: &'static [FieldSpec] = <$record>::FIELDS;

            async fn label(&self, record: &$record) -> Result<String, DomainError> {
                Ok(record.label())
            }

            fn record_id(record: &$record) -> Option<i32> {
                record.id
            }

            async fn find_all(&self) -> Result<Vec<$record>, DomainError> {
                let rows = $model::Entity::find()
                    .order_by_asc($model::Column::Id)
                    .all(&self.db)
                    .await?;

                Ok(rows.into_iter().map(<$record>::from).collect())
            }

            async fn find_by_id(&self, id: i32) -> Result<Option<$record>, DomainError> {
                let row = $model::Entity::find_by_id(id).one(&self.db).await?;
                Ok(row.map(<$record>::from))
            }

            async fn create(&self, mut record: $record) -> Result<$record, DomainError> {
                record.id = None;
                let model = $model::ActiveModel::from(record).insert(&self.db).await?;
                Ok(model.into())
            }

            async fn update(&self, id: i32, mut record: $record) -> Result<$record, DomainError> {
                if $model::Entity::find_by_id(id).one(&self.db).await?.is_none() {
                    return Err(DomainError::NotFound);
                }

                record.id = Some(id);
                let model = $model::ActiveModel::from(record).update(&self.db).await?;
                Ok(model.into())
            }

            async fn delete(&self, id: i32) -> Result<(), DomainError> {
                let result = $model::Entity::delete_by_id(id).exec(&self.db).await?;

                if result.rows_affected == 0 {
                    return Err(DomainError::NotFound);
                }

                Ok(())
            }

            async fn count(&self) -> Result<u64, DomainError> {
                Ok($model::Entity::find().count(&self.db).await?)
            }
        }
    };
}

pub mod action_rang_type_repository;
pub mod action_type_repository;
pub mod category_repository;
pub mod customer_repository;
pub mod delivery_repository;
pub mod delivery_type_repository;
pub mod discount_repository;
pub mod package_repository;
pub mod product_repository;
pub mod ratings_repository;
pub mod reference_checker;
pub mod review_repository;
pub mod store_repository;
pub mod trade_repository;
pub mod user_action_repository;

pub use action_rang_type_repository::SeaOrmActionRangTypeRepository;
pub use action_type_repository::SeaOrmActionTypeRepository;
pub use category_repository::SeaOrmCategoryRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use delivery_repository::SeaOrmDeliveryRepository;
pub use delivery_type_repository::SeaOrmDeliveryTypeRepository;
pub use discount_repository::SeaOrmDiscountRepository;
pub use package_repository::SeaOrmPackageRepository;
pub use product_repository::SeaOrmProductRepository;
pub use ratings_repository::SeaOrmRatingsRepository;
pub use reference_checker::SeaOrmReferenceChecker;
pub use review_repository::SeaOrmReviewRepository;
pub use store_repository::SeaOrmStoreRepository;
pub use trade_repository::SeaOrmTradeRepository;
pub use user_action_repository::SeaOrmUserActionRepository;

/// Sorted, duplicate-free id list as stored in junction tables
pub(crate) fn normalize_ids(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::normalize_ids;

    #[test]
    fn normalize_ids_sorts_and_dedups() {
        assert_eq!(normalize_ids(vec![4, 2, 4, 1]), vec![1, 2, 4]);
        assert!(normalize_ids(Vec::new()).is_empty());
    }
}
