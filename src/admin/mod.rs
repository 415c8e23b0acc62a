//! Admin site - registry of the models exposed to staff
//!
//! Each registered model gets a change list (id plus label), a detail view
//! and deletion. Registration is type erased so the site can hold every
//! entity behind one trait object.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{DomainError, FieldSpec, Repository};
use crate::infrastructure::repositories::*;

/// One line of a change list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminRow {
    pub id: Option<i32>,
    pub label: String,
}

/// Detail view of a single object
#[derive(Debug, Clone, Serialize)]
pub struct AdminObject {
    pub id: i32,
    pub label: String,
    pub record: Value,
}

#[async_trait]
pub trait ModelAdmin: Send + Sync {
    fn model_name(&self) -> &'static str;

    /// Path segment, shared with the REST collection
    fn resource(&self) -> &'static str;

    fn fields(&self) -> &'static [FieldSpec];

    async fn count(&self, db: &DatabaseConnection) -> Result<u64, DomainError>;

    async fn changelist(&self, db: &DatabaseConnection) -> Result<Vec<AdminRow>, DomainError>;

    async fn change_view(
        &self,
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<AdminObject, DomainError>;

    async fn delete(&self, db: &DatabaseConnection, id: i32) -> Result<(), DomainError>;
}

/// Default admin behaviour for any repository
pub struct Registration<R>(PhantomData<fn() -> R>);

impl<R> Registration<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for Registration<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> ModelAdmin for Registration<R>
where
    R: Repository + From<DatabaseConnection>,
{
    fn model_name(&self) -> &'static str {
        R::MODEL
    }

    fn resource(&self) -> &'static str {
        R::RESOURCE
    }

    fn fields(&self) -> &'static [FieldSpec] {
        R::FIELDS
    }

    async fn count(&self, db: &DatabaseConnection) -> Result<u64, DomainError> {
        R::from(db.clone()).count().await
    }

    async fn changelist(&self, db: &DatabaseConnection) -> Result<Vec<AdminRow>, DomainError> {
        let repo = R::from(db.clone());
        let records = repo.find_all().await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            rows.push(AdminRow {
                id: R::record_id(record),
                label: repo.label(record).await?,
            });
        }
        Ok(rows)
    }

    async fn change_view(
        &self,
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<AdminObject, DomainError> {
        let repo = R::from(db.clone());
        let record = repo.find_by_id(id).await?.ok_or(DomainError::NotFound)?;
        let label = repo.label(&record).await?;
        let record =
            serde_json::to_value(&record).map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(AdminObject { id, label, record })
    }

    async fn delete(&self, db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
        R::from(db.clone()).delete(id).await
    }
}

/// Registered models keyed by resource name
#[derive(Default)]
pub struct AdminSite {
    models: BTreeMap<&'static str, Arc<dyn ModelAdmin>>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` under its resource name. Registering twice replaces the
    /// earlier entry.
    pub fn register<R>(&mut self) -> &mut Self
    where
        R: Repository + From<DatabaseConnection>,
    {
        let admin: Arc<dyn ModelAdmin> = Arc::new(Registration::<R>::new());
        if self.models.insert(R::RESOURCE, admin).is_some() {
            tracing::warn!("{} registered twice on the admin site", R::MODEL);
        }
        self
    }

    pub fn get(&self, resource: &str) -> Option<Arc<dyn ModelAdmin>> {
        self.models.get(resource).cloned()
    }

    /// Registered models ordered by resource name
    pub fn models(&self) -> impl Iterator<Item = &Arc<dyn ModelAdmin>> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Site with every coffee shop model registered
pub fn default_site() -> AdminSite {
    let mut site = AdminSite::new();
    site.register::<SeaOrmCustomerRepository>()
        .register::<SeaOrmTradeRepository>()
        .register::<SeaOrmProductRepository>()
        .register::<SeaOrmRatingsRepository>()
        .register::<SeaOrmCategoryRepository>()
        .register::<SeaOrmStoreRepository>()
        .register::<SeaOrmDiscountRepository>()
        .register::<SeaOrmUserActionRepository>()
        .register::<SeaOrmActionTypeRepository>()
        .register::<SeaOrmActionRangTypeRepository>()
        .register::<SeaOrmDeliveryRepository>()
        .register::<SeaOrmDeliveryTypeRepository>()
        .register::<SeaOrmPackageRepository>()
        .register::<SeaOrmReviewRepository>();
    site
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site_registers_every_model() {
        let site = default_site();
        assert_eq!(site.len(), 14);
        assert_eq!(
            site.get("customers").map(|m| m.model_name()),
            Some("Customer")
        );
        assert_eq!(
            site.get("user-actions").map(|m| m.model_name()),
            Some("UserAction")
        );
        assert!(site.get("staff").is_none());
    }

    #[test]
    fn registering_twice_keeps_one_entry() {
        let mut site = AdminSite::new();
        site.register::<SeaOrmStoreRepository>()
            .register::<SeaOrmStoreRepository>();
        assert_eq!(site.len(), 1);
    }
}
