//! Application state containing the admin registry and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::admin::{self, AdminSite};
use crate::domain::ReferenceChecker;
use crate::infrastructure::SeaOrmReferenceChecker;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Registered models for the admin surface
    pub admin: Arc<AdminSite>,
    /// Foreign key and uniqueness lookups used during validation
    pub reference_checker: Arc<dyn ReferenceChecker>,
}

impl AppState {
    /// Create a new AppState with every model registered on the admin site
    pub fn new(db: DatabaseConnection) -> Self {
        let reference_checker = Arc::new(SeaOrmReferenceChecker::new(db.clone()));

        Self {
            db,
            admin: Arc::new(admin::default_site()),
            reference_checker,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Repository of type `R` bound to this state's connection
    pub fn repository<R>(&self) -> R
    where
        R: From<DatabaseConnection>,
    {
        R::from(self.db.clone())
    }
}
