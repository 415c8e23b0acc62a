pub mod admin;
pub mod error;
pub mod extract;
pub mod health;
pub mod resources;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

use crate::domain::Repository;
use crate::infrastructure::repositories::*;
use crate::infrastructure::AppState;

/// Collection and detail routes for one repository
fn resource_routes<R>(router: Router<AppState>) -> Router<AppState>
where
    R: Repository + From<DatabaseConnection>,
{
    router
        .route(
            &format!("/{}", R::RESOURCE),
            get(resources::list::<R>).post(resources::create::<R>),
        )
        .route(
            &format!("/{}/:id", R::RESOURCE),
            get(resources::retrieve::<R>)
                .put(resources::update::<R>)
                .patch(resources::partial_update::<R>)
                .delete(resources::destroy::<R>),
        )
}

pub fn api_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Admin
        .route("/admin/login", post(admin::login))
        .route("/admin", get(admin::index))
        .route("/admin/:resource", get(admin::changelist))
        .route(
            "/admin/:resource/:id",
            get(admin::change_view).delete(admin::delete),
        );

    // Resources
    let router = resource_routes::<SeaOrmCustomerRepository>(router);
    let router = resource_routes::<SeaOrmTradeRepository>(router);
    let router = resource_routes::<SeaOrmProductRepository>(router);
    let router = resource_routes::<SeaOrmRatingsRepository>(router);
    let router = resource_routes::<SeaOrmCategoryRepository>(router);
    let router = resource_routes::<SeaOrmStoreRepository>(router);
    let router = resource_routes::<SeaOrmDiscountRepository>(router);
    let router = resource_routes::<SeaOrmUserActionRepository>(router);
    let router = resource_routes::<SeaOrmActionTypeRepository>(router);
    let router = resource_routes::<SeaOrmActionRangTypeRepository>(router);
    let router = resource_routes::<SeaOrmDeliveryRepository>(router);
    let router = resource_routes::<SeaOrmDeliveryTypeRepository>(router);
    let router = resource_routes::<SeaOrmPackageRepository>(router);
    let router = resource_routes::<SeaOrmReviewRepository>(router);

    router.with_state(state)
}
