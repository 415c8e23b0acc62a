use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::extract::ObjectId;
use crate::domain::DomainError;
use crate::infrastructure::auth::{create_jwt, verify_password, Claims};
use crate::infrastructure::AppState;
use crate::models::staff_user;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    token: String,
}

#[derive(Serialize, ToSchema)]
pub struct ModelSummary {
    model: String,
    resource: String,
    count: u64,
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token for the admin routes", body = LoginResponse),
        (status = 401, description = "Unknown user, wrong password or unreadable body")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DomainError> {
    let invalid = || DomainError::Unauthorized("Invalid credentials".to_string());

    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Rejected admin login body: {}", rejection.body_text());
        invalid()
    })?;
    tracing::info!("Admin login attempt for user: {}", payload.username);

    let user = staff_user::Entity::find()
        .filter(staff_user::Column::Username.eq(&payload.username))
        .one(state.db())
        .await?
        .ok_or_else(|| {
            tracing::warn!("Staff user not found: {}", payload.username);
            invalid()
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!("Password verification failed for user: {}", user.username);
        return Err(invalid());
    }

    let token = create_jwt(&user.username, &user.role)?;
    tracing::debug!("Issued admin token for {}", user.username);
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/admin",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registered models with row counts", body = [ModelSummary]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn index(
    _claims: Claims,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, DomainError> {
    let mut models = Vec::with_capacity(state.admin.len());
    for admin in state.admin.models() {
        models.push(ModelSummary {
            model: admin.model_name().to_string(),
            resource: admin.resource().to_string(),
            count: admin.count(state.db()).await?,
        });
    }
    Ok(Json(models))
}

#[utoipa::path(
    get,
    path = "/api/admin/{resource}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("resource" = String, Path, description = "Resource name, e.g. customers")),
    responses(
        (status = 200, description = "Model name, field table and (id, label) rows"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No model registered under this name")
    )
)]
pub async fn changelist(
    _claims: Claims,
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let admin = state.admin.get(&resource).ok_or(DomainError::NotFound)?;
    let objects = admin.changelist(state.db()).await?;

    Ok(Json(json!({
        "model": admin.model_name(),
        "fields": admin.fields(),
        "objects": objects,
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/{resource}/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("resource" = String, Path, description = "Resource name, e.g. customers"),
        ("id" = i32, Path, description = "Row id")
    ),
    responses(
        (status = 200, description = "Label and full record"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown model or row")
    )
)]
pub async fn change_view(
    _claims: Claims,
    State(state): State<AppState>,
    Path((resource, _id)): Path<(String, String)>,
    ObjectId(id): ObjectId,
) -> Result<impl IntoResponse, DomainError> {
    let admin = state.admin.get(&resource).ok_or(DomainError::NotFound)?;
    Ok(Json(admin.change_view(state.db(), id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/{resource}/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("resource" = String, Path, description = "Resource name, e.g. customers"),
        ("id" = i32, Path, description = "Row id")
    ),
    responses(
        (status = 204, description = "Row and its dependents deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown model or row")
    )
)]
pub async fn delete(
    claims: Claims,
    State(state): State<AppState>,
    Path((resource, _id)): Path<(String, String)>,
    ObjectId(id): ObjectId,
) -> Result<impl IntoResponse, DomainError> {
    let admin = state.admin.get(&resource).ok_or(DomainError::NotFound)?;
    admin.delete(state.db(), id).await?;

    tracing::info!(
        "{} {} deleted from admin by {}",
        admin.model_name(),
        id,
        claims.sub
    );
    Ok(StatusCode::NO_CONTENT)
}
