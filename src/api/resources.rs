//! Generic CRUD handlers, instantiated once per repository type

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::extract::ObjectId;
use crate::domain::{DomainError, Repository};
use crate::infrastructure::AppState;
use crate::services::resource_service;

pub async fn list<R>(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    let records = resource_service::list(&state.repository::<R>()).await?;
    Ok(Json(records))
}

pub async fn create<R>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    let record = resource_service::create(
        &state.repository::<R>(),
        &*state.reference_checker,
        body,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn retrieve<R>(
    State(state): State<AppState>,
    ObjectId(id): ObjectId,
) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    let record = resource_service::retrieve(&state.repository::<R>(), id).await?;
    Ok(Json(record))
}

pub async fn update<R>(
    State(state): State<AppState>,
    ObjectId(id): ObjectId,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    let record = resource_service::update(
        &state.repository::<R>(),
        &*state.reference_checker,
        id,
        body,
        false,
    )
    .await?;
    Ok(Json(record))
}

pub async fn partial_update<R>(
    State(state): State<AppState>,
    ObjectId(id): ObjectId,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    let record = resource_service::update(
        &state.repository::<R>(),
        &*state.reference_checker,
        id,
        body,
        true,
    )
    .await?;
    Ok(Json(record))
}

pub async fn destroy<R>(
    State(state): State<AppState>,
    ObjectId(id): ObjectId,
) -> Result<impl IntoResponse, DomainError>
where
    R: Repository + From<DatabaseConnection>,
{
    resource_service::destroy(&state.repository::<R>(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
