//! CRUD endpoints of the local document store, one set per collection.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::Router;

use crate::collections::CollectionClient;
use crate::db::SqliteCollection;
use crate::error::AppError;
use crate::models::Document;
use crate::state::AppState;

pub(super) fn collection_routes<T: Document>(
    router: Router<AppState>,
    path: &str,
) -> Router<AppState> {
    router
        .route(path, get(list_documents::<T>).post(create_document::<T>))
        .route(
            &format!("{path}/{{id}}"),
            put(update_document::<T>).delete(delete_document::<T>),
        )
}

async fn list_documents<T: Document>(
    State(state): State<AppState>,
) -> Result<Json<Vec<T>>, AppError> {
    let records = SqliteCollection::<T>::new(state.db).list_all().await?;
    Ok(Json(records))
}

async fn create_document<T: Document>(
    State(state): State<AppState>,
    Json(payload): Json<T>,
) -> Result<(StatusCode, Json<T>), AppError> {
    if payload.logical_key().trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "{} record needs a course id",
            T::COLLECTION
        )));
    }
    let record = SqliteCollection::<T>::new(state.db).create(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_document<T: Document>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<T>,
) -> Result<Json<T>, AppError> {
    let record = SqliteCollection::<T>::new(state.db)
        .update(&id, &payload)
        .await?;
    Ok(Json(record))
}

async fn delete_document<T: Document>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    SqliteCollection::<T>::new(state.db).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
