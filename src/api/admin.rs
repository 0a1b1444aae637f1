//! Admin endpoints over the unified course view.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::Router;

use crate::error::AppError;
use crate::models::UnifiedCourseView;
use crate::state::AppState;
use crate::sync::{ConsistencyReport, DeleteReport, SaveReport};

pub(super) fn routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/admin/courses", get(list_courses).post(create_course))
        .route("/admin/courses/audit", get(audit_courses))
        .route(
            "/admin/courses/{key}",
            put(update_course).delete(delete_course),
        )
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<UnifiedCourseView>>, AppError> {
    let views = state.sync.fetch_all().await?;
    Ok(Json(views))
}

async fn create_course(
    State(state): State<AppState>,
    Json(mut view): Json<UnifiedCourseView>,
) -> Result<(StatusCode, Json<SaveReport>), AppError> {
    view.course_key = None;
    let report = state.sync.save(view, None).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(mut view): Json<UnifiedCourseView>,
) -> Result<Json<SaveReport>, AppError> {
    view.course_key = Some(key);
    let report = state.sync.save(view, None).await?;
    Ok(Json(report))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteReport>, AppError> {
    let report = state.sync.delete(&key).await?;
    Ok(Json(report))
}

async fn audit_courses(
    State(state): State<AppState>,
) -> Result<Json<ConsistencyReport>, AppError> {
    let report = state.sync.audit().await?;
    Ok(Json(report))
}
