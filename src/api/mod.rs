mod admin;
mod store;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::config::{DEFAULT_COURSE_DETAILS_PATH, DEFAULT_COURSE_PRICING_PATH, DEFAULT_COURSES_PATH};
use crate::error::AppError;
use crate::models::{Course, CourseDetails, CoursePricing};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let router = Router::new().route("/health", get(health));
    let router = store::collection_routes::<Course>(router, DEFAULT_COURSES_PATH);
    let router = store::collection_routes::<CourseDetails>(router, DEFAULT_COURSE_DETAILS_PATH);
    let router = store::collection_routes::<CoursePricing>(router, DEFAULT_COURSE_PRICING_PATH);

    admin::routes(router).with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
