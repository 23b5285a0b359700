use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::auth::jwt::AuthUser;
use crate::auth::role::Role;
use crate::dashboard::dto::{StaffStats, StudentStats};
use crate::dashboard::repo;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/student-stats", get(student_stats))
        .route("/dashboard/staff-stats", get(staff_stats))
}

#[instrument(skip(state, claims))]
pub async fn student_stats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<StudentStats>, ApiError> {
    claims.require_role(Role::Student, "Only students can access these stats")?;
    let stats = repo::student_stats(&state.db, claims.sub).await?;
    Ok(Json(stats))
}

#[instrument(skip(state, claims))]
pub async fn staff_stats(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<StaffStats>, ApiError> {
    claims.require_role(Role::Staff, "Only staff can access these stats")?;
    let stats = repo::staff_stats(&state.db, claims.sub).await?;
    Ok(Json(stats))
}
