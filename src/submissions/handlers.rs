use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::questions;
use crate::state::AppState;
use crate::submissions::dto::{CreateSubmissionRequest, SubmissionListQuery};
use crate::submissions::repo::{self, Submission, SubmissionFilter};
use crate::submissions::service::judge;

pub fn routes() -> Router<AppState> {
    Router::new().route("/submissions", get(list_submissions).post(create_submission))
}

#[instrument(skip(state, claims))]
pub async fn list_submissions(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let filter = SubmissionFilter {
        question_id: query.question_id,
        status: query.status,
    };
    let submissions = repo::list_by_user(&state.db, claims.sub, &filter).await?;
    Ok(Json(submissions))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_submission(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<Submission>), ApiError> {
    questions::repo::find_by_id(&state.db, payload.question_id)
        .await?
        .ok_or(ApiError::NotFound("Question not found"))?;

    let status = judge(&mut rand::thread_rng());
    let submission = repo::create(
        &state.db,
        claims.sub,
        payload.question_id,
        &payload.language,
        &payload.code,
        status,
    )
    .await?;

    info!(
        submission_id = %submission.id,
        user_id = %claims.sub,
        question_id = %payload.question_id,
        status = ?status,
        "submission recorded"
    );
    Ok((StatusCode::CREATED, Json(submission)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submissions::repo::SubmissionStatus;
    use serde_json::json;

    #[test]
    fn status_filter_uses_lowercase_names() {
        let query: SubmissionListQuery =
            serde_json::from_value(json!({ "status": "accepted" })).unwrap();
        assert_eq!(query.status, Some(SubmissionStatus::Accepted));
        assert!(query.question_id.is_none());

        assert!(serde_json::from_value::<SubmissionListQuery>(json!({ "status": "pending" })).is_err());
    }
}
