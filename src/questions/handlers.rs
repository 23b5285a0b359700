use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::auth::role::Role;
use crate::error::ApiError;
use crate::questions::dto::{MessageResponse, QuestionListQuery, QuestionRequest};
use crate::questions::repo::{self, Difficulty, Question, QuestionFilter};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/questions/:id", get(get_question))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", post(create_question))
        .route("/questions/:id", put(update_question).delete(delete_question))
}

#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let filter = parse_filter(query)?;
    let questions = repo::list(&state.db, &filter).await?;
    Ok(Json(questions))
}

#[instrument(skip(state))]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Question>, ApiError> {
    let question = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Question not found"))?;
    Ok(Json(question))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_question(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    claims.require_role(Role::Staff, "Only staff can create questions")?;

    let question = repo::create(&state.db, claims.sub, &payload.into()).await?;
    info!(question_id = %question.id, created_by = %claims.sub, "question created");
    Ok((StatusCode::CREATED, Json(question)))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_question(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<Question>, ApiError> {
    claims.require_role(Role::Staff, "Only staff can update questions")?;

    let question = repo::update(&state.db, id, claims.sub, &payload.into())
        .await?
        .ok_or(ApiError::NotFound("Question not found or unauthorized"))?;
    info!(question_id = %id, "question updated");
    Ok(Json(question))
}

#[instrument(skip(state, claims))]
pub async fn delete_question(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    claims.require_role(Role::Staff, "Only staff can delete questions")?;

    if !repo::delete(&state.db, id, claims.sub).await? {
        return Err(ApiError::NotFound("Question not found or unauthorized"));
    }
    info!(question_id = %id, "question deleted");
    Ok(Json(MessageResponse {
        message: "Question deleted successfully".into(),
    }))
}

fn parse_filter(query: QuestionListQuery) -> Result<QuestionFilter, ApiError> {
    let difficulty = match query.difficulty.as_deref() {
        None | Some("all") | Some("") => None,
        Some(value) => Some(
            value
                .parse::<Difficulty>()
                .map_err(|_| ApiError::Validation("Invalid difficulty".into()))?,
        ),
    };
    let tag = query.tag.filter(|t| t != "all" && !t.is_empty());
    let search = query.search.filter(|s| !s.is_empty());
    Ok(QuestionFilter {
        difficulty,
        tag,
        search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(difficulty: Option<&str>, tag: Option<&str>, search: Option<&str>) -> QuestionListQuery {
        QuestionListQuery {
            difficulty: difficulty.map(String::from),
            tag: tag.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn all_sentinel_disables_filters() {
        let filter = parse_filter(query(Some("all"), Some("all"), None)).unwrap();
        assert!(filter.difficulty.is_none());
        assert!(filter.tag.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn known_difficulty_is_parsed() {
        let filter = parse_filter(query(Some("medium"), Some("arrays"), Some("tree"))).unwrap();
        assert_eq!(filter.difficulty, Some(Difficulty::Medium));
        assert_eq!(filter.tag.as_deref(), Some("arrays"));
        assert_eq!(filter.search.as_deref(), Some("tree"));
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = parse_filter(query(Some("brutal"), None, None)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
