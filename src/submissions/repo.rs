use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Accepted,
    Wrong,
}

/// Submission row joined with the question title for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub question_title: String,
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Default)]
pub struct SubmissionFilter {
    pub question_id: Option<Uuid>,
    pub status: Option<SubmissionStatus>,
}

const SUBMISSION_SELECT: &str = "\
    SELECT s.id, s.user_id, s.question_id, q.title AS question_title, \
           s.language, s.code, s.status, s.submitted_at \
    FROM submissions s \
    JOIN questions q ON q.id = s.question_id";

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    filter: &SubmissionFilter,
) -> anyhow::Result<Vec<Submission>> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SUBMISSION_SELECT);
    qb.push(" WHERE s.user_id = ").push_bind(user_id);
    if let Some(question_id) = filter.question_id {
        qb.push(" AND s.question_id = ").push_bind(question_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND s.status = ").push_bind(status);
    }
    qb.push(" ORDER BY s.submitted_at DESC");

    let submissions = qb.build_query_as::<Submission>().fetch_all(db).await?;
    Ok(submissions)
}

pub async fn recent_by_user(db: &PgPool, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<Submission>> {
    let submissions = sqlx::query_as::<_, Submission>(&format!(
        "{SUBMISSION_SELECT} WHERE s.user_id = $1 ORDER BY s.submitted_at DESC LIMIT $2"
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(submissions)
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    question_id: Uuid,
    language: &str,
    code: &str,
    status: SubmissionStatus,
) -> anyhow::Result<Submission> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO submissions (user_id, question_id, language, code, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(question_id)
    .bind(language)
    .bind(code)
    .bind(status)
    .fetch_one(db)
    .await?;

    let submission = sqlx::query_as::<_, Submission>(&format!("{SUBMISSION_SELECT} WHERE s.id = $1"))
        .bind(id)
        .fetch_one(db)
        .await?;
    Ok(submission)
}
