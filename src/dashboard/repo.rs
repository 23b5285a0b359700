use sqlx::PgPool;
use uuid::Uuid;

use crate::dashboard::dto::{DifficultyCount, StaffStats, StatusCount, StudentStats};
use crate::questions::repo::Question;
use crate::submissions::repo::{self as submissions_repo, SubmissionStatus};

const RECENT_LIMIT: i64 = 5;

pub async fn student_stats(db: &PgPool, user_id: Uuid) -> anyhow::Result<StudentStats> {
    let total_submissions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;

    let successful_submissions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE user_id = $1 AND status = $2")
            .bind(user_id)
            .bind(SubmissionStatus::Accepted)
            .fetch_one(db)
            .await?;

    let questions_attempted: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT question_id) FROM submissions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;

    let questions_by_difficulty = sqlx::query_as::<_, DifficultyCount>(
        r#"
        SELECT q.difficulty, COUNT(DISTINCT s.question_id) AS count
        FROM submissions s
        JOIN questions q ON q.id = s.question_id
        WHERE s.user_id = $1
        GROUP BY q.difficulty
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let recent_submissions = submissions_repo::recent_by_user(db, user_id, RECENT_LIMIT).await?;

    Ok(StudentStats {
        total_submissions,
        successful_submissions,
        questions_attempted,
        questions_by_difficulty,
        recent_submissions,
    })
}

pub async fn staff_stats(db: &PgPool, user_id: Uuid) -> anyhow::Result<StaffStats> {
    let total_questions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE created_by = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;

    let questions_by_difficulty = sqlx::query_as::<_, DifficultyCount>(
        r#"
        SELECT difficulty, COUNT(*) AS count
        FROM questions
        WHERE created_by = $1
        GROUP BY difficulty
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let total_submissions: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM submissions s
        JOIN questions q ON q.id = s.question_id
        WHERE q.created_by = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;

    let submissions_by_status = sqlx::query_as::<_, StatusCount>(
        r#"
        SELECT s.status, COUNT(*) AS count
        FROM submissions s
        JOIN questions q ON q.id = s.question_id
        WHERE q.created_by = $1
        GROUP BY s.status
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let recent_questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT q.id, q.title, q.description, q.difficulty, q.created_by, q.created_at,
               q.sample_input, q.sample_output, q.constraints,
               COALESCE(array_agg(qt.tag ORDER BY qt.tag) FILTER (WHERE qt.tag IS NOT NULL), '{}') AS tags
        FROM questions q
        LEFT JOIN question_tags qt ON qt.question_id = q.id
        WHERE q.created_by = $1
        GROUP BY q.id
        ORDER BY q.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(RECENT_LIMIT)
    .fetch_all(db)
    .await?;

    Ok(StaffStats {
        total_questions,
        questions_by_difficulty,
        total_submissions,
        submissions_by_status,
        recent_questions,
    })
}
