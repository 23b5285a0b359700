use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub created_by: Uuid,
    pub created_at: OffsetDateTime,
    pub sample_input: Option<String>,
    pub sample_output: Option<String>,
    pub constraints: Option<String>,
    pub tags: Vec<String>,
}

/// Scalar fields plus the full replacement tag set for create/update.
#[derive(Debug)]
pub struct QuestionInput {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub sample_input: Option<String>,
    pub sample_output: Option<String>,
    pub constraints: Option<String>,
}

#[derive(Debug, Default)]
pub struct QuestionFilter {
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

const QUESTION_SELECT: &str = "\
    SELECT q.id, q.title, q.description, q.difficulty, q.created_by, q.created_at, \
           q.sample_input, q.sample_output, q.constraints, \
           COALESCE(array_agg(qt.tag ORDER BY qt.tag) FILTER (WHERE qt.tag IS NOT NULL), '{}') AS tags \
    FROM questions q \
    LEFT JOIN question_tags qt ON qt.question_id = q.id";

pub async fn list(db: &PgPool, filter: &QuestionFilter) -> anyhow::Result<Vec<Question>> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(QUESTION_SELECT);
    qb.push(" WHERE TRUE");
    if let Some(difficulty) = filter.difficulty {
        qb.push(" AND q.difficulty = ").push_bind(difficulty);
    }
    if let Some(tag) = &filter.tag {
        qb.push(" AND EXISTS (SELECT 1 FROM question_tags t WHERE t.question_id = q.id AND t.tag = ")
            .push_bind(tag.clone())
            .push(")");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (q.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR q.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    qb.push(" GROUP BY q.id ORDER BY q.created_at DESC");

    let questions = qb.build_query_as::<Question>().fetch_all(db).await?;
    Ok(questions)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Question>> {
    let question =
        sqlx::query_as::<_, Question>(&format!("{QUESTION_SELECT} WHERE q.id = $1 GROUP BY q.id"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(question)
}

pub async fn create(db: &PgPool, created_by: Uuid, input: &QuestionInput) -> anyhow::Result<Question> {
    let mut tx = db.begin().await?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO questions (title, description, difficulty, created_by, sample_input, sample_output, constraints)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.difficulty)
    .bind(created_by)
    .bind(&input.sample_input)
    .bind(&input.sample_output)
    .bind(&input.constraints)
    .fetch_one(&mut *tx)
    .await?;

    insert_tags(&mut tx, id, &input.tags).await?;
    tx.commit().await?;

    let question = find_by_id(db, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("question missing after insert"))?;
    Ok(question)
}

/// Updates a question owned by `owner`, replacing the whole tag set.
/// Returns `None` when no row matches both the id and the owner.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    owner: Uuid,
    input: &QuestionInput,
) -> anyhow::Result<Option<Question>> {
    let mut tx = db.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE questions
        SET title = $1, description = $2, difficulty = $3, sample_input = $4, sample_output = $5, constraints = $6
        WHERE id = $7 AND created_by = $8
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.difficulty)
    .bind(&input.sample_input)
    .bind(&input.sample_output)
    .bind(&input.constraints)
    .bind(id)
    .bind(owner)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query("DELETE FROM question_tags WHERE question_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_tags(&mut tx, id, &input.tags).await?;
    tx.commit().await?;

    Ok(find_by_id(db, id).await?)
}

/// Returns false when no row matches both the id and the owner.
pub async fn delete(db: &PgPool, id: Uuid, owner: Uuid) -> anyhow::Result<bool> {
    let deleted = sqlx::query("DELETE FROM questions WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(db)
        .await?;
    Ok(deleted.rows_affected() > 0)
}

async fn insert_tags(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    question_id: Uuid,
    tags: &[String],
) -> anyhow::Result<()> {
    for tag in tags {
        sqlx::query("INSERT INTO question_tags (question_id, tag) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(question_id)
            .bind(tag)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_known_values_only() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert!("Easy".parse::<Difficulty>().is_err());
    }
}
