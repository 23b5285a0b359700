use serde::Serialize;
use sqlx::FromRow;

use crate::questions::repo::{Difficulty, Question};
use crate::submissions::repo::{Submission, SubmissionStatus};

#[derive(Debug, Serialize, FromRow)]
pub struct DifficultyCount {
    pub difficulty: Difficulty,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: SubmissionStatus,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct StudentStats {
    pub total_submissions: i64,
    pub successful_submissions: i64,
    pub questions_attempted: i64,
    pub questions_by_difficulty: Vec<DifficultyCount>,
    pub recent_submissions: Vec<Submission>,
}

#[derive(Debug, Serialize)]
pub struct StaffStats {
    pub total_questions: i64,
    pub questions_by_difficulty: Vec<DifficultyCount>,
    pub total_submissions: i64,
    pub submissions_by_status: Vec<StatusCount>,
    pub recent_questions: Vec<Question>,
}
