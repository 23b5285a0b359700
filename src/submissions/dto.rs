use serde::Deserialize;
use uuid::Uuid;

use crate::submissions::repo::SubmissionStatus;

#[derive(Debug, Deserialize)]
pub struct SubmissionListQuery {
    pub question_id: Option<Uuid>,
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub question_id: Uuid,
    pub language: String,
    pub code: String,
}
