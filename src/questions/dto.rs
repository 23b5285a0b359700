use serde::{Deserialize, Serialize};

use crate::questions::repo::{Difficulty, QuestionInput};

/// Query string for the public listing. `all` disables a filter, matching
/// what the portal UI sends.
#[derive(Debug, Deserialize)]
pub struct QuestionListQuery {
    pub difficulty: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub sample_input: Option<String>,
    pub sample_output: Option<String>,
    pub constraints: Option<String>,
}

impl From<QuestionRequest> for QuestionInput {
    fn from(r: QuestionRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            difficulty: r.difficulty,
            tags: r.tags,
            sample_input: r.sample_input,
            sample_output: r.sample_output,
            constraints: r.constraints,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
