use std::time::Duration;

use axum::{routing::post, Json, Router};
use tracing::instrument;

use crate::auth::jwt::AuthUser;
use crate::runner::dto::{ExecuteRequest, ExecuteResponse};
use crate::runner::service::run_snippet;
use crate::state::AppState;

/// Matches the latency of a real compile-and-run cycle for the UI.
const SIMULATED_EXECUTION_DELAY: Duration = Duration::from_secs(1);

pub fn routes() -> Router<AppState> {
    Router::new().route("/execute", post(execute))
}

#[instrument(skip(_user, payload))]
pub async fn execute(
    _user: AuthUser,
    Json(payload): Json<ExecuteRequest>,
) -> Json<ExecuteResponse> {
    let output = run_snippet(&payload.language, &payload.code, &payload.input);
    tokio::time::sleep(SIMULATED_EXECUTION_DELAY).await;
    Json(ExecuteResponse { output })
}
