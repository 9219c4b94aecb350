use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;

use crate::bridge::command::AllowedJobs;
use crate::bridge::{handle_webhook_event, BridgeContext};
use crate::circleci::CircleCiClient;
use crate::config::parse_job_list;
use crate::github::api::GithubClient;
use crate::github::webhook::{GitHubWebhook, WebhookSecret};

/// Shared server state for all axum handlers.
pub struct ServerState {
    ctx: BridgeContext<GithubClient, CircleCiClient>,
    webhook_secret: Option<WebhookSecret>,
}

impl ServerState {
    pub fn new(
        ctx: BridgeContext<GithubClient, CircleCiClient>,
        webhook_secret: Option<WebhookSecret>,
    ) -> Self {
        Self {
            ctx,
            webhook_secret,
        }
    }

    pub fn webhook_secret(&self) -> Option<&WebhookSecret> {
        self.webhook_secret.as_ref()
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(Arc::new(state))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

#[derive(serde::Deserialize)]
struct WebhookParams {
    /// Comma-separated override of the configured job allow-list.
    allowed_jobs: Option<String>,
}

/// Axum handler that receives a webhook and runs it through the whole
/// pipeline within this request. The response body carries the outcome
/// string.
async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    Query(params): Query<WebhookParams>,
    GitHubWebhook(event): GitHubWebhook,
) -> Result<String, AppError> {
    let allowed_jobs = AllowedJobs::resolve(
        &state.ctx.allowed_jobs,
        params.allowed_jobs.as_deref().map(parse_job_list),
    );
    let outcome = handle_webhook_event(&state.ctx, event, allowed_jobs).await?;
    Ok(outcome)
}

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let msg = format!("Something went wrong: {}", self.0);
        tracing::error!("{msg}");
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
