use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

use crate::bridge::event::{IssueCommentEvent, PullRequestEvent, WebhookEvent};
use crate::github::server::ServerStateRef;
use crate::github::{GithubRepoName, PullRequestEntity};

/// Events are delivered as JSON; ten megabytes is far above anything GitHub
/// sends.
const WEBHOOK_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(serde::Deserialize, Debug)]
struct Repository {
    full_name: String,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookPullRequestEvent {
    action: String,
    pull_request: PullRequestEntity,
    repository: Repository,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookIssueCommentEvent {
    action: String,
    issue: WebhookIssue,
    comment: WebhookComment,
    repository: Repository,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookIssue {
    /// Present only when the issue is a pull request.
    pull_request: Option<WebhookIssuePullRequest>,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookIssuePullRequest {
    url: String,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookComment {
    body: Option<String>,
}

/// axum extractor for GitHub webhook events.
#[derive(Debug)]
pub struct GitHubWebhook(pub WebhookEvent);

/// Extracts a webhook event from a HTTP request.
#[async_trait]
impl FromRequest<ServerStateRef> for GitHubWebhook {
    type Rejection = StatusCode;

    async fn from_request(
        request: Request,
        state: &ServerStateRef,
    ) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Eagerly load the raw body; the signature is computed over the exact
        // bytes that were sent, not a re-serialized form.
        let body: Bytes = axum::body::to_bytes(body, WEBHOOK_BODY_LIMIT)
            .await
            .map_err(|error| {
                tracing::error!("Parsing webhook body failed: {error:?}");
                StatusCode::BAD_REQUEST
            })?;

        // Verify that the request is valid
        if !verify_gh_signature(&parts.headers, &body, state.webhook_secret()) {
            tracing::error!("Webhook request failed, could not authenticate webhook");
            return Err(StatusCode::BAD_REQUEST);
        }

        // Parse webhook content
        match parse_webhook_event(&parts.headers, &body) {
            Ok(event) => Ok(GitHubWebhook(event)),
            Err(error) => {
                tracing::error!("Cannot parse webhook event: {error:?}");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    }
}

fn parse_webhook_event(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
) -> anyhow::Result<WebhookEvent> {
    let Some(event_type) = headers.get("x-github-event") else {
        return Err(anyhow::anyhow!("x-github-event header not found"));
    };

    match event_type.as_bytes() {
        b"pull_request" => {
            let payload: WebhookPullRequestEvent = serde_json::from_slice(body)?;
            Ok(WebhookEvent::PullRequest(PullRequestEvent {
                action: payload.action,
                repository: parse_repository_name(&payload.repository)?,
                pull_request: payload.pull_request,
            }))
        }
        b"issue_comment" => {
            let payload: WebhookIssueCommentEvent = serde_json::from_slice(body)?;
            Ok(WebhookEvent::IssueComment(IssueCommentEvent {
                action: payload.action,
                repository: parse_repository_name(&payload.repository)?,
                comment_text: payload.comment.body.unwrap_or_default(),
                pull_request_url: payload.issue.pull_request.map(|pr| pr.url),
            }))
        }
        _ => {
            tracing::debug!("Ignoring unknown event type {:?}", event_type.to_str());
            Ok(WebhookEvent::Other)
        }
    }
}

fn parse_repository_name(repository: &Repository) -> anyhow::Result<GithubRepoName> {
    let Some((owner, name)) = repository.full_name.split_once('/') else {
        return Err(anyhow::anyhow!(
            "Invalid repository name {}",
            repository.full_name
        ));
    };
    Ok(GithubRepoName::new(owner, name))
}

type HmacSha1 = Hmac<Sha1>;

/// Verifies that the request is properly signed by GitHub with SHA-1 and the
/// configured secret. Signature checking is opt-in; without a secret every
/// request is accepted.
fn verify_gh_signature(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
    secret: Option<&WebhookSecret>,
) -> bool {
    let Some(secret) = secret else {
        return true;
    };
    let Some(signature) = headers.get("x-hub-signature").map(|v| v.as_bytes()) else {
        return false;
    };
    let Some(signature) = signature
        .strip_prefix(b"sha1=")
        .and_then(|v| hex::decode(v).ok())
    else {
        return false;
    };

    let mut mac =
        HmacSha1::new_from_slice(secret.expose().as_bytes()).expect("Cannot create HMAC key");
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Wrapper for a secret which is zeroed on drop and can be exposed only through the
/// [`WebhookSecret::expose`] method.
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}
