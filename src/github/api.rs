use anyhow::Context;
use axum::async_trait;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

use crate::bridge::PullRequestApi;
use crate::github::PullRequestEntity;

/// Provides access to pull requests using the GitHub API, authenticated with
/// a personal access token.
pub struct GithubClient {
    client: Octocrab,
}

impl GithubClient {
    pub fn new(access_token: &SecretString) -> anyhow::Result<Self> {
        let client = Octocrab::builder()
            .personal_token(access_token.expose_secret().to_string())
            .build()
            .context("Could not create GitHub client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PullRequestApi for GithubClient {
    async fn fetch_pull_request(&self, url: &str) -> anyhow::Result<PullRequestEntity> {
        let data: serde_json::Value = self
            .client
            .get(url, None::<&()>)
            .await
            .with_context(|| format!("Could not fetch pull request from {url}"))?;
        parse_pull_request(data)
    }

    async fn post_comment(
        &self,
        pull_request: &PullRequestEntity,
        text: &str,
    ) -> anyhow::Result<()> {
        #[derive(serde::Serialize)]
        struct CommentRequest<'a> {
            body: &'a str,
        }

        let _: serde_json::Value = self
            .client
            .post(
                &pull_request.comments_url,
                Some(&CommentRequest { body: text }),
            )
            .await
            .with_context(|| format!("Cannot post comment to {}", pull_request.comments_url))?;
        Ok(())
    }
}

/// The two URL fields are what the rest of the pipeline navigates by, so a
/// response missing them is rejected rather than partially used.
fn parse_pull_request(data: serde_json::Value) -> anyhow::Result<PullRequestEntity> {
    if !data["url"].is_string() || !data["comments_url"].is_string() {
        return Err(anyhow::anyhow!("Invalid pull request response"));
    }
    serde_json::from_value(data).context("Cannot deserialize pull request")
}
