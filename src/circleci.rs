//! Client for the CircleCI v1.1 build-trigger API.

use axum::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::bridge::BuildTrigger;
use crate::github::GithubRepoName;

fn base_circleci_url() -> &'static str {
    "https://circleci.com/api/v1.1"
}

/// Result of a successfully triggered build.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildResult {
    pub build_url: String,
}

#[derive(Debug, Error)]
pub enum TriggerBuildError {
    /// The job name was empty. Callers validate this before the network call.
    #[error("Invalid build parameter: job is not specified")]
    MissingJob,
    /// The trigger endpoint answered without a build URL.
    #[error("Invalid build trigger response")]
    InvalidResponse,
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),
}

pub struct CircleCiClient {
    client: reqwest::Client,
    api_token: SecretString,
}

impl CircleCiClient {
    pub fn new(api_token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token,
        }
    }

    fn trigger_url(&self, repository: &GithubRepoName, branch: &str) -> String {
        format!(
            "{}/project/github/{repository}/tree/{branch}",
            base_circleci_url()
        )
    }
}

#[derive(serde::Serialize)]
struct TriggerRequest<'a> {
    build_parameters: BuildParameters<'a>,
}

#[derive(serde::Serialize)]
struct BuildParameters<'a> {
    #[serde(rename = "CIRCLE_JOB")]
    job: &'a str,
}

#[derive(serde::Deserialize)]
struct TriggerResponse {
    build_url: Option<String>,
}

#[async_trait]
impl BuildTrigger for CircleCiClient {
    async fn trigger_build(
        &self,
        repository: &GithubRepoName,
        branch: &str,
        job: &str,
    ) -> Result<BuildResult, TriggerBuildError> {
        if job.is_empty() {
            return Err(TriggerBuildError::MissingJob);
        }

        let response: TriggerResponse = self
            .client
            .post(self.trigger_url(repository, branch))
            .basic_auth(self.api_token.expose_secret(), None::<&str>)
            .json(&TriggerRequest {
                build_parameters: BuildParameters { job },
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.build_url {
            Some(build_url) => Ok(BuildResult { build_url }),
            None => Err(TriggerBuildError::InvalidResponse),
        }
    }
}
