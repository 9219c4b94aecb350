//! Core of the bot: command resolution and build orchestration.
use axum::async_trait;

use crate::circleci::{BuildResult, TriggerBuildError};
use crate::github::{GithubRepoName, PullRequestEntity};

pub mod command;
mod comment;
mod context;
pub mod event;
mod handlers;
mod resolver;

pub use command::{AllowedJobs, Command, CommandParser};
pub use context::BridgeContext;
pub use handlers::handle_webhook_event;
pub use resolver::resolve_command;

/// Provides access to pull requests of a remote repository.
/// It is behind a trait to allow easier mocking in tests.
#[async_trait]
pub trait PullRequestApi {
    /// Resolve a pull request from its API URL.
    async fn fetch_pull_request(&self, url: &str) -> anyhow::Result<PullRequestEntity>;

    /// Post a comment to the pull request's comment thread.
    async fn post_comment(
        &self,
        pull_request: &PullRequestEntity,
        text: &str,
    ) -> anyhow::Result<()>;
}

/// Starts builds on a CI service.
#[async_trait]
pub trait BuildTrigger {
    /// Trigger a build of `job` on `branch` of `repository`.
    async fn trigger_build(
        &self,
        repository: &GithubRepoName,
        branch: &str,
        job: &str,
    ) -> Result<BuildResult, TriggerBuildError>;
}
