//! Contains definitions of common types (pull request, repository name) needed
//! for working with GitHub repositories.
use std::fmt::{Debug, Display, Formatter};

pub mod api;
pub mod server;
mod webhook;

pub use webhook::{GitHubWebhook, WebhookSecret};

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// Head or base branch of a pull request.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Branch {
    #[serde(rename = "ref")]
    pub name: String,
}

/// A pull request as the GitHub API serves it, reduced to the fields the bot
/// reads. Fetched once per request and never mutated.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct PullRequestEntity {
    /// API URL of the pull request itself.
    pub url: String,
    pub body: Option<String>,
    /// URL that comments are posted to.
    pub comments_url: String,
    pub head: Branch,
    pub base: Branch,
}
