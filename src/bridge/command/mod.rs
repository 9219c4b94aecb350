mod parser;
pub use parser::{CommandParser, CommentCommand};

use crate::github::{GithubRepoName, PullRequestEntity};

/// Command resolved from a single webhook event.
/// Exactly one of these is produced per inbound event.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Trigger a CI build for a pull request.
    Trigger(TriggerCommand),
    /// Post a help comment to a pull request.
    Help(HelpCommand),
    /// The event does not concern the bot.
    Noop,
}

#[derive(Debug, PartialEq)]
pub struct TriggerCommand {
    pub repository: GithubRepoName,
    pub branch: String,
    pub pull_request: PullRequestEntity,
    pub job: String,
}

#[derive(Debug, PartialEq)]
pub struct HelpCommand {
    pub pull_request: PullRequestEntity,
}

/// Jobs that are permitted to be triggered for a single request.
/// An empty list allows every job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllowedJobs(Vec<String>);

impl AllowedJobs {
    pub fn new(jobs: Vec<String>) -> Self {
        Self(jobs)
    }

    /// Resolves the allow-list for one request. A per-request override fully
    /// replaces the configured list, the two are never merged.
    pub fn resolve(configured: &[String], request_override: Option<Vec<String>>) -> Self {
        match request_override {
            Some(jobs) => Self(jobs),
            None => Self(configured.to_vec()),
        }
    }

    pub fn is_allowed(&self, job: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|allowed| allowed == job)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::AllowedJobs;

    #[test]
    fn empty_list_allows_everything() {
        let allowed = AllowedJobs::default();
        assert!(allowed.is_allowed("build"));
        assert!(allowed.is_allowed("anything-at_all"));
    }

    #[test]
    fn member_is_allowed() {
        let allowed = AllowedJobs::new(vec!["build".to_string(), "deploy".to_string()]);
        assert!(allowed.is_allowed("build"));
        assert!(allowed.is_allowed("deploy"));
    }

    #[test]
    fn non_member_is_denied() {
        let allowed = AllowedJobs::new(vec!["build".to_string()]);
        assert!(!allowed.is_allowed("deploy"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let allowed = AllowedJobs::new(vec!["build".to_string()]);
        assert!(!allowed.is_allowed("Build"));
    }

    #[test]
    fn resolve_without_override_uses_configured() {
        let configured = vec!["build".to_string()];
        assert_eq!(
            AllowedJobs::resolve(&configured, None),
            AllowedJobs::new(vec!["build".to_string()])
        );
    }

    #[test]
    fn resolve_override_replaces_configured() {
        let configured = vec!["build".to_string()];
        let resolved = AllowedJobs::resolve(&configured, Some(vec!["deploy".to_string()]));
        assert!(resolved.is_allowed("deploy"));
        assert!(!resolved.is_allowed("build"));
    }

    #[test]
    fn resolve_empty_override_unrestricts() {
        let configured = vec!["build".to_string()];
        let resolved = AllowedJobs::resolve(&configured, Some(vec![]));
        assert!(resolved.is_allowed("anything"));
    }
}
