use crate::github::{GithubRepoName, PullRequestEntity};

/// A single inbound webhook event, constructed once per request.
#[derive(Debug)]
pub enum WebhookEvent {
    /// Something happened to a pull request (opened, closed, ...).
    PullRequest(PullRequestEvent),
    /// A comment was posted on an issue or a pull request.
    IssueComment(IssueCommentEvent),
    /// Any other event kind; never acted upon.
    Other,
}

#[derive(Debug)]
pub struct PullRequestEvent {
    pub action: String,
    pub repository: GithubRepoName,
    pub pull_request: PullRequestEntity,
}

#[derive(Debug)]
pub struct IssueCommentEvent {
    pub action: String,
    pub repository: GithubRepoName,
    pub comment_text: String,
    /// API URL of the pull request the comment belongs to.
    /// Missing when the comment was posted on a plain issue.
    pub pull_request_url: Option<String>,
}

/// An event the bot reacts to. Everything else resolves to a no-op.
#[derive(Debug)]
pub enum TargetEvent<'a> {
    PullRequestOpened(&'a PullRequestEvent),
    IssueCommentCreated(&'a IssueCommentEvent),
}

impl WebhookEvent {
    /// Classifies the event. Only freshly opened pull requests and freshly
    /// created comments are targetable.
    pub fn target(&self) -> Option<TargetEvent<'_>> {
        match self {
            WebhookEvent::PullRequest(event) if event.action == "opened" => {
                Some(TargetEvent::PullRequestOpened(event))
            }
            WebhookEvent::IssueComment(event) if event.action == "created" => {
                Some(TargetEvent::IssueCommentCreated(event))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TargetEvent;
    use crate::tests::mocks::{issue_comment_created, pull_request_event, pull_request_opened};

    #[test]
    fn pull_request_opened_is_targetable() {
        let event = pull_request_opened("");
        assert!(matches!(
            event.target(),
            Some(TargetEvent::PullRequestOpened(_))
        ));
    }

    #[test]
    fn pull_request_other_action_is_not_targetable() {
        for action in ["closed", "synchronize", "edited", "reopened"] {
            let event = pull_request_event(action, "");
            assert!(event.target().is_none(), "action {action} was targetable");
        }
    }

    #[test]
    fn issue_comment_created_is_targetable() {
        let event = issue_comment_created("hello");
        assert!(matches!(
            event.target(),
            Some(TargetEvent::IssueCommentCreated(_))
        ));
    }

    #[test]
    fn other_event_is_not_targetable() {
        assert!(super::WebhookEvent::Other.target().is_none());
    }
}
