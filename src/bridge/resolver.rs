//! Turns a webhook event into a [`Command`], fetching the pull request from
//! the API when the event does not carry it.

use crate::bridge::command::{Command, CommandParser, CommentCommand, HelpCommand, TriggerCommand};
use crate::bridge::event::{IssueCommentEvent, PullRequestEvent, TargetEvent, WebhookEvent};
use crate::bridge::PullRequestApi;

pub async fn resolve_command<Gh: PullRequestApi>(
    github: &Gh,
    parser: &CommandParser,
    event: &WebhookEvent,
) -> anyhow::Result<Command> {
    match event.target() {
        Some(TargetEvent::PullRequestOpened(event)) => Ok(resolve_pull_request_event(parser, event)),
        Some(TargetEvent::IssueCommentCreated(event)) => {
            resolve_issue_comment_event(github, parser, event).await
        }
        None => Ok(Command::Noop),
    }
}

/// A freshly opened pull request carries its own identity, so its body is
/// parsed without any API call.
fn resolve_pull_request_event(parser: &CommandParser, event: &PullRequestEvent) -> Command {
    let body = event.pull_request.body.as_deref().unwrap_or_default();
    match parser.parse_comment(body) {
        Some(CommentCommand::Trigger { job }) => Command::Trigger(TriggerCommand {
            repository: event.repository.clone(),
            branch: event.pull_request.head.name.clone(),
            pull_request: event.pull_request.clone(),
            job,
        }),
        Some(CommentCommand::Help) => Command::Help(HelpCommand {
            pull_request: event.pull_request.clone(),
        }),
        None => Command::Noop,
    }
}

async fn resolve_issue_comment_event<Gh: PullRequestApi>(
    github: &Gh,
    parser: &CommandParser,
    event: &IssueCommentEvent,
) -> anyhow::Result<Command> {
    // Parse before fetching, so that unrelated comments never cost an API
    // call.
    let Some(command) = parser.parse_comment(&event.comment_text) else {
        return Ok(Command::Noop);
    };
    // A command on a plain issue has no pull request to act on.
    let Some(url) = event.pull_request_url.as_deref() else {
        return Ok(Command::Noop);
    };

    let pull_request = github.fetch_pull_request(url).await?;
    Ok(match command {
        CommentCommand::Trigger { job } => Command::Trigger(TriggerCommand {
            repository: event.repository.clone(),
            branch: pull_request.head.name.clone(),
            pull_request,
            job,
        }),
        CommentCommand::Help => Command::Help(HelpCommand { pull_request }),
    })
}

#[cfg(test)]
mod tests {
    use super::resolve_command;
    use crate::bridge::command::{Command, CommandParser};
    use crate::bridge::event::{IssueCommentEvent, WebhookEvent};
    use crate::tests::mocks::{
        default_repo_name, issue_comment_created, pull_request_event, pull_request_opened,
        TestGithub,
    };

    #[tokio::test]
    async fn pull_request_trigger() {
        let github = TestGithub::default();
        let command = resolve(&github, pull_request_opened("@ci-bot trigger build"))
            .await
            .unwrap();
        let Command::Trigger(command) = command else {
            panic!("expected a trigger command, got {command:?}");
        };
        assert_eq!(command.job, "build");
        assert_eq!(command.branch, "feature");
        assert_eq!(command.repository, default_repo_name());
        // The event carried the pull request, no fetch was needed.
        assert!(github.fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pull_request_help() {
        let github = TestGithub::default();
        let command = resolve(&github, pull_request_opened("@ci-bot help"))
            .await
            .unwrap();
        assert!(matches!(command, Command::Help(_)));
    }

    #[tokio::test]
    async fn pull_request_unrelated_body() {
        let github = TestGithub::default();
        let command = resolve(&github, pull_request_opened("Fixes #123"))
            .await
            .unwrap();
        assert_eq!(command, Command::Noop);
    }

    #[tokio::test]
    async fn pull_request_wrong_action() {
        let github = TestGithub::default();
        let command = resolve(&github, pull_request_event("closed", "@ci-bot trigger build"))
            .await
            .unwrap();
        assert_eq!(command, Command::Noop);
        assert!(github.fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_trigger_fetches_pull_request() {
        let github = TestGithub::default();
        let command = resolve(&github, issue_comment_created("@ci-bot trigger build"))
            .await
            .unwrap();
        let Command::Trigger(command) = command else {
            panic!("expected a trigger command, got {command:?}");
        };
        assert_eq!(command.job, "build");
        // The branch comes from the fetched pull request.
        assert_eq!(command.branch, "feature");
        assert_eq!(
            github.fetches.lock().unwrap().as_slice(),
            ["https://api.github.com/repos/foo/bar/pulls/1"]
        );
    }

    #[tokio::test]
    async fn comment_without_command_skips_fetch() {
        let github = TestGithub::default();
        let command = resolve(&github, issue_comment_created("Looks good to me!"))
            .await
            .unwrap();
        assert_eq!(command, Command::Noop);
        assert!(github.fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_on_plain_issue() {
        let github = TestGithub::default();
        let event = WebhookEvent::IssueComment(IssueCommentEvent {
            action: "created".to_string(),
            repository: default_repo_name(),
            comment_text: "@ci-bot trigger build".to_string(),
            pull_request_url: None,
        });
        let command = resolve(&github, event).await.unwrap();
        assert_eq!(command, Command::Noop);
        assert!(github.fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_fetch_failure_propagates() {
        let github = TestGithub {
            fetch_fails: true,
            ..Default::default()
        };
        let result = resolve(&github, issue_comment_created("@ci-bot trigger build")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn other_event() {
        let github = TestGithub::default();
        let command = resolve(&github, WebhookEvent::Other).await.unwrap();
        assert_eq!(command, Command::Noop);
    }

    async fn resolve(github: &TestGithub, event: WebhookEvent) -> anyhow::Result<Command> {
        let parser = CommandParser::new("@ci-bot".to_string());
        resolve_command(github, &parser, &event).await
    }
}
