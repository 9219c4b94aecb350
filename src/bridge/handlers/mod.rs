use crate::bridge::command::{AllowedJobs, Command};
use crate::bridge::event::WebhookEvent;
use crate::bridge::handlers::help::command_help;
use crate::bridge::handlers::trigger::command_trigger;
use crate::bridge::resolver::resolve_command;
use crate::bridge::{BridgeContext, BuildTrigger, PullRequestApi};

mod help;
mod trigger;

/// Executes a single webhook event: resolves it into a command and drives the
/// remote calls the command requires. Returns the outcome string reported to
/// the caller; an error is returned only for failures the request must
/// surface (pull-request fetch, build trigger).
pub async fn handle_webhook_event<Gh: PullRequestApi, Ci: BuildTrigger>(
    ctx: &BridgeContext<Gh, Ci>,
    event: WebhookEvent,
    allowed_jobs: AllowedJobs,
) -> anyhow::Result<String> {
    match resolve_command(&ctx.github, &ctx.parser, &event).await? {
        Command::Trigger(command) => command_trigger(ctx, command, &allowed_jobs).await,
        Command::Help(command) => command_help(ctx, command, &allowed_jobs).await,
        Command::Noop => Ok("NOOP".to_string()),
    }
}
