use crate::bridge::command::{AllowedJobs, HelpCommand};
use crate::bridge::comment::help_comment;
use crate::bridge::{BridgeContext, BuildTrigger, PullRequestApi};

pub(super) async fn command_help<Gh: PullRequestApi, Ci: BuildTrigger>(
    ctx: &BridgeContext<Gh, Ci>,
    command: HelpCommand,
    allowed_jobs: &AllowedJobs,
) -> anyhow::Result<String> {
    let text = help_comment(ctx.parser.trigger_word(), allowed_jobs);
    // Best effort, the help text is also discoverable elsewhere.
    if let Err(error) = ctx.github.post_comment(&command.pull_request, &text).await {
        tracing::warn!("Cannot post help comment: {error:?}");
    }
    Ok("Help".to_string())
}
