use anyhow::Context;

use crate::bridge::command::{AllowedJobs, TriggerCommand};
use crate::bridge::comment::{
    build_triggered_comment, job_not_allowed_comment, trigger_failed_comment,
};
use crate::bridge::{BridgeContext, BuildTrigger, PullRequestApi};

pub(super) async fn command_trigger<Gh: PullRequestApi, Ci: BuildTrigger>(
    ctx: &BridgeContext<Gh, Ci>,
    command: TriggerCommand,
    allowed_jobs: &AllowedJobs,
) -> anyhow::Result<String> {
    if !allowed_jobs.is_allowed(&command.job) {
        let text = job_not_allowed_comment(&command.job, allowed_jobs);
        if let Err(error) = ctx.github.post_comment(&command.pull_request, &text).await {
            tracing::warn!("Cannot post job-not-allowed comment: {error:?}");
        }
        return Ok(format!("Not allowed: {}", command.job));
    }

    let build = match ctx
        .circleci
        .trigger_build(&command.repository, &command.branch, &command.job)
        .await
    {
        Ok(build) => build,
        Err(error) => {
            // The comment is best effort, the trigger failure is what the
            // request reports.
            let text = trigger_failed_comment(&error);
            if let Err(comment_error) =
                ctx.github.post_comment(&command.pull_request, &text).await
            {
                tracing::warn!("Cannot post trigger-failure comment: {comment_error:?}");
            }
            return Err(error).with_context(|| {
                format!(
                    "Cannot trigger job {} on {}",
                    command.job, command.repository
                )
            });
        }
    };

    let text = build_triggered_comment(&build);
    if let Err(error) = ctx.github.post_comment(&command.pull_request, &text).await {
        tracing::warn!("Cannot post build notification comment: {error:?}");
    }

    Ok(format!(
        "Trigger: {}, Branch: {}",
        command.job, command.branch
    ))
}
