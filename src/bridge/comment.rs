//! Texts of the comments the bot posts to pull requests.

use itertools::Itertools;

use crate::bridge::command::AllowedJobs;
use crate::circleci::{BuildResult, TriggerBuildError};

pub fn help_comment(trigger_word: &str, allowed_jobs: &AllowedJobs) -> String {
    let mut text = format!(
        "You can use the following commands:
- `{trigger_word} trigger <job>`: Trigger a CI build of `<job>` for this pull request
- `{trigger_word} help`: Print this help message
"
    );
    if !allowed_jobs.is_empty() {
        text.push_str(&format!(
            "\nJobs allowed to be triggered: {}\n",
            format_job_list(allowed_jobs)
        ));
    }
    text
}

pub fn job_not_allowed_comment(job: &str, allowed_jobs: &AllowedJobs) -> String {
    format!(
        "Job `{job}` is not allowed to be triggered. Allowed jobs: {}",
        format_job_list(allowed_jobs)
    )
}

pub fn build_triggered_comment(build: &BuildResult) -> String {
    format!("Build triggered: {}", build.build_url)
}

pub fn trigger_failed_comment(error: &TriggerBuildError) -> String {
    format!("Failed to trigger a build: {error}")
}

fn format_job_list(allowed_jobs: &AllowedJobs) -> String {
    allowed_jobs
        .as_slice()
        .iter()
        .map(|job| format!("`{job}`"))
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{build_triggered_comment, help_comment, job_not_allowed_comment};
    use crate::bridge::command::AllowedJobs;
    use crate::circleci::BuildResult;

    #[test]
    fn help_without_allow_list() {
        insta::assert_snapshot!(help_comment("@ci-bot", &AllowedJobs::default()), @r"
        You can use the following commands:
        - `@ci-bot trigger <job>`: Trigger a CI build of `<job>` for this pull request
        - `@ci-bot help`: Print this help message
        ");
    }

    #[test]
    fn help_with_allow_list() {
        let allowed = AllowedJobs::new(vec!["build".to_string(), "deploy".to_string()]);
        insta::assert_snapshot!(help_comment("@ci-bot", &allowed), @r"
        You can use the following commands:
        - `@ci-bot trigger <job>`: Trigger a CI build of `<job>` for this pull request
        - `@ci-bot help`: Print this help message

        Jobs allowed to be triggered: `build`, `deploy`
        ");
    }

    #[test]
    fn job_not_allowed() {
        let allowed = AllowedJobs::new(vec!["build".to_string(), "deploy".to_string()]);
        assert_eq!(
            job_not_allowed_comment("test", &allowed),
            "Job `test` is not allowed to be triggered. Allowed jobs: `build`, `deploy`"
        );
    }

    #[test]
    fn build_triggered() {
        let build = BuildResult {
            build_url: "https://circleci.com/gh/foo/bar/42".to_string(),
        };
        assert_eq!(
            build_triggered_comment(&build),
            "Build triggered: https://circleci.com/gh/foo/bar/42"
        );
    }
}
