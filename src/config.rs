use secrecy::SecretString;

/// Process-wide configuration of the bot, loaded once at startup and
/// read-only afterwards.
pub struct Config {
    /// Token used to talk to the GitHub API.
    pub github_access_token: SecretString,
    /// Token used to trigger CircleCI builds.
    pub circle_api_token: SecretString,
    /// Word that a comment line must start with to be recognized as a command.
    pub trigger_word: String,
    /// Jobs that are allowed to be triggered. Empty means unrestricted.
    pub allowed_jobs: Vec<String>,
}

/// Parses a comma-separated job list, as found in the `ALLOWED_JOBS`
/// environment variable and the `allowed_jobs` query parameter.
pub fn parse_job_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|job| !job.is_empty())
        .map(str::to_string)
        .collect()
}
