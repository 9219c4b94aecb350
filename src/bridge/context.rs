use crate::bridge::command::CommandParser;

/// State threaded through the webhook pipeline: the comment parser, the two
/// remote collaborators and the configured allow-list. Constructed once at
/// startup, shared read-only between requests.
pub struct BridgeContext<Gh, Ci> {
    pub parser: CommandParser,
    pub github: Gh,
    pub circleci: Ci,
    pub allowed_jobs: Vec<String>,
}

impl<Gh, Ci> BridgeContext<Gh, Ci> {
    pub fn new(parser: CommandParser, github: Gh, circleci: Ci, allowed_jobs: Vec<String>) -> Self {
        Self {
            parser,
            github,
            circleci,
            allowed_jobs,
        }
    }
}
