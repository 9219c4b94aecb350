use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;

use circle_trigger::bridge::{BridgeContext, CommandParser};
use circle_trigger::circleci::CircleCiClient;
use circle_trigger::config::{parse_job_list, Config};
use circle_trigger::github::api::GithubClient;
use circle_trigger::github::server::{create_app, ServerState};
use circle_trigger::github::WebhookSecret;

#[derive(clap::Parser)]
struct Opts {
    /// Access token used to talk to the GitHub API.
    #[arg(long, env = "GITHUB_ACCESS_TOKEN")]
    github_access_token: String,

    /// API token used to trigger CircleCI builds.
    #[arg(long, env = "CIRCLE_API_TOKEN")]
    circle_api_token: String,

    /// Word that a comment line must start with to be recognized as a command.
    #[arg(long, env = "TRIGGER_WORD")]
    trigger_word: String,

    /// Comma-separated list of jobs that are allowed to be triggered.
    /// When empty, every job is allowed.
    #[arg(long, env = "ALLOWED_JOBS")]
    allowed_jobs: Option<String>,

    /// Secret used to authenticate webhooks.
    #[arg(long, env = "WEBHOOK_SECRET")]
    webhook_secret: Option<String>,

    /// Port on which the server listens.
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,
}

async fn server(state: ServerState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot listen on {addr}"))?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let config = Config {
        github_access_token: SecretString::new(opts.github_access_token),
        circle_api_token: SecretString::new(opts.circle_api_token),
        trigger_word: opts.trigger_word,
        allowed_jobs: opts
            .allowed_jobs
            .as_deref()
            .map(parse_job_list)
            .unwrap_or_default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    let github = GithubClient::new(&config.github_access_token)?;
    let circleci = CircleCiClient::new(config.circle_api_token.clone());
    let parser = CommandParser::new(config.trigger_word.clone());
    let ctx = BridgeContext::new(parser, github, circleci, config.allowed_jobs.clone());
    let state = ServerState::new(ctx, opts.webhook_secret.map(WebhookSecret::new));

    runtime.block_on(server(state, opts.port))
}

fn main() {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
