//! Repository Explorer - flatten a GitHub repository into one text dump
//!
//! # Usage
//! ```bash
//! repo-explorer                                   # Start server on 127.0.0.1:8000
//! repo-explorer --port 9000 --github-token $TOKEN # Custom port, authenticated
//! repo-explorer fetch https://github.com/o/r      # One-shot fetch to stdout
//! repo-explorer fetch https://github.com/o/r --filter-mode whitelist --filter-extensions rs,toml
//! ```

mod error;
mod github;
mod models;
mod routes;
mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github::{FetchConfig, FileErrorPolicy, GithubClient};
use models::RepositoryReference;
use snapshot::{build_snapshot, FilterSpec};

/// Repository Explorer - dump a repository's files and directory tree
#[derive(Parser)]
#[command(name = "repo-explorer")]
#[command(about = "Flatten a GitHub repository into a text dump and directory tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a repository once and print the result
    Fetch {
        /// Repository URL, e.g. https://github.com/owner/repo
        #[arg(value_name = "REPO_URL")]
        repo_url: String,

        /// whitelist or blacklist
        #[arg(long)]
        filter_mode: Option<String>,

        /// Comma-separated extensions, e.g. "rs, toml"
        #[arg(long)]
        filter_extensions: Option<String>,

        /// Which part of the result to print
        #[arg(long, value_enum, default_value_t = Show::All)]
        show: Show,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Show {
    Tree,
    Contents,
    All,
}

#[derive(Args)]
struct FetchArgs {
    /// Token sent as a bearer credential to the contents API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Root of the contents API
    #[arg(long, env = "GITHUB_API_ROOT", default_value = github::client::DEFAULT_API_ROOT)]
    api_root: String,

    /// Maximum concurrent requests per directory
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Maximum outbound requests in flight for one fetch
    #[arg(long, default_value = "32")]
    max_in_flight: usize,

    /// Timeout for each outbound HTTP call, in seconds
    #[arg(long, default_value = "30")]
    http_timeout_secs: u64,

    /// Deadline for fetching a whole repository, in seconds
    #[arg(long, default_value = "300")]
    request_timeout_secs: u64,

    /// Abort the fetch when any single file cannot be downloaded
    #[arg(long)]
    fail_on_unreadable_file: bool,
}

impl FetchArgs {
    fn into_config(self) -> FetchConfig {
        FetchConfig {
            api_root: self.api_root,
            token: self.github_token,
            concurrency: self.concurrency.max(1),
            max_in_flight: self.max_in_flight.max(1),
            http_timeout: Duration::from_secs(self.http_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            file_errors: if self.fail_on_unreadable_file {
                FileErrorPolicy::FailFast
            } else {
                FileErrorPolicy::Skip
            },
        }
    }
}

async fn handle_fetch(
    client: &GithubClient,
    repo_url: &str,
    filter_mode: Option<&str>,
    filter_extensions: Option<&str>,
    show: Show,
) -> anyhow::Result<()> {
    let reference = RepositoryReference::parse(repo_url)?;
    let filter = FilterSpec::parse(filter_mode, filter_extensions)?;

    let files = client.fetch_repository(&reference).await?;
    let snapshot = build_snapshot(files, filter.as_ref())?;

    if show != Show::Contents {
        println!("{}", snapshot.directory_structure);
        println!();
    }
    if show != Show::Tree {
        print!("{}", snapshot.repo_contents);
    }

    if let Some(estimates) = snapshot.token_estimates {
        eprintln!("  Estimated tokens:");
        eprintln!("    Directory: {}", estimates.directory_tokens);
        eprintln!("    Contents:  {}", estimates.content_tokens);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = GithubClient::new(cli.fetch.into_config())?;

    if let Some(Commands::Fetch {
        repo_url,
        filter_mode,
        filter_extensions,
        show,
    }) = cli.command
    {
        if let Err(e) = handle_fetch(
            &client,
            &repo_url,
            filter_mode.as_deref(),
            filter_extensions.as_deref(),
            show,
        )
        .await
        {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    if client.config().token.is_none() {
        tracing::warn!("No GITHUB_TOKEN set, requests are subject to anonymous rate limits");
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(Arc::new(client)))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Repository Explorer");
    println!("  Server:   http://{}", addr);
    println!("  Endpoint: POST /fetchRepo");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
