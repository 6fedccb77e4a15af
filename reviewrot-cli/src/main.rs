//! Reviewrot CLI - list pending review requests across platforms
//!
//! Polls the configured GitHub, GitLab and Gerrit instances for open review
//! requests and prints them in the requested style.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reviewrot_core::{has_new_comments, AgeFilter, Config, RenderOptions, Style};
use reviewrot_services::{GerritClient, GithubClient, GitlabClient, ReviewService};

/// List pending code review requests
#[derive(Parser, Debug)]
#[command(name = "reviewrot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ~/.config/reviewrot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output style: oneline, indented, json or irc
    #[arg(short, long, default_value = "oneline")]
    format: String,

    /// Keep reviews older or newer than the bound; ignored unless --value
    /// and --duration are also set
    #[arg(long, value_name = "older|newer")]
    state: Option<String>,

    /// Bound value; ignored unless --state and --duration are also set
    #[arg(long)]
    value: Option<u32>,

    /// Bound unit (y, m, d, h, min); ignored unless --state and --value are
    /// also set
    #[arg(long, value_name = "y|m|d|h|min")]
    duration: Option<String>,

    /// Keep only reviews commented on within the last DAYS days, and include
    /// comment bodies in JSON output
    #[arg(long, value_name = "DAYS")]
    show_last_comment: Option<i64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let style: Style = cli.format.parse()?;

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if config.is_empty() {
        anyhow::bail!("No platforms configured; nothing to poll");
    }

    let age = AgeFilter::from_parts(cli.state.as_deref(), cli.value, cli.duration.as_deref())?;
    if age.is_none() && (cli.state.is_some() || cli.value.is_some() || cli.duration.is_some()) {
        tracing::warn!(
            "Partial age bound ignored; --state, --value and --duration must all be set"
        );
    }

    let mut services: Vec<Box<dyn ReviewService>> = Vec::new();
    if let Some(github) = &config.github {
        services.push(Box::new(GithubClient::new(github)));
    }
    if let Some(gitlab) = &config.gitlab {
        services.push(Box::new(GitlabClient::new(gitlab)));
    }
    if let Some(gerrit) = &config.gerrit {
        services.push(Box::new(GerritClient::new(gerrit)));
    }

    let mut records = Vec::new();
    for service in &services {
        if cli.verbose {
            tracing::info!(service = service.name(), "Requesting reviews");
        }
        let fetched = service.request_reviews(age.as_ref()).await?;
        tracing::debug!(
            service = service.name(),
            count = fetched.len(),
            "Fetched reviews"
        );
        records.extend(fetched);
    }

    if let Some(days) = cli.show_last_comment {
        records.retain(|record| {
            has_new_comments(
                record.last_comment.as_ref().map(|c| c.created_at),
                Some(days),
            )
        });
    }

    let total = records.len();
    let show_body = cli.show_last_comment.is_some();

    if style == Style::Json {
        // The JSON style emits one object per record with the separating
        // comma baked in, so the array brackets are all that's left to add.
        println!("[");
        for (index, record) in records.iter().enumerate() {
            let opts = RenderOptions::new()
                .with_position(index, total)
                .with_comment_body(show_body);
            println!("{}", record.render(style, &opts)?);
        }
        println!("]");
    } else {
        let opts = RenderOptions::new();
        for record in &records {
            println!("{}", record.render(style, &opts)?);
        }
    }

    Ok(())
}
