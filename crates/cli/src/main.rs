//! searchkit command-line entry point.
//!
//! Results go to stdout; logs and usage go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use searchkit_client::{SerpClient, SerpConfig, WebSearchClient, WebSearchConfig};
use searchkit_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "searchkit", version, about = "Query web search APIs from the terminal")]
struct Cli {
    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask an LLM that can search the web.
    Web {
        query: String,

        /// Model identifier.
        #[arg(long)]
        model: Option<String>,

        /// Maximum number of source URLs to list.
        #[arg(long)]
        max_results: Option<usize>,

        /// Append source URLs to the answer.
        #[arg(long)]
        urls: bool,
    },
    /// Fetch organic Google results through SerpAPI.
    Serp {
        query: String,

        /// Number of results.
        #[arg(long)]
        num: Option<usize>,
    },
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!(model = %config.model, timeout_ms = config.timeout_ms, "configuration loaded");

    match cli.command {
        Command::Web { query, model, max_results, urls } => {
            let mut web_config = WebSearchConfig::from_app_config(&config)?;
            if let Some(model) = model {
                web_config.model = model;
            }
            if let Some(max_results) = max_results {
                web_config.max_results = max_results;
            }
            web_config.url_included |= urls;

            tracing::info!(model = %web_config.model, url_included = web_config.url_included, "running web search");
            let client = WebSearchClient::new(web_config)?;
            let (text, usage) = client.search(&query).await?;

            println!("{text}");
            eprintln!(
                "usage: prompt={} completion={} cached={}",
                usage.prompt_tokens, usage.completion_tokens, usage.cached_prompt_tokens
            );
        }
        Command::Serp { query, num } => {
            let num = num.unwrap_or(config.num_results);
            tracing::info!(num, "running SerpAPI search");
            let client = SerpClient::new(SerpConfig::from_app_config(&config)?)?;
            let results = client.search(&query, num).await?;

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
