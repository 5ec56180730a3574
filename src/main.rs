mod client;
mod error;
mod extract;
mod library;
mod markup;
mod pipeline;
mod search;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use client::DocsClient;
use search::{ResultType, SearchRequest};
use settings::Settings;

#[derive(Parser)]
#[command(name = "rvt_docs", about = "Search and extract Revit API documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search both documentation backends and print ranked results as JSON
    Search {
        /// `Name`, `Class.Member` or `Name(Arg, Arg)`
        query: String,
        /// API version year (default from RVTDOCS_DEFAULT_YEAR, else 2025)
        #[arg(short, long)]
        year: Option<u16>,
        /// Max results (1-50)
        #[arg(short = 'n', long, default_value = "10")]
        max: usize,
        /// Keep only these types; repeat for several
        #[arg(short = 't', long = "type", value_parser = parse_type)]
        types: Vec<ResultType>,
    },
    /// Extract one page as markdown
    Retrieve {
        /// Page slug, e.g. /2024/0530fbf2-...
        slug: String,
    },
    /// Search, then extract every hit; prints a JSON array
    RetrieveDocs {
        query: String,
        #[arg(short, long)]
        year: Option<u16>,
        #[arg(short = 'n', long, default_value = "10")]
        max: usize,
        #[arg(short = 't', long = "type", value_parser = parse_type)]
        types: Vec<ResultType>,
    },
    /// Extract a saved HTML page without touching the network
    Extract {
        file: PathBuf,
        /// URL reported in errors (default: the file path)
        #[arg(long)]
        url: Option<String>,
    },
    /// Semantic search over the companion library vector store
    Library {
        query: String,
        #[arg(short = 'n', long, default_value = "10")]
        max: usize,
        /// Minimum similarity score (0.0-1.0)
        #[arg(long)]
        score_threshold: Option<f32>,
        /// Send the query as typed instead of letting the store rewrite it
        #[arg(long)]
        no_rewrite: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let result = run(cli.command).await;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    // one line per failure, causes joined with ": "
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    let default_year = settings.default_year;

    match command {
        Commands::Search {
            query,
            year,
            max,
            types,
        } => {
            let client = DocsClient::new(settings)?;
            let request = SearchRequest::new(&query, year.unwrap_or(default_year), max, types)?;
            let results = search::search(&client, &request).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }
        Commands::Retrieve { slug } => {
            let client = DocsClient::new(settings)?;
            let url = client.settings.page_url(&slug);
            let doc = extract::retrieve(&client, &url).await?;
            println!("{}", doc.to_markdown());
            Ok(())
        }
        Commands::RetrieveDocs {
            query,
            year,
            max,
            types,
        } => {
            let client = DocsClient::new(settings)?;
            let request = SearchRequest::new(&query, year.unwrap_or(default_year), max, types)?;
            let docs = pipeline::retrieve_docs(&client, &request).await?;
            if docs.is_empty() {
                eprintln!("No documentation found for {:?}.", request.query);
            }
            println!("{}", serde_json::to_string_pretty(&docs)?);
            Ok(())
        }
        Commands::Extract { file, url } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let url = url.unwrap_or_else(|| file.display().to_string());
            let doc = extract::extract_html(&html, &url)?;
            println!("{}", doc.to_markdown());
            Ok(())
        }
        Commands::Library {
            query,
            max,
            score_threshold,
            no_rewrite,
        } => {
            let client = DocsClient::new(settings)?;
            let q = library::LibraryQuery::new(&query, max, score_threshold, !no_rewrite)?;
            let results = library::search(&client, &q).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }
    }
}

/// Case-insensitive vocabulary token for `--type`.
fn parse_type(s: &str) -> Result<ResultType, String> {
    ResultType::ALL
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| {
            let names: Vec<_> = ResultType::ALL.iter().map(|t| t.as_str()).collect();
            format!("unknown type {s:?}; expected one of {}", names.join(", "))
        })
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
