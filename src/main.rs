//! release-mail - build and query message indexes of a correspondence release

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use release_mail_extract::{
    ExtractConfig, Folder, ListQuery, MailStore, Paging, SortOrder, SourcePaths, build_snapshot,
    load_corpus,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "release-mail", version, about = "Extract and query released correspondence")]
struct Cli {
    /// Block-stream JSON source, preferred over the snapshot when present
    #[arg(long, global = true, env = "BLOCKS_JSON_PATH")]
    blocks: Option<PathBuf>,

    /// Snapshot written by `build`
    #[arg(long, global = true, env = "SNAPSHOT_PATH", default_value = "data/emails-index.json")]
    snapshot: PathBuf,

    /// Markup release read by `build`
    #[arg(long, global = true, env = "MARKUP_PATH")]
    markup: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the markup release and write the snapshot
    Build,
    #[command(flatten)]
    Query(QueryCommand),
}

#[derive(Subcommand)]
enum QueryCommand {
    /// Show message and contact counts
    Stats,
    /// List messages
    List {
        /// inbox or sent
        #[arg(long, default_value = "inbox")]
        folder: Folder,
        /// Only messages whose from/to contains this text
        #[arg(long)]
        person: Option<String>,
        /// date, date_asc or subject
        #[arg(long, default_value = "date")]
        sort: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(short = 'n', long, default_value_t = release_mail_extract::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Full-text substring search
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(short = 'n', long, default_value_t = release_mail_extract::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Print one message by document number
    Show { id: String },
    /// List contacts ranked by frequency
    People {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Per-day message counts for a year
    Activity { year: i32 },
    /// Messages sent on a YYYY-MM-DD day
    Day {
        date: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(short = 'n', long, default_value_t = release_mail_extract::DEFAULT_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = ExtractConfig::default();
    let paths = SourcePaths {
        blocks: cli.blocks,
        snapshot: Some(cli.snapshot),
        markup: cli.markup,
    };

    match cli.command {
        Commands::Build => build(&paths, &config)?,
        Commands::Query(command) => {
            let store = MailStore::new(load_corpus(&paths, &config));
            query(&store, command)?;
        }
    }

    info!("Done in {:.1?}", t0.elapsed());
    Ok(())
}

fn build(paths: &SourcePaths, config: &ExtractConfig) -> Result<()> {
    let markup = paths
        .markup
        .as_deref()
        .context("--markup (or MARKUP_PATH) is required for build")?;
    let snapshot = paths.snapshot.as_deref().context("snapshot path missing")?;

    let corpus = build_snapshot(markup, snapshot, config)
        .with_context(|| format!("building snapshot from {}", markup.display()))?;
    println!(
        "Wrote {} emails, {} people to {}",
        corpus.messages.len(),
        corpus.contacts.len(),
        snapshot.display()
    );
    Ok(())
}

fn query(store: &MailStore, command: QueryCommand) -> Result<()> {
    match command {
        QueryCommand::Stats => {
            let corpus = store.corpus();
            let sent = corpus.messages.iter().filter(|m| m.is_sent).count();
            println!(
                "{} emails ({} sent), {} people",
                corpus.messages.len(),
                sent,
                corpus.contacts.len()
            );
        }
        QueryCommand::List {
            folder,
            person,
            sort,
            page,
            limit,
        } => print_json(&store.list(&ListQuery {
            folder,
            person,
            sort,
            paging: Paging::new(page, limit),
        }))?,
        QueryCommand::Search { query, page, limit } => {
            print_json(&store.search(&query, Paging::new(page, limit)))?;
        }
        QueryCommand::Show { id } => {
            let message = store
                .get(&id)
                .with_context(|| format!("no message with id {id}"))?;
            print_json(message)?;
        }
        QueryCommand::People { filter } => print_json(&store.contacts(filter.as_deref()))?,
        QueryCommand::Activity { year } => print_json(&store.activity(year)?)?,
        QueryCommand::Day { date, page, limit } => {
            print_json(&store.by_date(&date, Paging::new(page, limit))?)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
