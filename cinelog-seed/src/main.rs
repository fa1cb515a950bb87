//! One-shot catalog seeder.
//!
//! Pulls the most popular movies and TV series from TMDB discover,
//! wipes the existing catalog, and batch-inserts the replacement rows.
//! A failed page fetch aborts the run; a failed insert batch is logged
//! and skipped so the remaining batches still land.
#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinelog_core::database::PostgresDatabase;
use cinelog_core::database::ports::TitlesRepository;
use cinelog_core::ingest::{INSERT_BATCH_SIZE, titles_from_movies, titles_from_tv};
use cinelog_core::providers::TmdbClient;
use cinelog_core::providers::tmdb::{DiscoverMovieItem, DiscoverTvItem};
use cinelog_model::{NewTitle, TitleKind};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinelog-seed")]
#[command(about = "Seed the Cinelog catalog from TMDB discover")]
struct Cli {
    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Discover pages to fetch per kind
    #[arg(long, env = "SEED_PAGES", default_value_t = 50)]
    pages: u32,

    /// Minimum TMDB vote count per item
    #[arg(long, env = "SEED_MIN_VOTES", default_value_t = 500)]
    min_votes: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let tmdb = TmdbClient::new(&cli.tmdb_api_key);

    let db = PostgresDatabase::new(&cli.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    db.initialize_schema()
        .await
        .context("database migration failed")?;

    info!("Fetching popular movies and shows from TMDB...");

    // Page requests run one at a time; any failed page is fatal to the
    // whole run.
    let mut movie_items: Vec<DiscoverMovieItem> = Vec::new();
    for page in 1..=cli.pages {
        info!("Fetching movie page {page}...");
        let fetched = tmdb
            .discover_popular_movies(page, cli.min_votes)
            .await
            .with_context(|| format!("failed to fetch movie page {page}"))?;
        movie_items.extend(fetched.results);
    }

    let mut tv_items: Vec<DiscoverTvItem> = Vec::new();
    for page in 1..=cli.pages {
        info!("Fetching shows page {page}...");
        let fetched = tmdb
            .discover_popular_tv(page, cli.min_votes)
            .await
            .with_context(|| format!("failed to fetch shows page {page}"))?;
        tv_items.extend(fetched.results);
    }

    info!(
        movies = movie_items.len(),
        shows = tv_items.len(),
        "Fetched catalog items, inserting into database..."
    );

    let mut rows: Vec<NewTitle> = titles_from_movies(movie_items);
    rows.extend(titles_from_tv(tv_items));

    info!("Clearing existing movies and shows...");
    let removed = db
        .titles()
        .delete_kinds(&[TitleKind::Movie, TitleKind::Tv])
        .await
        .context("failed to clear existing catalog")?;
    info!(removed, "existing catalog rows removed");

    // Batch inserts tolerate partial failure: a bad batch is logged and
    // skipped, the rest still land.
    let mut inserted = 0u64;
    let mut failed_batches = 0u32;
    for (index, batch) in rows.chunks(INSERT_BATCH_SIZE).enumerate() {
        let batch_number = index + 1;
        match db.titles().insert_batch(batch).await {
            Ok(count) => {
                inserted += count;
                info!("Inserted batch {batch_number} ({count} records)");
            }
            Err(e) => {
                failed_batches += 1;
                error!(error = %e, "Error inserting batch {batch_number}");
            }
        }
    }

    info!(
        inserted,
        failed_batches,
        total_rows = rows.len(),
        "Seeding completed"
    );

    Ok(())
}
