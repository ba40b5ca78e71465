//! CLI administration tool for short-url.
//!
//! Provides commands for managing short links and inspecting the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a new short link (prompts for the URL if omitted)
//! cargo run --bin admin -- url create https://example.com
//!
//! # List all links, newest first
//! cargo run --bin admin -- url list
//!
//! # Show the mapping behind a short code
//! cargo run --bin admin -- url show aB3xY9
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply schema
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use short_url::application::services::LinkService;
use short_url::config;
use short_url::domain::repositories::UrlRepository;
use short_url::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;

/// CLI tool for managing short-url.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short link subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Register a new short link
    Create {
        /// Original URL (prompted for if omitted)
        original_url: Option<String>,
    },

    /// List all short links
    List,

    /// Show the mapping for a short code
    Show {
        /// Short code to look up
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the schema if it does not exist
    Migrate,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;

    let repo = PgUrlRepository::connect(&config)
        .await
        .context("Failed to connect to database")?;
    let repo = Arc::new(repo);

    match cli.command {
        Commands::Url { action } => handle_url_action(action, repo).await?,
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_url_action(action: UrlAction, repo: Arc<PgUrlRepository>) -> Result<()> {
    match action {
        UrlAction::Create { original_url } => create_url(repo, original_url).await?,
        UrlAction::List => list_urls(repo).await?,
        UrlAction::Show { code } => show_url(repo, code).await?,
    }

    Ok(())
}

/// Registers a short link through the same service the HTTP API uses.
async fn create_url(repo: Arc<PgUrlRepository>, original_url: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let original_url = match original_url {
        Some(url) => url,
        None => Input::new()
            .with_prompt("Original URL")
            .interact_text()?,
    };

    let service = LinkService::new(repo);
    let mapping = service
        .register(Some(original_url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Code: {}", mapping.short_code.bright_yellow().bold());
    println!("  URL:  {}", mapping.original_url.cyan());
    println!("  ID:   {}", mapping.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Lists all short links.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   ID  Code    Created            URL
///   ────────────────────────────────────────────────────────────────
///   2   aB3xY9  2024-01-16 14:20   https://example.com/b
///   1   Zz0Zz0  2024-01-15 10:30   https://example.com/a
/// ```
async fn list_urls(repo: Arc<PgUrlRepository>) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let mappings = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin url create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<10} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<5} {:<10} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.short_code.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows the mapping behind a short code, read straight from the database.
async fn show_url(repo: Arc<PgUrlRepository>, code: String) -> Result<()> {
    let mapping = repo
        .find_by_code(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short code not found")?;

    println!("  Code:    {}", mapping.short_code.bright_yellow().bold());
    println!("  URL:     {}", mapping.original_url.cyan());
    println!("  ID:      {}", mapping.id.to_string().bright_black());
    println!(
        "  Created: {}",
        mapping.created_at.to_rfc3339().bright_black()
    );

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(repo: &PgUrlRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(repo.pool())
        .await?;

    let newest: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM urls")
            .fetch_one(repo.pool())
            .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    if let Some(newest) = newest {
        println!(
            "  Newest: {}",
            newest.format("%Y-%m-%d %H:%M").to_string().bright_green()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &PgUrlRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying schema...".bright_blue());

            repo.ensure_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

            println!("{}", "✅ Schema up to date".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(repo.pool())
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
