//! CLI administration tool for snaplink.
//!
//! Provides commands for managing accounts and links, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- user create --email admin@example.com
//!
//! # Shorten a URL, optionally with a custom code
//! cargo run --bin admin -- link create https://example.com --code promo
//!
//! # List and delete links
//! cargo run --bin admin -- link list
//! cargo run --bin admin -- link delete 42
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`snaplink::config`]. `STORAGE` must be `postgres`.

use snaplink::application::services::{AuthService, LinkService, StatsService};
use snaplink::config::{self, Config, StorageBackend};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::Repositories;

use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
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
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        url: String,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List the newest links
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Delete a link regardless of its owner
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE=postgres");
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &config, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn repositories(pool: &PgPool) -> Repositories {
    Repositories::postgres(Arc::new(pool.clone()))
}

async fn handle_user_action(action: UserAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repos = repositories(pool);
    let auth = AuthService::new(
        repos.users,
        repos.sessions,
        config.session_signing_secret.clone(),
        TimeDelta::hours(config.session_ttl_hours),
    );

    match action {
        UserAction::Create { email, name } => create_user(&auth, email, name).await,
    }
}

/// Creates an account with interactive prompts for missing fields.
async fn create_user(auth: &AuthService, email: Option<String>, name: Option<String>) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.len() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    let user = auth
        .register(&email, &name, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Email: {}", user.email.cyan());
    println!();

    Ok(())
}

async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repos = repositories(pool);
    let links = LinkService::new(
        repos.links.clone(),
        config.base_url.clone(),
        config.attribute_links,
    );

    match action {
        LinkAction::Create { url, code } => {
            let link = links
                .create_link(&url, code.as_deref(), None)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!("  Short URL: {}", links.short_url(&link.short_code).bright_yellow());
            println!("  Target:    {}", link.original_url.cyan());
        }
        LinkAction::List { limit } => list_links(&links, limit).await?,
        LinkAction::Delete { id, yes } => {
            let link = links
                .get_link(id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("  Code:   {}", link.short_code.cyan());
            println!("  Target: {}", link.original_url);
            println!("  Clicks: {}", link.click_count);
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link and its clicks?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            repos
                .links
                .delete(id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

            println!("{}", "✅ Link deleted".green().bold());
        }
    }

    Ok(())
}

/// Lists the newest links.
///
/// # Output Format
///
/// ```text
///   ID    Code         Clicks  Created           Target
///   1     promo        12      2025-01-15 10:30  https://example.com
/// ```
async fn list_links(links: &LinkService, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let (items, total) = links
        .list_links(None, 0, limit.max(1))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if items.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<7} {:<17} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &items {
        println!(
            "  {:<5} {:<12} {:<7} {:<17} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.click_count,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        items.len(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays the dashboard totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repos = repositories(pool);
    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let dashboard = StatsService::new(repos.links, repos.clicks)
        .dashboard()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:            {}",
        dashboard.total_links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:           {}",
        dashboard.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Clicks per link:  {}",
        format!("{:.2}", dashboard.average_clicks_per_link)
            .bright_green()
            .bold()
    );
    println!(
        "  Countries:        {}",
        dashboard.distinct_countries.to_string().bright_green().bold()
    );
    println!(
        "  Accounts:         {}",
        users_count.to_string().bright_green().bold()
    );

    if !dashboard.countries.is_empty() {
        println!();
        println!("{}", "  Top countries".bright_white().bold());
        for entry in &dashboard.countries {
            println!("    {:<12} {}", entry.label.cyan(), entry.clicks);
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
