//! CLI administration tool for relay-dashboard.
//!
//! Provides commands for managing users, premium entitlements and API tokens,
//! viewing statistics, and performing database operations without requiring
//! HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (and their profile)
//! cargo run --bin admin -- user create me@example.com
//!
//! # Grant or revoke premium
//! cargo run --bin admin -- premium grant me@example.com
//! cargo run --bin admin -- premium revoke me@example.com
//!
//! # Create a new API token for a user
//! cargo run --bin admin -- token create --email me@example.com
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Laptop"
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
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): HMAC key for token hashes

use relay_dashboard::application::services::auth_service::{generate_token, hash_token};
use relay_dashboard::application::services::{ProfileService, UserService};
use relay_dashboard::domain::repositories::{TokenRepository, TrackingRepository};
use relay_dashboard::infrastructure::persistence::{
    PgProfileRepository, PgTokenRepository, PgTrackingRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing relay-dashboard.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Grant or revoke premium
    Premium {
        #[command(subcommand)]
        action: PremiumAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
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
    /// Create a user and their profile
    Create {
        /// Account email address
        email: String,
    },
}

#[derive(Subcommand)]
enum PremiumAction {
    /// Mark the user's profile as premium
    Grant { email: String },

    /// Remove premium from the user's profile
    Revoke { email: String },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Owner's email address
        #[arg(short, long)]
        email: Option<String>,

        /// Token name (e.g., "Laptop", "Add-on")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Premium { action } => handle_premium_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService {
    UserService::new(Arc::new(PgUserRepository::new(Arc::new(pool.clone()))))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create { email } => {
            let user = user_service(pool)
                .create_user(&email)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!("{}", "✅ User created".green().bold());
            println!("  ID:    {}", user.id.to_string().bright_black());
            println!("  Email: {}", user.email.cyan());
            println!();
            println!(
                "  Next: {} admin -- token create --email {}",
                "cargo run --bin".bright_cyan(),
                user.email
            );
        }
    }

    Ok(())
}

async fn handle_premium_action(action: PremiumAction, pool: &PgPool) -> Result<()> {
    let (email, has_premium) = match action {
        PremiumAction::Grant { email } => (email, true),
        PremiumAction::Revoke { email } => (email, false),
    };

    let user = user_service(pool)
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let profiles = ProfileService::new(Arc::new(PgProfileRepository::new(Arc::new(
        pool.clone(),
    ))));
    let profile = profiles
        .set_premium(user.id, has_premium)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update profile: {}", e))?;

    let status = if profile.has_premium {
        "PREMIUM".green()
    } else {
        "FREE".yellow()
    };
    println!("  {} is now {}", user.email.cyan(), status.bold());

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            email,
            name,
            token,
            yes,
        } => {
            create_token(repo, pool, email, name, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC-SHA256 hash is stored; the raw token is displayed once.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    pool: &PgPool,
    email: Option<String>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Owner email").interact_text()?,
    };

    let user = user_service(pool)
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Laptop")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "✨ Generated new token".green());
            generate_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Owner: {}", user.email.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.create_token(
        user.id,
        &token_name,
        &hash_token(&signing_secret, &token_value),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/dashboard",
        token_value.bright_yellow()
    );
    println!();
    println!(
        "  Or sign in at {} with the same token.",
        "http://localhost:3000/dashboard/login".bright_cyan()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  User  Name                           Created              Status
///   ───────────────────────────────────────────────────────────────────────
///   1   7     Laptop                         2026-01-15 10:30     ACTIVE
///   2   7     Add-on                         2026-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<5} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<5} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up by ID, anything else by exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays user, alias, premium and upgrade-click counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count = user_service(pool)
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let premium_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE has_premium")
            .fetch_one(pool)
            .await?;

    let random_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM relay_addresses")
        .fetch_one(pool)
        .await?;

    let custom_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domain_addresses")
        .fetch_one(pool)
        .await?;

    let upgrade_clicks = PgTrackingRepository::new(Arc::new(pool.clone()))
        .count_upgrade_clicks()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:          {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Premium:        {}",
        premium_count.to_string().bright_green().bold()
    );
    println!(
        "  Random masks:   {}",
        random_count.to_string().bright_green().bold()
    );
    println!(
        "  Custom masks:   {}",
        custom_count.to_string().bright_green().bold()
    );
    println!(
        "  Upgrade clicks: {}",
        upgrade_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens:  {}",
        tokens_count.to_string().bright_green().bold()
    );
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

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await?;

            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
