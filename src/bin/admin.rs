//! CLI administration tool for linkcut.
//!
//! Provides commands for managing API users without requiring HTTP API
//! access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new user (prints their API token once)
//! cargo run --bin admin -- user create
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Deactivate / reactivate a user
//! cargo run --bin admin -- user deactivate alice
//! cargo run --bin admin -- user activate alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required): HMAC key for token digests

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::{Rng, distr::Alphanumeric};
use sqlx::PgPool;

use linkcut::application::services::token_digest;
use linkcut::domain::entities::NewUser;
use linkcut::domain::repositories::UserRepository;
use linkcut::infrastructure::persistence::PgUserRepository;

/// Length of generated API tokens.
const TOKEN_LENGTH: usize = 40;

/// CLI tool for managing linkcut.
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
    /// Manage API users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user and issue their API token
    Create {
        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Username
        #[arg(short, long)]
        username: Option<String>,
    },

    /// List all users
    List,

    /// Deactivate a user (their token stops working)
    Deactivate {
        /// Username
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Reactivate a user
    Activate {
        /// Username
        username: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
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
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create { email, username } => create_user(repo, email, username).await?,
        UserAction::List => list_users(repo).await?,
        UserAction::Deactivate { username, yes } => {
            set_user_active(repo, &username, false, yes).await?;
        }
        UserAction::Activate { username } => set_user_active(repo, &username, true, true).await?,
    }

    Ok(())
}

/// Creates a new user with interactive prompts and prints their API token.
///
/// # Security
///
/// Only the HMAC-SHA256 digest of the token is stored; the raw token is
/// displayed once and cannot be retrieved later.
async fn create_user(
    repo: Arc<PgUserRepository>,
    email: Option<String>,
    username: Option<String>,
) -> Result<()> {
    println!("{}", "Create API user".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let token = generate_token();
    let user = repo
        .insert(NewUser {
            email,
            username,
            api_token_hash: token_digest(&secret, &token),
        })
        .await?;

    println!();
    println!("{} user #{} ({})", "Created".green(), user.id, user.username);
    println!();
    println!("API token (shown once, store it now):");
    println!("  {}", token.bright_yellow().bold());
    println!();
    println!("Use it as: {}", format!("Authorization: Bearer {token}").dimmed());

    Ok(())
}

/// Lists all users with their active status.
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    let users = repo.list().await?;

    if users.is_empty() {
        println!("{}", "No users found".yellow());
        return Ok(());
    }

    println!("{:<6} {:<20} {:<30} {}", "ID", "USERNAME", "EMAIL", "STATUS");
    for user in users {
        let status = if user.is_active {
            "active".green()
        } else {
            "inactive".red()
        };
        println!("{:<6} {:<20} {:<30} {}", user.id, user.username, user.email, status);
    }

    Ok(())
}

/// Toggles a user's active flag, with confirmation on deactivation.
async fn set_user_active(
    repo: Arc<PgUserRepository>,
    username: &str,
    active: bool,
    skip_confirm: bool,
) -> Result<()> {
    let user = repo
        .find_by_username(username)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Deactivate user '{}'?", user.username))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    repo.set_active(user.id, active).await?;

    let verb = if active { "Activated" } else { "Deactivated" };
    println!("{} user '{}'", verb.green(), user.username);

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1").execute(pool).await?;
            println!("{}", "Database connection OK".green());
        }
    }

    Ok(())
}

/// Generates a random alphanumeric API token.
fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}
