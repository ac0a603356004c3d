//! CLI for running schema migrations and seeding the category catalogue.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conecta_core::Config;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Database migration and seeding CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Run,

    /// Show applied migrations
    Status,

    /// Insert the default service categories (idempotent)
    SeedCategories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let pool = get_pool().await?;

    match cli.command {
        Commands::Run => cmd_run(&pool).await,
        Commands::Status => cmd_status(&pool).await,
        Commands::SeedCategories => cmd_seed_categories(&pool).await,
    }
}

async fn get_pool() -> Result<PgPool> {
    let config = Config::from_env()?;
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_run(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    println!("Migrations complete");
    Ok(())
}

async fn cmd_status(pool: &PgPool) -> Result<()> {
    let applied = sqlx::query_as::<_, (i64, String)>(
        "SELECT version, description FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to read migration history (has `run` been executed?)")?;

    if applied.is_empty() {
        println!("No migrations applied");
    } else {
        for (version, description) in applied {
            println!("{:04} {}", version, description);
        }
    }
    Ok(())
}

/// Catalogue the request form offers out of the box.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Elétrica", "Instalações e reparos elétricos"),
    ("Hidráulica", "Encanamento e reparos hidráulicos"),
    ("Pintura", "Pintura residencial e comercial"),
    ("Limpeza", "Limpeza residencial e pós-obra"),
    ("Jardinagem", "Jardinagem e paisagismo"),
    ("Reformas", "Reformas e pequenos reparos"),
    ("Montagem de móveis", "Montagem e desmontagem de móveis"),
    ("Ar-condicionado", "Instalação e manutenção de ar-condicionado"),
];

async fn cmd_seed_categories(pool: &PgPool) -> Result<()> {
    let mut inserted = 0u32;
    for (name, description) in DEFAULT_CATEGORIES {
        let result = sqlx::query(
            "INSERT INTO service_categories (name, description)
             VALUES ($1, $2)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
        inserted += result.rows_affected() as u32;
    }
    println!("Seeded {} new categories", inserted);
    Ok(())
}
