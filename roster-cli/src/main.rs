//! roster CLI - departments, employees and projects over PostgreSQL
//!
//! Thin front end over the `roster-db` stores:
//! - Department CRUD and name search (`departments` subcommand)
//! - Employee queries and reassignment (`employees` subcommand)
//! - Active projects and project membership (`projects` subcommand)
//! - Schema setup (`migrate` subcommand)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_core::{load_dotenv, RosterConfig};
use roster_db::{create_pool_with_options, migrations};
use tracing::debug;

mod commands;
mod output;
mod tracing_setup;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    author,
    version,
    about = "Query and update departments, employees and projects",
    long_about = "Data-access front end for the department/employee/project database. \
                  Reads DATABASE_URL from the environment, .env, or roster.toml."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    json: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the roster tables if they do not exist
    Migrate,
    /// Department operations (list, search, show, create, rename)
    Departments(commands::departments::DepartmentsArgs),
    /// Employee operations (list, search, by-department, by-project, unassigned, reassign)
    Employees(commands::employees::EmployeesArgs),
    /// Project operations (active, list, add-employee, remove-employee)
    Projects(commands::projects::ProjectsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's `env` fallbacks see .env values
    load_dotenv();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.format
    };

    let config = RosterConfig::load();
    let database_url = match cli.database_url {
        Some(url) => {
            debug!("Using database URL from --database-url or DATABASE_URL");
            url
        }
        None => config.database_url()?,
    };

    let pool = create_pool_with_options(&database_url, &config.database)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            migrations::run(&pool).await.context("Migration failed")?;
            if format == OutputFormat::Human {
                println!("Schema is up to date");
            }
        }
        Commands::Departments(args) => commands::run_departments(args, &pool, format).await?,
        Commands::Employees(args) => commands::run_employees(args, &pool, format).await?,
        Commands::Projects(args) => commands::run_projects(args, &pool, format).await?,
    }

    pool.close().await;
    Ok(())
}
