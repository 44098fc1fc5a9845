//! `roster departments` - list, search, show, create, rename

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use roster_core::{Department, NewDepartment};
use roster_db::{DepartmentStore, PgPool};

use crate::output::{print_list, print_one, print_outcome, OutputFormat};

#[derive(Parser, Debug)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub command: DepartmentCommands,
}

#[derive(Subcommand, Debug)]
pub enum DepartmentCommands {
    /// List all departments
    List,
    /// Find departments whose name contains the given text
    Search {
        /// Text the department name must contain (empty matches all)
        #[arg(default_value = "")]
        text: String,
    },
    /// Show a single department
    Show {
        /// Department ID
        id: i64,
    },
    /// Create a department
    Create {
        /// Department name
        name: String,
    },
    /// Rename an existing department
    Rename {
        /// Department ID
        id: i64,
        /// New department name
        name: String,
    },
}

pub async fn run_departments(
    args: DepartmentsArgs,
    pool: &PgPool,
    format: OutputFormat,
) -> Result<()> {
    let store = DepartmentStore::new(pool);

    match args.command {
        DepartmentCommands::List => {
            let departments = store.list_all().await.context("Failed to list departments")?;
            print_list(&departments, format, "No departments found")
        }
        DepartmentCommands::Search { text } => {
            let departments = store
                .search_by_name(&text)
                .await
                .context("Failed to search departments")?;
            print_list(&departments, format, "No matching departments")
        }
        DepartmentCommands::Show { id } => {
            let department = store
                .get_by_id(id)
                .await
                .context("Failed to load department")?
                .ok_or_else(|| anyhow!("Department {} not found", id))?;
            print_one(&department, format)
        }
        DepartmentCommands::Create { name } => {
            let department = store
                .create(NewDepartment::new(name))
                .await
                .context("Failed to create department")?;
            print_one(&department, format)
        }
        DepartmentCommands::Rename { id, name } => {
            let updated = store
                .save(&Department { id, name })
                .await
                .context("Failed to rename department")?;
            print_outcome(
                updated,
                &format!("Renamed department {}", id),
                &format!("No department with ID {}", id),
                format,
            )
        }
    }
}
