//! `roster projects` - active listing and membership changes

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use roster_core::NewProject;
use roster_db::{PgPool, ProjectStore};

use crate::output::{print_list, print_one, print_outcome, OutputFormat};

#[derive(Parser, Debug)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List active projects
    Active {
        /// Evaluate against this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// List all projects
    List,
    /// Show a single project
    Show {
        /// Project ID
        id: i64,
    },
    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Assign an employee to a project
    AddEmployee {
        /// Project ID
        project_id: i64,
        /// Employee ID
        employee_id: i64,
    },
    /// Remove an employee from a project
    RemoveEmployee {
        /// Project ID
        project_id: i64,
        /// Employee ID
        employee_id: i64,
    },
}

pub async fn run_projects(args: ProjectsArgs, pool: &PgPool, format: OutputFormat) -> Result<()> {
    let store = ProjectStore::new(pool);

    match args.command {
        ProjectCommands::Active { on } => {
            let projects = match on {
                Some(date) => store.list_all_active_on(date).await,
                None => store.list_all_active().await,
            }
            .context("Failed to list active projects")?;
            print_list(&projects, format, "No active projects")
        }
        ProjectCommands::List => {
            let projects = store.list_all().await.context("Failed to list projects")?;
            print_list(&projects, format, "No projects found")
        }
        ProjectCommands::Show { id } => {
            let project = store
                .get_by_id(id)
                .await
                .context("Failed to load project")?
                .ok_or_else(|| anyhow!("Project {} not found", id))?;
            print_one(&project, format)
        }
        ProjectCommands::Create { name, start, end } => {
            let project = store
                .create(NewProject {
                    name,
                    start_date: start,
                    end_date: end,
                })
                .await
                .context("Failed to create project")?;
            print_one(&project, format)
        }
        ProjectCommands::AddEmployee {
            project_id,
            employee_id,
        } => {
            let added = store
                .add_employee_to_project(project_id, employee_id)
                .await
                .context("Failed to add employee to project")?;
            print_outcome(
                added,
                &format!("Added employee {} to project {}", employee_id, project_id),
                &format!("Employee {} is already on project {}", employee_id, project_id),
                format,
            )
        }
        ProjectCommands::RemoveEmployee {
            project_id,
            employee_id,
        } => {
            let removed = store
                .remove_employee_from_project(project_id, employee_id)
                .await
                .context("Failed to remove employee from project")?;
            print_outcome(
                removed,
                &format!("Removed employee {} from project {}", employee_id, project_id),
                &format!("Employee {} was not on project {}", employee_id, project_id),
                format,
            )
        }
    }
}
