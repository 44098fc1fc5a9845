//! `roster employees` - queries by name, department, project and reassignment

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use roster_core::NewEmployee;
use roster_db::{EmployeeStore, PgPool};

use crate::output::{print_list, print_one, print_outcome, OutputFormat};

#[derive(Parser, Debug)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeeCommands,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// List all employees
    List,
    /// Find employees by first AND last name substrings
    Search {
        /// Text the first name must contain
        #[arg(long, default_value = "")]
        first: String,
        /// Text the last name must contain
        #[arg(long, default_value = "")]
        last: String,
    },
    /// Show a single employee
    Show {
        /// Employee ID
        id: i64,
    },
    /// List employees of a department
    ByDepartment {
        /// Department ID
        department_id: i64,
    },
    /// List employees assigned to a project
    ByProject {
        /// Project ID
        project_id: i64,
    },
    /// List employees not assigned to any project
    Unassigned,
    /// Move an employee to another department
    Reassign {
        /// Employee ID
        employee_id: i64,
        /// Target department ID
        department_id: i64,
    },
    /// Create an employee
    Create(CreateEmployeeArgs),
}

#[derive(Parser, Debug)]
pub struct CreateEmployeeArgs {
    /// First name
    #[arg(long)]
    pub first: String,

    /// Last name
    #[arg(long)]
    pub last: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Hire date (YYYY-MM-DD)
    #[arg(long)]
    pub hire_date: NaiveDate,

    /// Single-character gender code
    #[arg(long)]
    pub gender: char,

    /// Department ID
    #[arg(long)]
    pub department: Option<i64>,
}

pub async fn run_employees(args: EmployeesArgs, pool: &PgPool, format: OutputFormat) -> Result<()> {
    let store = EmployeeStore::new(pool);

    match args.command {
        EmployeeCommands::List => {
            let employees = store.list_all().await.context("Failed to list employees")?;
            print_list(&employees, format, "No employees found")
        }
        EmployeeCommands::Search { first, last } => {
            let employees = store
                .search_by_name(&first, &last)
                .await
                .context("Failed to search employees")?;
            print_list(&employees, format, "No matching employees")
        }
        EmployeeCommands::Show { id } => {
            let employee = store
                .get_by_id(id)
                .await
                .context("Failed to load employee")?
                .ok_or_else(|| anyhow!("Employee {} not found", id))?;
            print_one(&employee, format)
        }
        EmployeeCommands::ByDepartment { department_id } => {
            let employees = store
                .list_by_department(department_id)
                .await
                .context("Failed to list employees by department")?;
            print_list(&employees, format, "No employees in this department")
        }
        EmployeeCommands::ByProject { project_id } => {
            let employees = store
                .list_by_project(project_id)
                .await
                .context("Failed to list employees by project")?;
            print_list(&employees, format, "No employees on this project")
        }
        EmployeeCommands::Unassigned => {
            let employees = store
                .list_without_projects()
                .await
                .context("Failed to list employees without projects")?;
            print_list(&employees, format, "Every employee has a project")
        }
        EmployeeCommands::Reassign {
            employee_id,
            department_id,
        } => {
            let updated = store
                .reassign_department(employee_id, department_id)
                .await
                .context("Failed to reassign employee")?;
            print_outcome(
                updated,
                &format!("Moved employee {} to department {}", employee_id, department_id),
                &format!("No employee with ID {}", employee_id),
                format,
            )
        }
        EmployeeCommands::Create(args) => {
            let employee = store
                .create(NewEmployee {
                    department_id: args.department,
                    first_name: args.first,
                    last_name: args.last,
                    birth_date: args.birth_date,
                    hire_date: args.hire_date,
                    gender: args.gender,
                })
                .await
                .context("Failed to create employee")?;
            print_one(&employee, format)
        }
    }
}
