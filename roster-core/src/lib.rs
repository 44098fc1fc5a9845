//! roster-core: entity types and shared rules for the roster data-access layer
//!
//! Nothing in here touches the database. The stores in `roster-db` map rows
//! into these types and the `roster` binary renders them.

pub mod config;
pub mod error;
pub mod model;
pub mod search;

pub use config::{load_dotenv, DatabaseConfig, RosterConfig};
pub use error::{Result, RosterError};
pub use model::{
    Department, Employee, NewDepartment, NewEmployee, NewProject, Project, ProjectEmployee,
};
pub use search::like_contains;
