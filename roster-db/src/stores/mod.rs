//! Store implementations for database access
//!
//! Each store follows these patterns:
//! - Borrows the shared pool; no state is kept between calls
//! - One statement per operation, mapped through `crate::row`
//! - Missing ids are `Ok(None)` or a `false` return, never an error

pub mod departments;
pub mod employees;
pub mod projects;

pub use departments::DepartmentStore;
pub use employees::EmployeeStore;
pub use projects::ProjectStore;
