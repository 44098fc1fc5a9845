//! Command implementations for the roster CLI

pub mod departments;
pub mod employees;
pub mod projects;

// Re-export main dispatcher functions for flat access from main.rs
pub use departments::run_departments;
pub use employees::run_employees;
pub use projects::run_projects;
