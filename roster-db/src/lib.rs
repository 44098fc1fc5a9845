//! roster-db: data-access layer over PostgreSQL
//!
//! Three stores, one per entity family. Every method is a single
//! parameterized statement whose rows are mapped into `roster-core` types.
//!
//! # Design Principles
//!
//! - Stores borrow a shared `PgPool`; the pool hands out connections per call
//! - Row mapping goes through [`row::RowReader`] so it can be tested without a database
//! - Not-found lookups return `Ok(None)`; storage failures propagate unchanged
//! - Association writes are single conditional statements, not check-then-act

pub mod error;
pub mod migrations;
pub mod pool;
pub mod row;
pub mod stores;

pub use error::{DbError, RowError};
pub use pool::{create_pool, create_pool_with_options};
pub use sqlx::PgPool;
pub use stores::{DepartmentStore, EmployeeStore, ProjectStore};
