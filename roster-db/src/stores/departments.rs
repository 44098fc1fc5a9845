//! Department store
//!
//! CRUD plus substring search on the department name.

use sqlx::PgPool;
use tracing::{debug, instrument};

use roster_core::{like_contains, Department, NewDepartment};

use crate::row::{department_from_row, map_rows, RowReader};
use crate::DbError;

/// Department store
pub struct DepartmentStore<'a> {
    pool: &'a PgPool,
}

impl<'a> DepartmentStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every department in storage order.
    pub async fn list_all(&self) -> Result<Vec<Department>, DbError> {
        let rows = sqlx::query("SELECT department_id, name FROM department")
            .fetch_all(self.pool)
            .await?;

        let departments = map_rows(&rows, department_from_row)?;
        debug!(count = departments.len(), "Listed departments");
        Ok(departments)
    }

    /// Departments whose name contains `name_search`.
    ///
    /// Case sensitivity follows the column collation. An empty search
    /// returns every department.
    pub async fn search_by_name(&self, name_search: &str) -> Result<Vec<Department>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT department_id, name
            FROM department
            WHERE name LIKE $1 ESCAPE '\'
            "#,
        )
        .bind(like_contains(name_search))
        .fetch_all(self.pool)
        .await?;

        let departments = map_rows(&rows, department_from_row)?;
        debug!(search = name_search, count = departments.len(), "Searched departments");
        Ok(departments)
    }

    /// Rename the department with `department.id`.
    ///
    /// Returns `false` when no such department exists; that is not an error.
    #[instrument(skip(self, department), fields(id = department.id))]
    pub async fn save(&self, department: &Department) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE department
            SET name = $1
            WHERE department_id = $2
            "#,
        )
        .bind(&department.name)
        .bind(department.id)
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        debug!(updated, "Saved department");
        Ok(updated)
    }

    /// Insert a department and return it with its generated id.
    #[instrument(skip(self, department), fields(name = %department.name))]
    pub async fn create(&self, department: NewDepartment) -> Result<Department, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO department (name)
            VALUES ($1)
            RETURNING department_id
            "#,
        )
        .bind(&department.name)
        .fetch_one(self.pool)
        .await?;

        let id = row.get_i64("department_id")?;
        debug!(id, "Created department");
        Ok(department.with_id(id))
    }

    /// Get a single department, `None` if the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Department>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT department_id, name
            FROM department
            WHERE department_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(department_from_row).transpose()?)
    }
}
