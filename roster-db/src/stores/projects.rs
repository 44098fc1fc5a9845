//! Project store
//!
//! Active-project listing and membership of the project/employee
//! association table.
//!
//! "Active" is decided in Rust after fetching every project, using
//! [`Project::is_active_on`]. Membership writes are single conditional
//! statements, so repeating an add or a remove is harmless.

use chrono::{Local, NaiveDate};
use sqlx::PgPool;
use tracing::{debug, instrument};

use roster_core::{NewProject, Project};

use crate::row::{map_rows, project_from_row, RowReader};
use crate::DbError;

/// Project store
pub struct ProjectStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every project, active or not.
    pub async fn list_all(&self) -> Result<Vec<Project>, DbError> {
        let rows = sqlx::query("SELECT project_id, name, from_date, to_date FROM project")
            .fetch_all(self.pool)
            .await?;

        Ok(map_rows(&rows, project_from_row)?)
    }

    /// Projects active today, by the local wall-clock date at call time.
    pub async fn list_all_active(&self) -> Result<Vec<Project>, DbError> {
        self.list_all_active_on(Local::now().date_naive()).await
    }

    /// Projects active on `today`.
    pub async fn list_all_active_on(&self, today: NaiveDate) -> Result<Vec<Project>, DbError> {
        let projects = self.list_all().await?;
        let total = projects.len();

        let active: Vec<Project> = projects
            .into_iter()
            .filter(|p| p.is_active_on(today))
            .collect();

        debug!(%today, total, active = active.len(), "Filtered active projects");
        Ok(active)
    }

    /// Insert a project and return it with its generated id.
    #[instrument(skip(self, project), fields(name = %project.name))]
    pub async fn create(&self, project: NewProject) -> Result<Project, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO project (name, from_date, to_date)
            VALUES ($1, $2, $3)
            RETURNING project_id
            "#,
        )
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(self.pool)
        .await?;

        let id = row.get_i64("project_id")?;
        debug!(id, "Created project");
        Ok(project.with_id(id))
    }

    /// Get a single project, `None` if the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Project>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT project_id, name, from_date, to_date
            FROM project
            WHERE project_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(project_from_row).transpose()?)
    }

    /// Remove the (project, employee) pair if present.
    ///
    /// Returns whether a row was deleted. Removing a pair that does not
    /// exist succeeds and changes nothing.
    #[instrument(skip(self))]
    pub async fn remove_employee_from_project(
        &self,
        project_id: i64,
        employee_id: i64,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM project_employee
            WHERE project_id = $1 AND employee_id = $2
            "#,
        )
        .bind(project_id)
        .bind(employee_id)
        .execute(self.pool)
        .await?;

        let removed = result.rows_affected() > 0;
        debug!(removed, "Removed employee from project");
        Ok(removed)
    }

    /// Add the (project, employee) pair unless it already exists.
    ///
    /// Returns whether a row was inserted. The existence check and the insert
    /// are one statement; with the composite primary key created by
    /// `migrations::run`, concurrent adds of the same pair also end up with a
    /// single row.
    #[instrument(skip(self))]
    pub async fn add_employee_to_project(
        &self,
        project_id: i64,
        employee_id: i64,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO project_employee (project_id, employee_id)
            SELECT $1, $2
            WHERE NOT EXISTS (
                SELECT 1 FROM project_employee
                WHERE project_id = $1 AND employee_id = $2
            )
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(employee_id)
        .execute(self.pool)
        .await?;

        let added = result.rows_affected() > 0;
        debug!(added, "Added employee to project");
        Ok(added)
    }
}
