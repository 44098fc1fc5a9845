//! Employee store
//!
//! Read queries by name, department and project membership, plus the
//! department reassignment mutation. Every read returns the full column set
//! so all results go through `employee_from_row`.

use sqlx::PgPool;
use tracing::{debug, instrument};

use roster_core::{like_contains, Employee, NewEmployee};

use crate::row::{employee_from_row, map_rows, RowReader};
use crate::DbError;

/// Employee store
pub struct EmployeeStore<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every employee.
    pub async fn list_all(&self) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT employee_id, department_id, first_name, last_name, birth_date, gender, hire_date
            FROM employee
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let employees = map_rows(&rows, employee_from_row)?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Employees whose first name contains `first_search` AND whose last
    /// name contains `last_search`. Pass an empty string to leave one side
    /// unconstrained.
    pub async fn search_by_name(
        &self,
        first_search: &str,
        last_search: &str,
    ) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT employee_id, department_id, first_name, last_name, birth_date, gender, hire_date
            FROM employee
            WHERE first_name LIKE $1 ESCAPE '\'
              AND last_name LIKE $2 ESCAPE '\'
            "#,
        )
        .bind(like_contains(first_search))
        .bind(like_contains(last_search))
        .fetch_all(self.pool)
        .await?;

        let employees = map_rows(&rows, employee_from_row)?;
        debug!(
            first = first_search,
            last = last_search,
            count = employees.len(),
            "Searched employees"
        );
        Ok(employees)
    }

    /// Employees belonging to `department_id`.
    pub async fn list_by_department(&self, department_id: i64) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT e.employee_id, e.department_id, e.first_name, e.last_name,
                   e.birth_date, e.gender, e.hire_date
            FROM employee e
            JOIN department d ON e.department_id = d.department_id
            WHERE d.department_id = $1
            "#,
        )
        .bind(department_id)
        .fetch_all(self.pool)
        .await?;

        let employees = map_rows(&rows, employee_from_row)?;
        debug!(department_id, count = employees.len(), "Listed employees by department");
        Ok(employees)
    }

    /// Employees with no row at all in `project_employee`.
    pub async fn list_without_projects(&self) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT e.employee_id, e.department_id, e.first_name, e.last_name,
                   e.birth_date, e.gender, e.hire_date
            FROM employee e
            WHERE NOT EXISTS (
                SELECT 1 FROM project_employee pe
                WHERE pe.employee_id = e.employee_id
            )
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let employees = map_rows(&rows, employee_from_row)?;
        debug!(count = employees.len(), "Listed employees without projects");
        Ok(employees)
    }

    /// Employees associated with `project_id`.
    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT e.employee_id, e.department_id, e.first_name, e.last_name,
                   e.birth_date, e.gender, e.hire_date
            FROM employee e
            JOIN project_employee pe ON pe.employee_id = e.employee_id
            WHERE pe.project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(self.pool)
        .await?;

        let employees = map_rows(&rows, employee_from_row)?;
        debug!(project_id, count = employees.len(), "Listed employees by project");
        Ok(employees)
    }

    /// Move an employee to another department.
    ///
    /// No local validation: an unknown `department_id` surfaces as the
    /// storage layer's foreign key error, an unknown `employee_id` returns
    /// `false`.
    #[instrument(skip(self))]
    pub async fn reassign_department(
        &self,
        employee_id: i64,
        department_id: i64,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE employee
            SET department_id = $1
            WHERE employee_id = $2
            "#,
        )
        .bind(department_id)
        .bind(employee_id)
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        debug!(updated, "Reassigned employee");
        Ok(updated)
    }

    /// Insert an employee and return it with its generated id.
    #[instrument(skip(self, employee), fields(last_name = %employee.last_name))]
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO employee (department_id, first_name, last_name, birth_date, gender, hire_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING employee_id
            "#,
        )
        .bind(employee.department_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.birth_date)
        .bind(employee.gender.to_string())
        .bind(employee.hire_date)
        .fetch_one(self.pool)
        .await?;

        let id = row.get_i64("employee_id")?;
        debug!(id, "Created employee");
        Ok(employee.with_id(id))
    }

    /// Get a single employee, `None` if the id is unknown.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Employee>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT employee_id, department_id, first_name, last_name, birth_date, gender, hire_date
            FROM employee
            WHERE employee_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(employee_from_row).transpose()?)
    }
}
