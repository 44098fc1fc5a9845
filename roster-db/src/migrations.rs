//! Schema setup for the roster tables

use sqlx::PgPool;

use crate::DbError;

/// Create the department, employee, project and project_employee tables
/// if they do not exist yet.
///
/// Existing tables are left untouched, so a database provisioned elsewhere
/// keeps whatever constraints it already has.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running roster migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS department (
            department_id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            employee_id BIGSERIAL PRIMARY KEY,
            department_id BIGINT REFERENCES department(department_id),
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date DATE NOT NULL,
            gender CHAR(1) NOT NULL,
            hire_date DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project (
            project_id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            from_date DATE,
            to_date DATE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Composite key: concurrent adds of the same pair collapse to one row
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_employee (
            project_id BIGINT NOT NULL REFERENCES project(project_id),
            employee_id BIGINT NOT NULL REFERENCES employee(employee_id),
            PRIMARY KEY (project_id, employee_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Roster migrations complete");
    Ok(())
}
