//! Row-to-entity mapping
//!
//! Mapping is written against the [`RowReader`] capability rather than a
//! concrete `PgRow`, so the functions here are pure and can be exercised with
//! an in-memory row in tests.

use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::Row;

use roster_core::{Department, Employee, Project};

use crate::RowError;

/// Typed, column-name based access to one fetched row.
///
/// Implementors only provide the nullable getters; the required variants
/// turn a NULL into [`RowError::UnexpectedNull`].
pub trait RowReader {
    fn get_opt_i64(&self, column: &str) -> Result<Option<i64>, RowError>;
    fn get_opt_string(&self, column: &str) -> Result<Option<String>, RowError>;
    fn get_opt_date(&self, column: &str) -> Result<Option<NaiveDate>, RowError>;

    fn get_i64(&self, column: &str) -> Result<i64, RowError> {
        required(column, self.get_opt_i64(column)?)
    }

    fn get_string(&self, column: &str) -> Result<String, RowError> {
        required(column, self.get_opt_string(column)?)
    }

    fn get_date(&self, column: &str) -> Result<NaiveDate, RowError> {
        required(column, self.get_opt_date(column)?)
    }

    /// First character of a required text column.
    fn get_first_char(&self, column: &str) -> Result<char, RowError> {
        self.get_string(column)?
            .chars()
            .next()
            .ok_or_else(|| RowError::EmptyValue {
                column: column.to_owned(),
            })
    }
}

fn required<T>(column: &str, value: Option<T>) -> Result<T, RowError> {
    value.ok_or_else(|| RowError::UnexpectedNull {
        column: column.to_owned(),
    })
}

fn decode_error(column: &str, err: sqlx::Error) -> RowError {
    match err {
        sqlx::Error::ColumnNotFound(_) => RowError::MissingColumn {
            column: column.to_owned(),
        },
        other => RowError::Decode {
            column: column.to_owned(),
            message: other.to_string(),
        },
    }
}

impl RowReader for PgRow {
    fn get_opt_i64(&self, column: &str) -> Result<Option<i64>, RowError> {
        // Schemas created with SERIAL use INT4 keys
        match self.try_get::<Option<i64>, _>(column) {
            Ok(value) => Ok(value),
            Err(sqlx::Error::ColumnDecode { .. }) => self
                .try_get::<Option<i32>, _>(column)
                .map(|value| value.map(i64::from))
                .map_err(|e| decode_error(column, e)),
            Err(e) => Err(decode_error(column, e)),
        }
    }

    fn get_opt_string(&self, column: &str) -> Result<Option<String>, RowError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn get_opt_date(&self, column: &str) -> Result<Option<NaiveDate>, RowError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }
}

/// Map `department_id, name`.
pub fn department_from_row<R: RowReader + ?Sized>(row: &R) -> Result<Department, RowError> {
    Ok(Department {
        id: row.get_i64("department_id")?,
        name: row.get_string("name")?,
    })
}

/// Map the full employee column set.
///
/// Fails when `birth_date`, `hire_date` or `gender` is NULL, or when
/// `gender` is an empty string.
pub fn employee_from_row<R: RowReader + ?Sized>(row: &R) -> Result<Employee, RowError> {
    Ok(Employee {
        id: row.get_i64("employee_id")?,
        department_id: row.get_opt_i64("department_id")?,
        first_name: row.get_string("first_name")?,
        last_name: row.get_string("last_name")?,
        birth_date: row.get_date("birth_date")?,
        hire_date: row.get_date("hire_date")?,
        gender: row.get_first_char("gender")?,
    })
}

/// Map `project_id, name, from_date, to_date`; both dates are nullable.
pub fn project_from_row<R: RowReader + ?Sized>(row: &R) -> Result<Project, RowError> {
    Ok(Project {
        id: row.get_i64("project_id")?,
        name: row.get_string("name")?,
        start_date: row.get_opt_date("from_date")?,
        end_date: row.get_opt_date("to_date")?,
    })
}

/// Map every row with `f`, stopping at the first failure.
pub fn map_rows<T, F>(rows: &[PgRow], f: F) -> Result<Vec<T>, RowError>
where
    F: Fn(&PgRow) -> Result<T, RowError>,
{
    rows.iter().map(f).collect()
}
