//! Entity records for departments, employees and projects
//!
//! Identifiers are database-assigned `i64` values (`BIGSERIAL`). The `New*`
//! types carry everything except the identifier and are what the stores'
//! `create` operations accept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A department row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// A department that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attach the generated identifier.
    pub fn with_id(self, id: i64) -> Department {
        Department {
            id,
            name: self.name,
        }
    }
}

/// An employee row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    /// Nullable foreign key into `department`
    pub department_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    /// Single-character code, first character of the stored value
    pub gender: char,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An employee that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub department_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub gender: char,
}

impl NewEmployee {
    /// Attach the generated identifier.
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            department_id: self.department_id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            hire_date: self.hire_date,
            gender: self.gender,
        }
    }
}

/// A project row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// Whether the project counts as active on `today`.
    ///
    /// A project with no end date is always active. Otherwise it needs a
    /// start date and `today` must fall strictly between start and end.
    /// Consequently a project with an end date but no start date is never
    /// active, and projects are inactive on their first and last day.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (_, None) => true,
            (Some(start), Some(end)) => start < today && today < end,
            (None, Some(_)) => false,
        }
    }
}

/// A project that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewProject {
    /// Attach the generated identifier.
    pub fn with_id(self, id: i64) -> Project {
        Project {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// One row of the project/employee association table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectEmployee {
    pub project_id: i64,
    pub employee_id: i64,
}
