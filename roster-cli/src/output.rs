//! Rendering of store results
//!
//! Human tables for the terminal, JSON for piping to jq, ids only for scripts.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use roster_core::{Department, Employee, Project};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

/// Something that can be printed as one table row
pub trait Render: Serialize {
    fn id(&self) -> i64;
    fn header() -> String;
    fn line(&self) -> String;
}

impl Render for Department {
    fn id(&self) -> i64 {
        self.id
    }

    fn header() -> String {
        format!("{:>6}  {}", "ID", "NAME")
    }

    fn line(&self) -> String {
        format!("{:>6}  {}", self.id, self.name)
    }
}

impl Render for Employee {
    fn id(&self) -> i64 {
        self.id
    }

    fn header() -> String {
        format!(
            "{:>6}  {:<28}  {:>6}  {:<10}  {:<10}  {}",
            "ID", "NAME", "DEPT", "BORN", "HIRED", "G"
        )
    }

    fn line(&self) -> String {
        let dept = self
            .department_id
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{:>6}  {:<28}  {:>6}  {:<10}  {:<10}  {}",
            self.id,
            self.full_name(),
            dept,
            self.birth_date.to_string(),
            self.hire_date.to_string(),
            self.gender
        )
    }
}

impl Render for Project {
    fn id(&self) -> i64 {
        self.id
    }

    fn header() -> String {
        format!("{:>6}  {:<32}  {:<10}  {}", "ID", "NAME", "FROM", "TO")
    }

    fn line(&self) -> String {
        let date_or_dash = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        };
        format!(
            "{:>6}  {:<32}  {:<10}  {}",
            self.id,
            self.name,
            date_or_dash(self.start_date),
            date_or_dash(self.end_date)
        )
    }
}

/// Format a list in the requested style.
pub fn render_list<T: Render>(items: &[T], format: OutputFormat, empty: &str) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(items)?,
        OutputFormat::Quiet => items
            .iter()
            .map(|i| i.id().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Human if items.is_empty() => empty.to_string(),
        OutputFormat::Human => {
            let mut lines = vec![T::header()];
            lines.extend(items.iter().map(T::line));
            lines.join("\n")
        }
    };
    Ok(text)
}

/// Format a single record in the requested style.
pub fn render_one<T: Render>(item: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(item)?,
        OutputFormat::Quiet => item.id().to_string(),
        OutputFormat::Human => format!("{}\n{}", T::header(), item.line()),
    };
    Ok(text)
}

pub fn print_list<T: Render>(items: &[T], format: OutputFormat, empty: &str) -> Result<()> {
    println!("{}", render_list(items, format, empty)?);
    Ok(())
}

pub fn print_one<T: Render>(item: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render_one(item, format)?);
    Ok(())
}

/// Report the outcome of a mutation that may have matched nothing.
pub fn print_outcome(changed: bool, done: &str, unchanged: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "changed": changed })),
        OutputFormat::Quiet => {}
        OutputFormat::Human => println!("{}", if changed { done } else { unchanged }),
    }
    Ok(())
}
