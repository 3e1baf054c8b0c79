use crate::error::LoadError;
use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub const EMPLOYEES_SHEET: &str = "Employees";
pub const PROJECTS_SHEET: &str = "Projects";
pub const ASSIGNMENTS_SHEET: &str = "Project_Assignments";
pub const DAILY_BILLING_SHEET: &str = "Daily_Billing";

/// A single cell value, detached from the workbook library.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::DateTime(dt) => dt.as_datetime().map(Cell::DateTime).unwrap_or(Cell::Empty),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// A sheet: first row is the header, the rest are data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Index of the column with this header.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn from_range(range: &Range<Data>) -> Self {
        let mut rows = range.rows();

        let headers = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|c| match c {
                        Data::String(s) => s.trim().to_string(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let rows = rows
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();

        Self { headers, rows }
    }
}

/// Everything read from the source in one pass. `daily_billing` is `None` when the
/// optional sheet is absent or unreadable.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub employees: Table,
    pub projects: Table,
    pub assignments: Table,
    pub daily_billing: Option<Table>,
}

/// Where the record store reads its tables from.
pub trait TableSource: Send + Sync {
    fn read_tables(&self) -> Result<RawTables, LoadError>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

impl<T: TableSource + ?Sized> TableSource for Arc<T> {
    fn read_tables(&self) -> Result<RawTables, LoadError> {
        (**self).read_tables()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// An `.xlsx` (or any format calamine understands) workbook on disk.
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableSource for XlsxSource {
    fn read_tables(&self) -> Result<RawTables, LoadError> {
        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| LoadError::Source(e.to_string()))?;
        let sheet_names = workbook.sheet_names();
        debug!(path = %self.path.display(), sheets = ?sheet_names, "Workbook opened");

        let mut read = |name: &str| -> Result<Option<Table>, LoadError> {
            if !sheet_names.iter().any(|n| n == name) {
                return Ok(None);
            }
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| LoadError::Source(format!("sheet '{}': {}", name, e)))?;
            Ok(Some(Table::from_range(&range)))
        };

        let employees =
            read(EMPLOYEES_SHEET)?.ok_or_else(|| LoadError::MissingTable(EMPLOYEES_SHEET.into()))?;
        let projects =
            read(PROJECTS_SHEET)?.ok_or_else(|| LoadError::MissingTable(PROJECTS_SHEET.into()))?;
        let assignments = read(ASSIGNMENTS_SHEET)?
            .ok_or_else(|| LoadError::MissingTable(ASSIGNMENTS_SHEET.into()))?;

        let daily_billing = match read(DAILY_BILLING_SHEET) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Daily billing sheet unreadable, ignoring it");
                None
            }
        };

        Ok(RawTables {
            employees,
            projects,
            assignments,
            daily_billing,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
