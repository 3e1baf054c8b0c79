use super::source::{
    ASSIGNMENTS_SHEET, Cell, DAILY_BILLING_SHEET, EMPLOYEES_SHEET, PROJECTS_SHEET, Table,
};
use crate::error::LoadError;
use crate::model::{Assignment, DailyBilling, Employee, Project, ProjectStatus};
use crate::utils::calendar::weekdays_between;
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use tracing::{debug, warn};

/// Outcome of [`parse_date_best_effort`]: either a real value from the sheet or the
/// substitute used when the cell could not be read as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Parsed(NaiveDate),
    Fallback(NaiveDate),
}

impl ParsedDate {
    pub fn value(self) -> NaiveDate {
        match self {
            ParsedDate::Parsed(d) | ParsedDate::Fallback(d) => d,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, ParsedDate::Fallback(_))
    }
}

/// Reads a date cell. Native dates and `YYYY-MM-DD` text (optionally followed by a time)
/// parse normally; anything else that is not blank becomes `today`. Blank cells give `None`.
pub fn parse_date_best_effort(cell: &Cell, today: NaiveDate) -> Option<ParsedDate> {
    match cell {
        Cell::Empty => None,
        Cell::DateTime(dt) => Some(ParsedDate::Parsed(dt.date())),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()));
            Some(match parsed {
                Ok(d) => ParsedDate::Parsed(d),
                Err(_) => ParsedDate::Fallback(today),
            })
        }
        Cell::Int(_) | Cell::Float(_) | Cell::Bool(_) => Some(ParsedDate::Fallback(today)),
    }
}

fn cell_u64(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Int(i) => u64::try_from(*i).ok(),
        Cell::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Some(*f as u64),
        Cell::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_f64(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Int(i) => Some(*i as f64),
        Cell::Float(f) => Some(*f),
        Cell::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn cell_string(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) => f.to_string(),
        Cell::Bool(b) => b.to_string(),
        Cell::Text(s) => s.trim().to_string(),
        Cell::DateTime(dt) => dt.to_string(),
    }
}

fn cell_flag(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Int(i) => *i == 1,
        Cell::Float(f) => *f == 1.0,
        Cell::Text(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

fn is_blank(row: &[Cell]) -> bool {
    row.iter().all(|c| match c {
        Cell::Empty => true,
        Cell::Text(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Column lookup for one sheet, plus the shared decode state.
struct Sheet<'a> {
    name: &'static str,
    table: &'a Table,
}

impl<'a> Sheet<'a> {
    fn require(&self, column: &str) -> Result<usize, LoadError> {
        self.table.column(column).ok_or_else(|| LoadError::MissingColumn {
            table: self.name.to_string(),
            column: column.to_string(),
        })
    }

    fn rows(&self) -> impl Iterator<Item = (usize, &'a [Cell])> + 'a {
        self.table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !is_blank(row))
            .map(|(i, row)| (i + 2, row.as_slice()))
    }
}

fn at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&Cell::Empty)
}

/// Counts date cells that had to fall back to today.
pub struct Decoder {
    today: NaiveDate,
    pub fallbacks: usize,
}

impl Decoder {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, fallbacks: 0 }
    }

    fn date(&mut self, sheet: &str, line: usize, cell: &Cell) -> Option<NaiveDate> {
        let parsed = parse_date_best_effort(cell, self.today)?;
        if parsed.is_fallback() {
            self.fallbacks += 1;
            warn!(sheet, line, value = ?cell, "Unparseable date, using today");
        }
        Some(parsed.value())
    }

    pub fn employees(&mut self, table: &Table) -> Result<Vec<Employee>, LoadError> {
        let sheet = Sheet { name: EMPLOYEES_SHEET, table };
        let id = sheet.require("Employee_ID")?;
        let name = sheet.require("Employee_Name")?;
        let tool = sheet.require("Tool")?;
        let role = sheet.require("Role")?;
        let joining = sheet.require("Joining_Date")?;

        let mut out = Vec::with_capacity(table.rows.len());
        for (line, row) in sheet.rows() {
            let Some(employee_id) = cell_u64(at(row, id)) else {
                debug!(sheet = sheet.name, line, "Row without a usable Employee_ID, skipped");
                continue;
            };
            out.push(Employee {
                id: employee_id,
                name: cell_string(at(row, name)),
                tool: cell_string(at(row, tool)),
                role: cell_string(at(row, role)),
                joining_date: self.date(sheet.name, line, at(row, joining)),
            });
        }
        Ok(out)
    }

    pub fn projects(&mut self, table: &Table) -> Result<Vec<Project>, LoadError> {
        let sheet = Sheet { name: PROJECTS_SHEET, table };
        let id = sheet.require("Project_ID")?;
        let name = sheet.require("Project_Name")?;
        let tool = sheet.require("Tool")?;
        let status = sheet.require("Project_Status")?;
        let start = sheet.require("Start_Date")?;
        let end = sheet.require("End_Date")?;

        let mut out = Vec::with_capacity(table.rows.len());
        for (line, row) in sheet.rows() {
            let Some(project_id) = cell_u64(at(row, id)) else {
                debug!(sheet = sheet.name, line, "Row without a usable Project_ID, skipped");
                continue;
            };
            let status_text = cell_string(at(row, status));
            let status = ProjectStatus::from_str(&status_text)
                .unwrap_or(ProjectStatus::Other(status_text));
            out.push(Project {
                id: project_id,
                name: cell_string(at(row, name)),
                tool: cell_string(at(row, tool)),
                status,
                start_date: self.date(sheet.name, line, at(row, start)),
                end_date: self.date(sheet.name, line, at(row, end)),
            });
        }
        Ok(out)
    }

    pub fn assignments(&mut self, table: &Table) -> Result<Vec<Assignment>, LoadError> {
        let sheet = Sheet { name: ASSIGNMENTS_SHEET, table };
        let employee = sheet.require("Employee_ID")?;
        let project = sheet.require("Project_ID")?;
        let start = sheet.require("Billing_Start_Date")?;
        let end = sheet.require("Billing_End_Date")?;
        let percentage = sheet.require("Billability_Percentage")?;

        let mut out = Vec::with_capacity(table.rows.len());
        for (line, row) in sheet.rows() {
            let (Some(employee_id), Some(project_id)) =
                (cell_u64(at(row, employee)), cell_u64(at(row, project)))
            else {
                debug!(sheet = sheet.name, line, "Assignment without usable ids, skipped");
                continue;
            };
            out.push(Assignment {
                employee_id,
                project_id,
                billing_start_date: self.date(sheet.name, line, at(row, start)),
                billing_end_date: self.date(sheet.name, line, at(row, end)),
                billability_percentage: cell_f64(at(row, percentage)),
            });
        }
        Ok(out)
    }

    pub fn daily_billing(&mut self, table: &Table) -> Result<Vec<DailyBilling>, LoadError> {
        let sheet = Sheet { name: DAILY_BILLING_SHEET, table };
        let employee = sheet.require("Employee_ID")?;
        let date = sheet.require("Date")?;
        let billed = sheet.require("Is_Billed")?;

        let mut out = Vec::with_capacity(table.rows.len());
        for (line, row) in sheet.rows() {
            let Some(employee_id) = cell_u64(at(row, employee)) else {
                continue;
            };
            let Some(day) = self.date(sheet.name, line, at(row, date)) else {
                continue;
            };
            out.push(DailyBilling {
                employee_id,
                date: day,
                is_billed: cell_flag(at(row, billed)),
            });
        }
        Ok(out)
    }
}

/// Stand-in billing data: every weekday of every dated assignment counts as billed.
pub fn derive_daily_billing(assignments: &[Assignment]) -> Vec<DailyBilling> {
    assignments
        .iter()
        .filter_map(|a| Some((a.employee_id, a.billing_start_date?, a.billing_end_date?)))
        .flat_map(|(employee_id, start, end)| {
            weekdays_between(start, end).map(move |date| DailyBilling {
                employee_id,
                date,
                is_billed: true,
            })
        })
        .collect()
}
