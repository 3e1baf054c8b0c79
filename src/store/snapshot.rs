use super::decode::{Decoder, derive_daily_billing};
use super::source::RawTables;
use crate::error::LoadError;
use crate::model::{Assignment, DailyBilling, Employee, Project, ProjectStatus};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

/// Where the billing records of a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingOrigin {
    Sheet,
    /// Expanded from assignment date ranges because no usable billing sheet existed.
    Derived,
}

/// One consistent, read-only copy of the four tables.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
    pub daily_billing: Vec<DailyBilling>,
    pub billing_origin: BillingOrigin,
    /// Date cells that could not be parsed and were replaced by the load date.
    pub date_fallbacks: usize,
}

/// An assignment joined with the employee it refers to.
#[derive(Debug, Clone, Copy)]
pub struct ProjectMember<'a> {
    pub assignment: &'a Assignment,
    pub employee: &'a Employee,
}

/// An assignment joined with the project it refers to.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeProject<'a> {
    pub assignment: &'a Assignment,
    pub project: &'a Project,
}

impl Snapshot {
    /// Decodes all tables. Required tables must decode; the billing table falls back to
    /// records derived from the assignments.
    pub fn from_tables(raw: &RawTables, today: NaiveDate) -> Result<Self, LoadError> {
        let mut decoder = Decoder::new(today);
        let employees = decoder.employees(&raw.employees)?;
        let projects = decoder.projects(&raw.projects)?;
        let assignments = decoder.assignments(&raw.assignments)?;

        let decoded_billing = match &raw.daily_billing {
            Some(table) => match decoder.daily_billing(table) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(error = %e, "Daily billing sheet unusable, deriving from assignments");
                    None
                }
            },
            None => None,
        };

        let (daily_billing, billing_origin) = match decoded_billing {
            Some(records) => (records, BillingOrigin::Sheet),
            None => (derive_daily_billing(&assignments), BillingOrigin::Derived),
        };

        Ok(Self {
            employees,
            projects,
            assignments,
            daily_billing,
            billing_origin,
            date_fallbacks: decoder.fallbacks,
        })
    }

    pub fn employee(&self, id: u64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn employees_by_tool(&self, tool: Option<&str>) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| tool.is_none_or(|t| e.tool == t))
            .collect()
    }

    pub fn projects_filtered(
        &self,
        status: Option<&ProjectStatus>,
        tool: Option<&str>,
    ) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| status.is_none_or(|s| &p.status == s))
            .filter(|p| tool.is_none_or(|t| p.tool == t))
            .collect()
    }

    /// Every assignment on the project whose employee exists, in assignment order.
    pub fn project_members(&self, project_id: u64) -> Vec<ProjectMember<'_>> {
        self.assignments
            .iter()
            .filter(|a| a.project_id == project_id)
            .filter_map(|assignment| {
                self.employee(assignment.employee_id)
                    .map(|employee| ProjectMember { assignment, employee })
            })
            .collect()
    }

    /// Every assignment of the employee whose project exists. With `year`, only projects
    /// starting or ending in that year are kept.
    pub fn employee_projects(&self, employee_id: u64, year: Option<i32>) -> Vec<EmployeeProject<'_>> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .filter_map(|assignment| {
                self.project(assignment.project_id)
                    .map(|project| EmployeeProject { assignment, project })
            })
            .filter(|joined| year.is_none_or(|y| joined.project.starts_or_ends_in(y)))
            .collect()
    }

    /// Billing records, each filter optional; date bounds are inclusive.
    pub fn billing_records(
        &self,
        employee_id: Option<u64>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<&DailyBilling> {
        self.daily_billing
            .iter()
            .filter(|b| employee_id.is_none_or(|id| b.employee_id == id))
            .filter(|b| start.is_none_or(|s| b.date >= s))
            .filter(|b| end.is_none_or(|e| b.date <= e))
            .collect()
    }
}
