//! Utilization figures computed from daily billing records.
//!
//! Everything here is a pure function over slices of the snapshot; nothing is cached.
//! Functions that depend on the current date have an `_as_of` form taking `today`.

use super::calendar::working_days_in_month;
use crate::model::{Assignment, DailyBilling, Project, ProjectStatus};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

/// Round to one decimal place, ties to even.
///
/// Rounds the exact decimal expansion of the stored value, so `28.25` (exact in binary)
/// becomes `28.2` while `0.35` (stored just below) becomes `0.3`.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Billed days over working days in the month, as a percentage with one decimal.
/// Any billed record in the month counts, weekend ones included.
pub fn monthly_billability(records: &[DailyBilling], employee_id: u64, year: i32, month: u32) -> f64 {
    let billed_days = records
        .iter()
        .filter(|r| {
            r.employee_id == employee_id
                && r.is_billed
                && r.date.year() == year
                && r.date.month() == month
        })
        .count();

    let working_days = working_days_in_month(year, month);
    if working_days == 0 {
        return 0.0;
    }

    round1(billed_days as f64 / f64::from(working_days) * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthBillability {
    #[schema(example = 1)]
    pub month: u32,
    #[schema(example = "Jan")]
    pub month_name: String,
    #[schema(example = 95.7)]
    pub billability: f64,
}

/// January through the current month for the current year, all twelve months otherwise.
pub fn monthly_trend_as_of(
    records: &[DailyBilling],
    employee_id: u64,
    year: i32,
    today: NaiveDate,
) -> Vec<MonthBillability> {
    let last_month = if year == today.year() { today.month() } else { 12 };

    (1..=last_month)
        .filter_map(|month| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthBillability {
                month,
                month_name: first.format("%b").to_string(),
                billability: monthly_billability(records, employee_id, year, month),
            })
        })
        .collect()
}

pub fn monthly_trend(records: &[DailyBilling], employee_id: u64, year: i32) -> Vec<MonthBillability> {
    monthly_trend_as_of(records, employee_id, year, super::today())
}

/// Plain mean of the monthly figures: every month weighs the same regardless of how
/// many working days it has.
pub fn yearly_billability_from_trend(trend: &[MonthBillability]) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }
    let total: f64 = trend.iter().map(|m| m.billability).sum();
    round1(total / trend.len() as f64)
}

pub fn yearly_billability_as_of(
    records: &[DailyBilling],
    employee_id: u64,
    year: i32,
    today: NaiveDate,
) -> f64 {
    yearly_billability_from_trend(&monthly_trend_as_of(records, employee_id, year, today))
}

pub fn yearly_billability(records: &[DailyBilling], employee_id: u64, year: i32) -> f64 {
    yearly_billability_as_of(records, employee_id, year, super::today())
}

/// Billed days of the employee inside the billing window of their assignment to the
/// project.
///
/// Known limitation: when the pair has several assignments only the first one in source
/// order is considered, later windows are ignored.
pub fn count_billed_days(
    records: &[DailyBilling],
    employee_id: u64,
    project_id: u64,
    assignments: &[Assignment],
) -> usize {
    let Some(assignment) = assignments
        .iter()
        .find(|a| a.employee_id == employee_id && a.project_id == project_id)
    else {
        return 0;
    };

    records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.is_billed && assignment.covers(r.date))
        .count()
}

/// Assignments of the employee on ongoing projects. Two assignments to the same project
/// count twice.
pub fn current_projects_count(assignments: &[Assignment], projects: &[Project], employee_id: u64) -> usize {
    assignments
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .filter(|a| {
            projects
                .iter()
                .find(|p| p.id == a.project_id)
                .is_some_and(|p| p.status == ProjectStatus::Ongoing)
        })
        .count()
}

/// Distinct projects of the employee that start or end in `year`.
pub fn yearly_projects_count(
    assignments: &[Assignment],
    projects: &[Project],
    employee_id: u64,
    year: i32,
) -> usize {
    assignments
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .filter_map(|a| projects.iter().find(|p| p.id == a.project_id))
        .filter(|p| p.starts_or_ends_in(year))
        .map(|p| p.id)
        .collect::<HashSet<_>>()
        .len()
}
