//! Cross-table aggregations behind each dashboard view.
//!
//! Each builder takes a snapshot and returns a serializable view; `today` is passed in so
//! the "current month" and grid cut-off are deterministic under test.

use crate::error::DashboardError;
use crate::model::{Employee, Project, ProjectStatus};
use crate::store::Snapshot;
use crate::utils::billability::{
    MonthBillability, count_billed_days, current_projects_count, monthly_trend_as_of, round1,
    yearly_billability_from_trend, yearly_projects_count,
};
use crate::utils::calendar::{GridDay, yearly_contribution_grid_as_of};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub ongoing: Vec<Project>,
    pub upcoming: Vec<Project>,
    pub completed: Vec<Project>,
    #[schema(example = json!(["CAP360", "BREAD", "DCC"]))]
    pub tools: Vec<String>,
}

pub fn overview(snapshot: &Snapshot, tools: &[String]) -> Overview {
    let by_status = |status: ProjectStatus| -> Vec<Project> {
        snapshot
            .projects_filtered(Some(&status), None)
            .into_iter()
            .cloned()
            .collect()
    };

    Overview {
        ongoing: by_status(ProjectStatus::Ongoing),
        upcoming: by_status(ProjectStatus::Upcoming),
        completed: by_status(ProjectStatus::Completed),
        tools: tools.to_vec(),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectMemberRow {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "Alice Johnson")]
    pub employee_name: String,
    #[schema(example = "Engineer")]
    pub role: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date", nullable = true)]
    pub billing_start_date: Option<NaiveDate>,
    #[schema(example = "2024-06-30", value_type = String, format = "date", nullable = true)]
    pub billing_end_date: Option<NaiveDate>,
    #[schema(example = 84)]
    pub billed_days: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolMembers {
    #[schema(example = "CAP360")]
    pub tool: String,
    pub members: Vec<ProjectMemberRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetail {
    pub project: Project,
    /// Members grouped by tool, in configured tool order; tools without members are left out
    pub members: Vec<ToolMembers>,
}

pub fn project_detail(
    snapshot: &Snapshot,
    project_id: u64,
    tools: &[String],
) -> Result<ProjectDetail, DashboardError> {
    let project = snapshot
        .project(project_id)
        .ok_or(DashboardError::ProjectNotFound(project_id))?;

    let members = snapshot.project_members(project_id);

    let groups = tools
        .iter()
        .filter_map(|tool| {
            let rows: Vec<ProjectMemberRow> = members
                .iter()
                .filter(|m| &m.employee.tool == tool)
                .map(|m| ProjectMemberRow {
                    employee_id: m.employee.id,
                    employee_name: m.employee.name.clone(),
                    role: m.employee.role.clone(),
                    billing_start_date: m.assignment.billing_start_date,
                    billing_end_date: m.assignment.billing_end_date,
                    billed_days: count_billed_days(
                        &snapshot.daily_billing,
                        m.employee.id,
                        project_id,
                        &snapshot.assignments,
                    ),
                })
                .collect();
            (!rows.is_empty()).then(|| ToolMembers {
                tool: tool.clone(),
                members: rows,
            })
        })
        .collect();

    Ok(ProjectDetail {
        project: project.clone(),
        members: groups,
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberSummary {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "Alice Johnson")]
    pub employee_name: String,
    #[schema(example = "Engineer")]
    pub role: String,
    /// Billability of the latest month in the trend
    #[schema(example = 90.5)]
    pub current_billability: f64,
    #[schema(example = 87.2)]
    pub yearly_billability: f64,
    pub trend: Vec<MonthBillability>,
    #[schema(example = 2)]
    pub current_projects: usize,
    #[schema(example = 3)]
    pub yearly_projects: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolDashboard {
    #[schema(example = "CAP360")]
    pub tool: String,
    #[schema(example = 2024)]
    pub year: i32,
    /// Sorted by yearly billability, highest first
    pub members: Vec<MemberSummary>,
    #[schema(example = 10)]
    pub total_members: usize,
    /// Mean of the members' current billability
    #[schema(example = 82.4)]
    pub avg_billability: f64,
}

fn member_summary(snapshot: &Snapshot, employee: &Employee, year: i32, today: NaiveDate) -> MemberSummary {
    let trend = monthly_trend_as_of(&snapshot.daily_billing, employee.id, year, today);
    let current_billability = trend.last().map(|m| m.billability).unwrap_or(0.0);

    MemberSummary {
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        role: employee.role.clone(),
        current_billability,
        yearly_billability: yearly_billability_from_trend(&trend),
        trend,
        current_projects: current_projects_count(&snapshot.assignments, &snapshot.projects, employee.id),
        yearly_projects: yearly_projects_count(
            &snapshot.assignments,
            &snapshot.projects,
            employee.id,
            year,
        ),
    }
}

pub fn tool_dashboard(
    snapshot: &Snapshot,
    tool: &str,
    tools: &[String],
    year: i32,
    today: NaiveDate,
) -> Result<ToolDashboard, DashboardError> {
    if !tools.iter().any(|t| t == tool) {
        return Err(DashboardError::UnknownTool(tool.to_string()));
    }

    let mut members: Vec<MemberSummary> = snapshot
        .employees_by_tool(Some(tool))
        .into_iter()
        .map(|e| member_summary(snapshot, e, year, today))
        .collect();

    // stable: ties keep source order
    members.sort_by(|a, b| b.yearly_billability.total_cmp(&a.yearly_billability));

    let avg_billability = if members.is_empty() {
        0.0
    } else {
        round1(members.iter().map(|m| m.current_billability).sum::<f64>() / members.len() as f64)
    };

    Ok(ToolDashboard {
        tool: tool.to_string(),
        year,
        total_members: members.len(),
        members,
        avg_billability,
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberProjectRow {
    #[schema(example = 10)]
    pub project_id: u64,
    #[schema(example = "Digital Transformation Portal")]
    pub project_name: String,
    #[schema(example = "Ongoing", value_type = String)]
    pub project_status: ProjectStatus,
    /// Start of the member's billing window on the project
    #[schema(example = "2024-01-01", value_type = String, format = "date", nullable = true)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2024-06-30", value_type = String, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = 84)]
    pub billed_days: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberProfile {
    pub employee: Employee,
    #[schema(example = 2024)]
    pub year: i32,
    pub projects: Vec<MemberProjectRow>,
    pub monthly_trend: Vec<MonthBillability>,
    pub yearly_grid: Vec<GridDay>,
    #[schema(example = 87.2)]
    pub yearly_billability: f64,
}

pub fn member_profile(
    snapshot: &Snapshot,
    employee_id: u64,
    year: i32,
    today: NaiveDate,
) -> Result<MemberProfile, DashboardError> {
    let employee = snapshot
        .employee(employee_id)
        .ok_or(DashboardError::EmployeeNotFound(employee_id))?;

    let projects = snapshot
        .employee_projects(employee_id, Some(year))
        .into_iter()
        .map(|joined| MemberProjectRow {
            project_id: joined.project.id,
            project_name: joined.project.name.clone(),
            project_status: joined.project.status.clone(),
            start_date: joined.assignment.billing_start_date,
            end_date: joined.assignment.billing_end_date,
            billed_days: count_billed_days(
                &snapshot.daily_billing,
                employee_id,
                joined.project.id,
                &snapshot.assignments,
            ),
        })
        .collect();

    let monthly_trend = monthly_trend_as_of(&snapshot.daily_billing, employee_id, year, today);
    let yearly_billability = yearly_billability_from_trend(&monthly_trend);

    Ok(MemberProfile {
        employee: employee.clone(),
        year,
        projects,
        yearly_grid: yearly_contribution_grid_as_of(&snapshot.daily_billing, employee_id, year, today),
        monthly_trend,
        yearly_billability,
    })
}
