use crate::aggregate::{
    MemberProfile, MemberProjectRow, MemberSummary, Overview, ProjectDetail, ProjectMemberRow,
    ToolDashboard, ToolMembers,
};
use crate::model::{Assignment, DailyBilling, Employee, Project};
use crate::utils::billability::MonthBillability;
use crate::utils::calendar::GridDay;
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Billability Dashboard API",
        version = "0.1.0",
        description = r#"
## Billability Dashboard

Read-only utilization metrics computed from a project assignment workbook.

### 🔹 Views
- **Overview**: projects grouped into ongoing, upcoming and completed
- **Project details**: team members grouped by tool, with billed days per member
- **Tool dashboard**: monthly and yearly billability for every member of a tool
- **Member profile**: projects, monthly trend and a day-by-day contribution grid

### 📦 Data
- Loaded from an `.xlsx` workbook (`Employees`, `Projects`, `Project_Assignments`, optional `Daily_Billing`)
- Cached in memory for a few minutes; `POST {prefix}/reload` forces a re-read

---
Built with **Rust**, **Actix Web**, **calamine** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::projects::overview,
        crate::api::projects::list_projects,
        crate::api::projects::project_details,

        crate::api::tools::tool_dashboard,

        crate::api::members::member_profile,

        crate::api::reload::reload_data
    ),
    components(
        schemas(
            Employee,
            Project,
            Assignment,
            DailyBilling,
            Overview,
            ProjectDetail,
            ToolMembers,
            ProjectMemberRow,
            ToolDashboard,
            MemberSummary,
            MemberProfile,
            MemberProjectRow,
            MonthBillability,
            GridDay
        )
    ),
    tags(
        (name = "Projects", description = "Project listings and details"),
        (name = "Tools", description = "Per-tool billability dashboards"),
        (name = "Members", description = "Individual member profiles"),
        (name = "Data", description = "Workbook cache control"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with paths served under `api_prefix`.
pub fn api_doc(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(api_prefix)]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_relative_to_the_configured_prefix() {
        let doc = api_doc("/billing/v1");

        let servers = doc.servers.unwrap_or_default();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "/billing/v1");

        assert!(doc.paths.paths.contains_key("/tool/{tool_name}"));
        assert!(doc.paths.paths.contains_key("/reload"));
        assert!(doc.paths.paths.keys().all(|p| !p.starts_with("/api")));
    }
}
