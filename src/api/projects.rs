use super::load_snapshot;
use crate::aggregate::{self, Overview, ProjectDetail};
use crate::config::Config;
use crate::error::DashboardError;
use crate::model::{Project, ProjectStatus};
use crate::store::RecordStore;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectFilter {
    /// Ongoing, Upcoming or Completed
    pub status: Option<String>,
    /// Tool name, e.g. CAP360
    pub tool: Option<String>,
}

/// Projects grouped by status
#[utoipa::path(
    get,
    path = "/overview",
    responses(
        (status = 200, description = "Projects grouped by status", body = Overview),
        (status = 500, description = "Workbook could not be loaded", body = Object, example = json!({
            "success": false,
            "error": "Error loading Excel file: missing sheet 'Projects'"
        }))
    ),
    tag = "Projects"
)]
pub async fn overview(
    store: web::Data<RecordStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, DashboardError> {
    let snapshot = load_snapshot(&store, false).await?;
    Ok(HttpResponse::Ok().json(aggregate::overview(&snapshot, &config.tools)))
}

/// List projects
#[utoipa::path(
    get,
    path = "/projects",
    params(ProjectFilter),
    responses(
        (status = 200, description = "Filtered project list", body = [Project]),
        (status = 500, description = "Workbook could not be loaded")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    store: web::Data<RecordStore>,
    query: web::Query<ProjectFilter>,
) -> Result<HttpResponse, DashboardError> {
    let snapshot = load_snapshot(&store, false).await?;

    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| ProjectStatus::from_str(s).unwrap_or_else(|_| ProjectStatus::Other(s.to_string())));
    let tool = query.tool.as_deref().filter(|t| !t.is_empty());
    debug!(?status, ?tool, "Listing projects");

    let projects: Vec<Project> = snapshot
        .projects_filtered(status.as_ref(), tool)
        .into_iter()
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(projects))
}

/// Project details with team members grouped by tool
#[utoipa::path(
    get,
    path = "/project/{project_id}",
    params(
        ("project_id", Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project and its members", body = ProjectDetail),
        (status = 404, description = "Project not found", body = Object, example = json!({
            "success": false,
            "error": "Project not found"
        })),
        (status = 500, description = "Workbook could not be loaded")
    ),
    tag = "Projects"
)]
pub async fn project_details(
    store: web::Data<RecordStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, DashboardError> {
    let project_id = path.into_inner();
    let snapshot = load_snapshot(&store, false).await?;
    let detail = aggregate::project_detail(&snapshot, project_id, &config.tools)?;
    Ok(HttpResponse::Ok().json(detail))
}

#[cfg(test)]
mod tests {
    use crate::store::RecordStore;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;
    use std::time::Duration;

    #[actix_web::test]
    async fn overview_lists_projects_by_status() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/overview").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ongoing"].as_array().unwrap().len(), 2);
        assert_eq!(body["upcoming"][0]["id"], 13);
        assert_eq!(body["completed"][0]["status"], "Completed");
    }

    #[actix_web::test]
    async fn projects_can_be_filtered() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/projects?status=Ongoing&tool=BREAD")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let projects = body.as_array().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0]["id"], 12);
        assert_eq!(projects[0]["start_date"], "2024-02-01");
    }

    #[actix_web::test]
    async fn project_details_group_members() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/project/10").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["project"]["name"], "Portal");
        assert_eq!(body["members"][0]["tool"], "CAP360");
        assert_eq!(body["members"][0]["members"][0]["billed_days"], 23);
    }

    #[actix_web::test]
    async fn unknown_project_is_404() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/project/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Project not found");
    }

    #[actix_web::test]
    async fn unreadable_source_is_500() {
        let app = test_app!(RecordStore::open_xlsx("missing/workbook.xlsx", Duration::from_secs(300)));
        let req = test::TestRequest::get().uri("/api/overview").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
