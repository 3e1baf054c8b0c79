use super::{YearQuery, load_snapshot};
use crate::aggregate::{self, ToolDashboard};
use crate::config::Config;
use crate::error::DashboardError;
use crate::store::RecordStore;
use crate::utils::today;
use actix_web::{HttpResponse, web};
use chrono::Datelike;
use tracing::instrument;

/// Tool dashboard: billability figures for every member of a tool
#[utoipa::path(
    get,
    path = "/tool/{tool_name}",
    params(
        ("tool_name", Path, description = "Tool name, one of the configured tools"),
        YearQuery
    ),
    responses(
        (status = 200, description = "Per-member billability for the tool", body = ToolDashboard),
        (status = 404, description = "Unknown tool", body = Object, example = json!({
            "success": false,
            "error": "Invalid tool"
        })),
        (status = 500, description = "Workbook could not be loaded")
    ),
    tag = "Tools"
)]
#[instrument(name = "tool_dashboard", skip(store, config, query))]
pub async fn tool_dashboard(
    store: web::Data<RecordStore>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, DashboardError> {
    let tool_name = path.into_inner();
    let today = today();
    let year = query.year.unwrap_or_else(|| today.year());
    let snapshot = load_snapshot(&store, false).await?;
    let dashboard = aggregate::tool_dashboard(&snapshot, &tool_name, &config.tools, year, today)?;

    Ok(HttpResponse::Ok().json(dashboard))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn tool_dashboard_for_a_past_year() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/tool/CAP360?year=2024").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["tool"], "CAP360");
        assert_eq!(body["year"], 2024);
        assert_eq!(body["total_members"], 2);
        assert_eq!(body["members"][0]["employee_id"], 1);
        assert_eq!(body["members"][0]["yearly_billability"], 9.1);
        assert_eq!(body["members"][0]["trend"].as_array().unwrap().len(), 12);
    }

    #[actix_web::test]
    async fn unknown_tool_is_404() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/tool/UNKNOWN").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
