use super::load_snapshot;
use crate::error::DashboardError;
use crate::store::RecordStore;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::info;

/// Force reload of the workbook
#[utoipa::path(
    post,
    path = "/reload",
    responses(
        (status = 200, description = "Data reloaded", body = Object, example = json!({
            "success": true,
            "message": "Data reloaded successfully"
        })),
        (status = 429, description = "Too many reload requests"),
        (status = 500, description = "Workbook could not be loaded", body = Object, example = json!({
            "success": false,
            "error": "Error loading Excel file: missing sheet 'Employees'"
        }))
    ),
    tag = "Data"
)]
pub async fn reload_data(store: web::Data<RecordStore>) -> Result<HttpResponse, DashboardError> {
    let snapshot = load_snapshot(&store, true).await?;
    info!(
        employees = snapshot.employees.len(),
        projects = snapshot.projects.len(),
        "Data reloaded on request"
    );

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Data reloaded successfully"
    })))
}
