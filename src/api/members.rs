use super::{YearQuery, load_snapshot};
use crate::aggregate::{self, MemberProfile};
use crate::error::DashboardError;
use crate::store::RecordStore;
use crate::utils::today;
use actix_web::{HttpResponse, web};
use chrono::Datelike;

/// Member profile: projects, monthly trend and contribution grid
#[utoipa::path(
    get,
    path = "/member/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        YearQuery
    ),
    responses(
        (status = 200, description = "Employee profile for the year", body = MemberProfile),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false,
            "error": "Employee not found"
        })),
        (status = 500, description = "Workbook could not be loaded")
    ),
    tag = "Members"
)]
pub async fn member_profile(
    store: web::Data<RecordStore>,
    path: web::Path<u64>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, DashboardError> {
    let employee_id = path.into_inner();
    let today = today();
    let year = query.year.unwrap_or_else(|| today.year());

    let snapshot = load_snapshot(&store, false).await?;
    let profile = aggregate::member_profile(&snapshot, employee_id, year, today)?;

    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn member_profile_for_a_past_year() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/member/1?year=2024").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["employee"]["name"], "Alice Johnson");
        assert_eq!(body["employee"]["joining_date"], "2023-01-10");
        assert_eq!(body["projects"].as_array().unwrap().len(), 2);
        assert_eq!(body["projects"][0]["billed_days"], 23);
        assert_eq!(body["monthly_trend"][0]["month_name"], "Jan");
        assert_eq!(body["yearly_grid"].as_array().unwrap().len(), 366);
        assert_eq!(body["yearly_grid"][0]["date"], "2024-01-01");
        assert_eq!(body["yearly_billability"], 9.1);
    }

    #[actix_web::test]
    async fn unknown_member_is_404() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/member/77").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Employee not found");
    }
}
