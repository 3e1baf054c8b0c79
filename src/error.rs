use actix_web::error::BlockingError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Failure to read the workbook into a snapshot.
#[derive(Debug, Clone, Display)]
pub enum LoadError {
    #[display(fmt = "Error loading Excel file: {}", _0)]
    Source(String),

    #[display(fmt = "Error loading Excel file: missing sheet '{}'", _0)]
    MissingTable(String),

    #[display(fmt = "Error loading Excel file: sheet '{}' has no '{}' column", table, column)]
    MissingColumn { table: String, column: String },
}

impl std::error::Error for LoadError {}

/// What a request handler can fail with. Load failures and missing records are kept apart
/// so callers can tell a broken source from a bad id.
#[derive(Debug, Display)]
pub enum DashboardError {
    #[display(fmt = "{}", _0)]
    Load(LoadError),

    #[display(fmt = "Employee not found")]
    EmployeeNotFound(u64),

    #[display(fmt = "Project not found")]
    ProjectNotFound(u64),

    #[display(fmt = "Invalid tool")]
    UnknownTool(String),

    /// The blocking pool dropped the load, e.g. during shutdown.
    #[display(fmt = "Background task failed: {}", _0)]
    Blocking(String),
}

impl std::error::Error for DashboardError {}

impl From<LoadError> for DashboardError {
    fn from(e: LoadError) -> Self {
        DashboardError::Load(e)
    }
}

impl From<BlockingError> for DashboardError {
    fn from(e: BlockingError) -> Self {
        DashboardError::Blocking(e.to_string())
    }
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Load(_) | DashboardError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::EmployeeNotFound(_)
            | DashboardError::ProjectNotFound(_)
            | DashboardError::UnknownTool(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_failure_is_not_reported_as_a_workbook_error() {
        let err = DashboardError::Blocking("thread pool is gone".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Background task failed: thread pool is gone");
        assert!(!err.to_string().contains("Excel"));
    }

    #[test]
    fn load_errors_keep_their_message() {
        let err = DashboardError::from(LoadError::MissingTable("Projects".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error loading Excel file: missing sheet 'Projects'");
    }

    #[test]
    fn missing_records_are_404() {
        assert_eq!(DashboardError::EmployeeNotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(DashboardError::UnknownTool("X".to_string()).status_code(), StatusCode::NOT_FOUND);
    }
}
