use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// One employee's tenure on one project.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Assignment {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 4)]
    pub project_id: u64,

    #[schema(example = "2024-02-10", value_type = String, format = "date", nullable = true)]
    pub billing_start_date: Option<NaiveDate>,

    #[schema(example = "2024-06-30", value_type = String, format = "date", nullable = true)]
    pub billing_end_date: Option<NaiveDate>,

    #[schema(example = 90.0, nullable = true)]
    pub billability_percentage: Option<f64>,
}

impl Assignment {
    /// Inclusive on both ends; an unset bound is treated as open.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.billing_start_date.is_none_or(|start| date >= start)
            && self.billing_end_date.is_none_or(|end| date <= end)
    }
}
