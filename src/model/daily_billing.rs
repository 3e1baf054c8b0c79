use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Billing status of one employee on one day. A missing record means "not billed".
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyBilling {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "2024-03-04", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = true)]
    pub is_billed: bool,
}
