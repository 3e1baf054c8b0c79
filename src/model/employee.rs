use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice Johnson",
        "tool": "CAP360",
        "role": "Senior Engineer",
        "joining_date": "2023-04-12"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Alice Johnson")]
    pub name: String,

    /// Organizational grouping the employee belongs to
    #[schema(example = "CAP360")]
    pub tool: String,

    #[schema(example = "Senior Engineer")]
    pub role: String,

    #[schema(
        example = "2023-04-12",
        value_type = String,
        format = "date",
        nullable = true
    )]
    pub joining_date: Option<NaiveDate>,
}
