use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use strum_macros::EnumString;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum ProjectStatus {
    Ongoing,
    Upcoming,
    Completed,
    /// Anything else found in the sheet, kept verbatim
    #[strum(default)]
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Upcoming => "Upcoming",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Other(s) => s,
        }
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Digital Transformation Portal",
        "tool": "CAP360",
        "status": "Ongoing",
        "start_date": "2024-01-15",
        "end_date": "2024-12-31"
    })
)]
pub struct Project {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Digital Transformation Portal")]
    pub name: String,

    #[schema(example = "CAP360")]
    pub tool: String,

    #[schema(example = "Ongoing", value_type = String)]
    pub status: ProjectStatus,

    #[schema(example = "2024-01-15", value_type = String, format = "date", nullable = true)]
    pub start_date: Option<NaiveDate>,

    #[schema(example = "2024-12-31", value_type = String, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// True when the project starts or ends in `year`. Open-ended projects never match.
    pub fn starts_or_ends_in(&self, year: i32) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start.year() == year || end.year() == year,
            _ => false,
        }
    }
}
