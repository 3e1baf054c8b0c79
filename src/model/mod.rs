pub mod assignment;
pub mod daily_billing;
pub mod employee;
pub mod project;

pub use assignment::Assignment;
pub use daily_billing::DailyBilling;
pub use employee::Employee;
pub use project::{Project, ProjectStatus};
