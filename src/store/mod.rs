pub mod cache;
pub mod decode;
pub mod snapshot;
pub mod source;

pub use cache::RecordStore;
pub use snapshot::{BillingOrigin, EmployeeProject, ProjectMember, Snapshot};
pub use source::{RawTables, TableSource, XlsxSource};
