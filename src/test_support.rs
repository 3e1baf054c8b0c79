//! Shared fixture for unit tests.
//!
//! Employees 1, 2 (CAP360), 3 (BREAD), 4 (DCC). Projects 10 (CAP360, ongoing, 2024),
//! 11 (CAP360, completed, 2023), 12 (BREAD, ongoing, 2024), 13 (DCC, upcoming, 2025).
//! Employee 1 has two assignments on project 10 (January and March 2024) and billed
//! every weekday of January 2024, one Saturday in February and one day in March.

use crate::config::Config;
use crate::error::LoadError;
use crate::store::source::{Cell, RawTables, Table, TableSource};
use crate::store::snapshot::Snapshot;
use crate::utils::calendar::weekdays_between;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn text(s: &str) -> Cell {
    Cell::from(s)
}

fn billing_row(employee_id: i64, date: NaiveDate, billed: &str) -> Vec<Cell> {
    vec![Cell::Int(employee_id), text(&date.to_string()), text(billed)]
}

pub fn fixture_tables() -> RawTables {
    let employees = Table::new(
        &["Employee_ID", "Employee_Name", "Tool", "Role", "Joining_Date"],
        vec![
            vec![Cell::Int(1), text("Alice Johnson"), text("CAP360"), text("Engineer"), text("2023-01-10")],
            vec![Cell::Int(2), text("Bob Smith"), text("CAP360"), text("Lead"), text("2023-02-01")],
            vec![Cell::Int(3), text("Carla Diaz"), text("BREAD"), text("Architect"), text("2023-03-01")],
            vec![Cell::Int(4), text("David Kim"), text("DCC"), text("Engineer"), text("2023-04-01")],
        ],
    );

    let projects = Table::new(
        &["Project_ID", "Project_Name", "Tool", "Project_Status", "Start_Date", "End_Date"],
        vec![
            vec![Cell::Int(10), text("Portal"), text("CAP360"), text("Ongoing"), text("2024-01-01"), text("2024-12-31")],
            vec![Cell::Int(11), text("Legacy"), text("CAP360"), text("Completed"), text("2023-06-01"), text("2023-12-31")],
            vec![Cell::Int(12), text("Mobile"), text("BREAD"), text("Ongoing"), text("2024-02-01"), text("2024-12-31")],
            vec![Cell::Int(13), text("Gateway"), text("DCC"), text("Upcoming"), text("2025-01-01"), text("2025-06-30")],
        ],
    );

    let assignments = Table::new(
        &["Employee_ID", "Project_ID", "Billing_Start_Date", "Billing_End_Date", "Billability_Percentage"],
        vec![
            vec![Cell::Int(1), Cell::Int(10), text("2024-01-01"), text("2024-01-31"), Cell::Int(100)],
            vec![Cell::Int(1), Cell::Int(11), text("2023-06-01"), text("2023-12-31"), Cell::Int(90)],
            vec![Cell::Int(99), Cell::Int(10), text("2024-01-01"), text("2024-03-31"), Cell::Int(80)],
            vec![Cell::Int(2), Cell::Int(10), text("2024-02-01"), text("2024-06-30"), Cell::Int(80)],
            vec![Cell::Int(1), Cell::Int(10), text("2024-03-01"), text("2024-03-31"), Cell::Int(100)],
            vec![Cell::Int(3), Cell::Int(12), text("2024-02-01"), text("2024-12-31"), Cell::Float(85.0)],
        ],
    );

    let mut billing: Vec<Vec<Cell>> = weekdays_between(ymd(2024, 1, 1), ymd(2024, 1, 31))
        .map(|d| billing_row(1, d, "Yes"))
        .collect();
    billing.push(billing_row(1, ymd(2024, 2, 3), "Yes"));
    billing.push(billing_row(1, ymd(2024, 3, 4), "Yes"));
    billing.push(billing_row(1, ymd(2024, 3, 5), "No"));
    billing.push(billing_row(2, ymd(2024, 2, 1), "Yes"));
    billing.push(billing_row(2, ymd(2024, 2, 2), "Yes"));
    billing.push(billing_row(2, ymd(2024, 7, 1), "Yes"));

    RawTables {
        employees,
        projects,
        assignments,
        daily_billing: Some(Table::new(&["Employee_ID", "Date", "Is_Billed"], billing)),
    }
}

pub fn fixture_snapshot() -> Snapshot {
    Snapshot::from_tables(&fixture_tables(), ymd(2025, 6, 15)).unwrap()
}

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        excel_file_path: "unused.xlsx".into(),
        cache_timeout: Duration::from_secs(300),
        tools: vec!["CAP360".into(), "BREAD".into(), "DCC".into()],
        api_prefix: "/api".into(),
        rate_reload_per_min: 1000,
        log_dir: "logs".into(),
    }
}

/// In-memory source that counts reads, can be told to fail, and can be slowed down.
pub struct MemorySource {
    tables: RawTables,
    delay: Duration,
    pub reads: AtomicUsize,
    pub fail: AtomicBool,
}

impl MemorySource {
    pub fn new(tables: RawTables) -> Self {
        Self {
            tables,
            delay: Duration::ZERO,
            reads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl TableSource for MemorySource {
    fn read_tables(&self) -> Result<RawTables, LoadError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LoadError::Source("source unavailable".into()));
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok(self.tables.clone())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

/// Initialise the routed app around a store, the fixture store by default.
macro_rules! test_app {
    ($store:expr) => {{
        let config = $crate::test_support::test_config();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($store))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| $crate::routes::configure(cfg, config.clone())),
        )
        .await
    }};
    () => {
        test_app!($crate::store::RecordStore::new(
            $crate::test_support::MemorySource::new($crate::test_support::fixture_tables()),
            std::time::Duration::from_secs(300),
        ))
    };
}
