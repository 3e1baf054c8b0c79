//! Demo workbook generator.
//!
//! Produces 30 employees (ten per tool), 20 projects spread over the year before, the
//! anchor year and the year after, 3 to 5 same-tool members per project and weekday
//! billing at an 85% rate. The workbook uses the same sheet and column names the record
//! store reads.

use crate::model::{Assignment, DailyBilling, Employee, Project, ProjectStatus};
use crate::store::source::{ASSIGNMENTS_SHEET, DAILY_BILLING_SHEET, EMPLOYEES_SHEET, PROJECTS_SHEET};
use crate::utils::calendar::weekdays_between;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::info;

const TOOLS: [&str; 3] = ["CAP360", "BREAD", "DCC"];

const EMPLOYEE_NAMES: [&str; 30] = [
    "Alice Johnson", "Bob Smith", "Charlie Brown", "Diana Prince", "Eve Adams",
    "Frank Miller", "Grace Lee", "Henry Ford", "Iris Wang", "Jack Ryan",
    "Kate Wilson", "Leo Martinez", "Maria Garcia", "Nathan Drake", "Olivia Moore",
    "Peter Parker", "Quinn Taylor", "Rachel Green", "Sam Fisher", "Tina Turner",
    "Uma Thurman", "Victor Hugo", "Wendy Williams", "Xavier Lopez", "Yara Shah",
    "Zack Morris", "Amy Chen", "Brian Cox", "Carla Diaz", "David Kim",
];

const ROLES: [&str; 10] = [
    "Senior Engineer", "Engineer", "Lead", "Engineer", "Senior Engineer",
    "Architect", "Engineer", "Lead", "Senior Engineer", "Engineer",
];

/// (id, name, tool, status, start, end); dates are (year offset from anchor, month, day).
type ProjectSeed = (u64, &'static str, &'static str, ProjectStatus, (i32, u32, u32), (i32, u32, u32));

fn project_seeds() -> [ProjectSeed; 20] {
    use ProjectStatus::{Completed, Ongoing, Upcoming};
    [
        (1, "Digital Transformation Portal", "CAP360", Ongoing, (0, 1, 15), (0, 12, 31)),
        (2, "Cloud Migration Phase 2", "CAP360", Ongoing, (0, 3, 1), (0, 12, 31)),
        (3, "Analytics Dashboard", "CAP360", Completed, (-1, 10, 1), (0, 3, 31)),
        (4, "Mobile App Redesign", "BREAD", Ongoing, (0, 2, 1), (0, 12, 31)),
        (5, "API Gateway Implementation", "BREAD", Upcoming, (1, 1, 1), (1, 6, 30)),
        (6, "Security Enhancement", "BREAD", Ongoing, (0, 4, 1), (0, 12, 31)),
        (7, "Data Warehouse Upgrade", "BREAD", Completed, (-1, 8, 1), (0, 2, 28)),
        (8, "Customer Portal V2", "DCC", Ongoing, (0, 5, 1), (0, 12, 31)),
        (9, "IoT Integration Platform", "DCC", Upcoming, (1, 2, 1), (1, 8, 31)),
        (10, "AI/ML Model Deployment", "DCC", Ongoing, (0, 6, 1), (0, 12, 31)),
        (11, "Legacy System Modernization", "CAP360", Completed, (-1, 6, 1), (0, 1, 31)),
        (12, "DevOps Pipeline", "BREAD", Ongoing, (0, 7, 1), (0, 12, 31)),
        (13, "E-commerce Platform", "DCC", Ongoing, (0, 8, 1), (0, 12, 31)),
        (14, "CRM Integration", "CAP360", Upcoming, (1, 1, 15), (1, 7, 31)),
        (15, "Blockchain POC", "BREAD", Completed, (-1, 12, 1), (0, 5, 31)),
        (16, "Microservices Architecture", "DCC", Ongoing, (0, 9, 1), (0, 12, 31)),
        (17, "Testing Automation", "CAP360", Completed, (-1, 11, 1), (0, 4, 30)),
        (18, "Performance Optimization", "BREAD", Ongoing, (0, 10, 1), (0, 12, 31)),
        (19, "Compliance Management", "DCC", Upcoming, (1, 3, 1), (1, 9, 30)),
        (20, "Digital Marketing Tools", "CAP360", Completed, (-1, 9, 1), (0, 3, 31)),
    ]
}

#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Year the "ongoing" projects run in
    pub year: i32,
    pub seed: Option<u64>,
    /// Billing is generated up to this date
    pub today: NaiveDate,
    /// Leave out the Daily_Billing sheet so readers derive it
    pub include_daily_billing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SampleData {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
    pub daily_billing: Vec<DailyBilling>,
}

fn anchored(year: i32, (offset, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year + offset, month, day)
}

pub fn generate(options: &SampleOptions) -> SampleData {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let employees: Vec<Employee> = EMPLOYEE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Employee {
            id: i as u64 + 1,
            name: name.to_string(),
            tool: TOOLS[i / 10].to_string(),
            role: ROLES[i % 10].to_string(),
            joining_date: NaiveDate::from_ymd_opt(
                options.year - 1,
                rng.gen_range(1..=12),
                rng.gen_range(1..=28),
            ),
        })
        .collect();

    let projects: Vec<Project> = project_seeds()
        .into_iter()
        .map(|(id, name, tool, status, start, end)| Project {
            id,
            name: name.to_string(),
            tool: tool.to_string(),
            status,
            start_date: anchored(options.year, start),
            end_date: anchored(options.year, end),
        })
        .collect();

    let mut assignments = Vec::new();
    for project in &projects {
        let (Some(project_start), Some(project_end)) = (project.start_date, project.end_date) else {
            continue;
        };
        let pool: Vec<u64> = employees
            .iter()
            .filter(|e| e.tool == project.tool)
            .map(|e| e.id)
            .collect();

        let team_size = rng.gen_range(3..=5).min(pool.len());
        let team: Vec<u64> = pool.choose_multiple(&mut rng, team_size).copied().collect();

        for employee_id in team {
            let start = project_start + Duration::days(rng.gen_range(0..=30));
            let end = (start + Duration::days(rng.gen_range(60..=180))).min(project_end);
            let percentage = [80.0, 85.0, 90.0, 95.0, 100.0]
                .choose(&mut rng)
                .copied()
                .unwrap_or(100.0);

            assignments.push(Assignment {
                employee_id,
                project_id: project.id,
                billing_start_date: Some(start),
                billing_end_date: Some(end),
                billability_percentage: Some(percentage),
            });
        }
    }

    let mut daily_billing = Vec::new();
    for assignment in &assignments {
        let (Some(start), Some(end)) = (assignment.billing_start_date, assignment.billing_end_date) else {
            continue;
        };
        for date in weekdays_between(start, end.min(options.today)) {
            if rng.gen_bool(0.85) {
                daily_billing.push(DailyBilling {
                    employee_id: assignment.employee_id,
                    date,
                    is_billed: true,
                });
            }
        }
    }

    SampleData {
        employees,
        projects,
        assignments,
        daily_billing,
    }
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn header(sheet: &mut Worksheet, name: &str, columns: &[&str]) -> Result<(), XlsxError> {
    sheet.set_name(name)?;
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    Ok(())
}

/// Writes the sample as a workbook; dates are `YYYY-MM-DD` text cells.
pub fn write_workbook(data: &SampleData, path: &Path, include_daily_billing: bool) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let mut employees = Worksheet::new();
    header(&mut employees, EMPLOYEES_SHEET, &["Employee_ID", "Employee_Name", "Tool", "Role", "Joining_Date"])?;
    for (i, e) in data.employees.iter().enumerate() {
        let row = i as u32 + 1;
        employees.write_number(row, 0, e.id as f64)?;
        employees.write_string(row, 1, &e.name)?;
        employees.write_string(row, 2, &e.tool)?;
        employees.write_string(row, 3, &e.role)?;
        employees.write_string(row, 4, date_text(e.joining_date))?;
    }
    workbook.push_worksheet(employees);

    let mut projects = Worksheet::new();
    header(
        &mut projects,
        PROJECTS_SHEET,
        &["Project_ID", "Project_Name", "Tool", "Project_Status", "Start_Date", "End_Date"],
    )?;
    for (i, p) in data.projects.iter().enumerate() {
        let row = i as u32 + 1;
        projects.write_number(row, 0, p.id as f64)?;
        projects.write_string(row, 1, &p.name)?;
        projects.write_string(row, 2, &p.tool)?;
        projects.write_string(row, 3, p.status.as_str())?;
        projects.write_string(row, 4, date_text(p.start_date))?;
        projects.write_string(row, 5, date_text(p.end_date))?;
    }
    workbook.push_worksheet(projects);

    let mut assignments = Worksheet::new();
    header(
        &mut assignments,
        ASSIGNMENTS_SHEET,
        &["Employee_ID", "Project_ID", "Billing_Start_Date", "Billing_End_Date", "Billability_Percentage"],
    )?;
    for (i, a) in data.assignments.iter().enumerate() {
        let row = i as u32 + 1;
        assignments.write_number(row, 0, a.employee_id as f64)?;
        assignments.write_number(row, 1, a.project_id as f64)?;
        assignments.write_string(row, 2, date_text(a.billing_start_date))?;
        assignments.write_string(row, 3, date_text(a.billing_end_date))?;
        if let Some(pct) = a.billability_percentage {
            assignments.write_number(row, 4, pct)?;
        }
    }
    workbook.push_worksheet(assignments);

    if include_daily_billing {
        let mut billing = Worksheet::new();
        header(&mut billing, DAILY_BILLING_SHEET, &["Employee_ID", "Date", "Is_Billed"])?;
        for (i, b) in data.daily_billing.iter().enumerate() {
            let row = i as u32 + 1;
            billing.write_number(row, 0, b.employee_id as f64)?;
            billing.write_string(row, 1, date_text(Some(b.date)))?;
            billing.write_string(row, 2, if b.is_billed { "Yes" } else { "No" })?;
        }
        workbook.push_worksheet(billing);
    }

    workbook.save(path)
}

/// Generate and write in one go, returning what was written.
pub fn create_sample_workbook(path: &Path, options: &SampleOptions) -> Result<SampleData, XlsxError> {
    let data = generate(options);
    write_workbook(&data, path, options.include_daily_billing)?;

    info!(
        path = %path.display(),
        employees = data.employees.len(),
        projects = data.projects.len(),
        assignments = data.assignments.len(),
        daily_billing = data.daily_billing.len(),
        "Sample workbook written"
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ymd;

    fn options(seed: u64) -> SampleOptions {
        SampleOptions {
            year: 2024,
            seed: Some(seed),
            today: ymd(2025, 6, 15),
            include_daily_billing: true,
        }
    }

    #[test]
    fn generates_the_fixed_population() {
        let data = generate(&options(7));
        assert_eq!(data.employees.len(), 30);
        assert_eq!(data.projects.len(), 20);
        assert_eq!(data.employees.iter().filter(|e| e.tool == "BREAD").count(), 10);
        assert!((60..=100).contains(&data.assignments.len()));
    }

    #[test]
    fn assignments_stay_within_their_project_and_tool() {
        let data = generate(&options(11));
        for a in &data.assignments {
            let project = data.projects.iter().find(|p| p.id == a.project_id).unwrap();
            let employee = data.employees.iter().find(|e| e.id == a.employee_id).unwrap();
            assert_eq!(project.tool, employee.tool);
            assert!(a.billing_start_date >= project.start_date);
            assert!(a.billing_end_date <= project.end_date);
        }
    }

    #[test]
    fn billing_is_weekdays_only_and_never_after_today() {
        let mut opts = options(3);
        opts.today = ymd(2024, 6, 30);
        let data = generate(&opts);
        assert!(!data.daily_billing.is_empty());
        for b in &data.daily_billing {
            assert!(!crate::utils::calendar::is_weekend(b.date));
            assert!(b.date <= opts.today);
        }
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate(&options(42));
        let b = generate(&options(42));
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.daily_billing, b.daily_billing);
    }

    #[test]
    fn projects_are_anchored_on_the_requested_year() {
        let mut opts = options(1);
        opts.year = 2026;
        let data = generate(&opts);
        let first = &data.projects[0];
        assert_eq!(first.start_date, Some(ymd(2026, 1, 15)));
        assert_eq!(data.projects[2].start_date, Some(ymd(2025, 10, 1)));
        assert_eq!(data.projects[4].end_date, Some(ymd(2027, 6, 30)));
    }
}
