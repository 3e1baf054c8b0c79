use crate::model::DailyBilling;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Monday to Friday dates from `start` to `end`, both inclusive.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
        .filter(|d| !is_weekend(*d))
}

/// Monday to Friday dates in the month. No holiday calendar; an invalid month has none.
pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| !is_weekend(*d))
        .count() as u32
}

/// One cell of the contribution grid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridDay {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    /// 1 when a billed record exists for the day, else 0
    #[schema(example = 1)]
    pub is_billed: u8,
    #[schema(example = false)]
    pub is_weekend: bool,
    /// Monday is 0
    #[schema(example = 0)]
    pub day_of_week: u32,
    #[schema(example = 1)]
    pub iso_week: u32,
}

/// Every calendar day from Jan 1 of `year` through Dec 31 or `today`, whichever comes
/// first. Weekends are included and flagged.
pub fn yearly_contribution_grid_as_of(
    records: &[DailyBilling],
    employee_id: u64,
    year: i32,
    today: NaiveDate,
) -> Vec<GridDay> {
    let (Some(start), Some(year_end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };
    let end = year_end.min(today);

    let billed: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.is_billed && r.date.year() == year)
        .map(|r| r.date)
        .collect();

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| GridDay {
            date,
            is_billed: u8::from(billed.contains(&date)),
            is_weekend: is_weekend(date),
            day_of_week: date.weekday().num_days_from_monday(),
            iso_week: date.iso_week().week(),
        })
        .collect()
}

pub fn yearly_contribution_grid(records: &[DailyBilling], employee_id: u64, year: i32) -> Vec<GridDay> {
    yearly_contribution_grid_as_of(records, employee_id, year, super::today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_snapshot, ymd};

    #[test]
    fn working_days_match_known_months() {
        assert_eq!(working_days_in_month(2024, 1), 23);
        assert_eq!(working_days_in_month(2024, 2), 21);
        assert_eq!(working_days_in_month(2024, 3), 21);
        assert_eq!(working_days_in_month(2023, 2), 20);
        assert_eq!(working_days_in_month(2024, 6), 20);
    }

    #[test]
    fn invalid_month_has_no_working_days() {
        assert_eq!(working_days_in_month(2024, 13), 0);
        assert_eq!(working_days_in_month(2024, 0), 0);
    }

    #[test]
    fn weekdays_between_skips_weekends() {
        // Friday .. next Monday
        let days: Vec<NaiveDate> = weekdays_between(ymd(2024, 3, 1), ymd(2024, 3, 4)).collect();
        assert_eq!(days, vec![ymd(2024, 3, 1), ymd(2024, 3, 4)]);
        assert_eq!(weekdays_between(ymd(2024, 3, 4), ymd(2024, 3, 1)).count(), 0);
    }

    #[test]
    fn grid_for_a_past_year_covers_every_day() {
        let snapshot = fixture_snapshot();
        let grid = yearly_contribution_grid_as_of(&snapshot.daily_billing, 1, 2024, ymd(2025, 6, 15));

        assert_eq!(grid.len(), 366);
        assert_eq!(grid.first().unwrap().date, ymd(2024, 1, 1));
        assert_eq!(grid.last().unwrap().date, ymd(2024, 12, 31));
        for day in &grid {
            assert_eq!(day.is_weekend, day.day_of_week >= 5, "{}", day.date);
        }
    }

    #[test]
    fn grid_marks_billed_days_including_weekends() {
        let snapshot = fixture_snapshot();
        let grid = yearly_contribution_grid_as_of(&snapshot.daily_billing, 1, 2024, ymd(2025, 6, 15));
        let day = |d: NaiveDate| grid.iter().find(|g| g.date == d).unwrap();

        assert_eq!(day(ymd(2024, 1, 2)).is_billed, 1);
        // Saturday with a billed record
        let saturday = day(ymd(2024, 2, 3));
        assert_eq!(saturday.is_billed, 1);
        assert!(saturday.is_weekend);
        // recorded as not billed
        assert_eq!(day(ymd(2024, 3, 5)).is_billed, 0);
        // no record
        assert_eq!(day(ymd(2024, 7, 1)).is_billed, 0);

        let billed_total: u32 = grid.iter().map(|g| u32::from(g.is_billed)).sum();
        assert_eq!(billed_total, 25);
    }

    #[test]
    fn grid_for_the_current_year_stops_today() {
        let snapshot = fixture_snapshot();
        let grid = yearly_contribution_grid_as_of(&snapshot.daily_billing, 1, 2024, ymd(2024, 3, 10));
        assert_eq!(grid.len(), 31 + 29 + 10);
        assert_eq!(grid.last().unwrap().date, ymd(2024, 3, 10));
        assert_eq!(grid[0].iso_week, 1);
    }

    #[test]
    fn grid_for_a_future_year_is_empty() {
        assert!(yearly_contribution_grid_as_of(&[], 1, 2030, ymd(2025, 1, 1)).is_empty());
    }
}
