pub mod billability;
pub mod calendar;

use chrono::{Local, NaiveDate};

/// The local calendar date, the reference point for "current month" and grid cut-offs.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
