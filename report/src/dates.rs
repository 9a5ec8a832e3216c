//! FILENAME: report/src/dates.rs
//! Month labels for the data columns of time-series tables.
//!
//! Labels are `YYYY-MM` strings, so ascending string order is also
//! chronological order.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{ReportError, Result};

/// Display format of a month label.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Parses `YYYY-MM-DD` or `YYYY-MM` (read as the first of the month).
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d"))
        .map_err(|_| ReportError::InvalidDate(text.to_string()))
}

pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_FORMAT).to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Every month from `start` to `end`, both inclusive. Empty when `start`
/// falls in a later month than `end`.
pub fn month_labels(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let end = first_of_month(end);
    let mut current = first_of_month(start);
    let mut labels = Vec::new();

    while current <= end {
        labels.push(month_label(current));
        current = match current.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    labels
}

/// The last `months` complete billing months as of `today`.
///
/// A month's bill is settled on `billing_day` of the following month, so
/// the window ends at the previous month once that day is reached and two
/// months back before it.
pub fn billing_window(today: NaiveDate, billing_day: u32, months: u32) -> Vec<String> {
    if months == 0 {
        return Vec::new();
    }

    let back = if today.day() >= billing_day { 1 } else { 2 };
    let end = first_of_month(today).checked_sub_months(Months::new(back));
    let start = end.and_then(|end| end.checked_sub_months(Months::new(months - 1)));

    match (start, end) {
        (Some(start), Some(end)) => month_labels(start, end),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        parse_date(text).unwrap()
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(date("2025-04-17"), NaiveDate::from_ymd_opt(2025, 4, 17).unwrap());
        assert_eq!(date("2025-04"), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert!(matches!(parse_date("April"), Err(ReportError::InvalidDate(_))));
    }

    #[test]
    fn test_month_labels_inclusive() {
        assert_eq!(month_labels(date("2025-04-01"), date("2025-05-31")), vec!["2025-04", "2025-05"]);
        assert_eq!(
            month_labels(date("2024-11-15"), date("2025-02-01")),
            vec!["2024-11", "2024-12", "2025-01", "2025-02"]
        );
        assert_eq!(month_labels(date("2025-04-20"), date("2025-04-02")), vec!["2025-04"]);
        assert!(month_labels(date("2025-05-01"), date("2025-04-30")).is_empty());
    }

    #[test]
    fn test_billing_window() {
        // Before the billing day: the previous month is not settled yet.
        assert_eq!(
            billing_window(date("2023-10-04"), 5, 3),
            vec!["2023-06", "2023-07", "2023-08"]
        );
        assert_eq!(
            billing_window(date("2023-11-28"), 5, 6),
            vec!["2023-05", "2023-06", "2023-07", "2023-08", "2023-09", "2023-10"]
        );
        assert_eq!(billing_window(date("2024-01-05"), 5, 1), vec!["2023-12"]);
        assert!(billing_window(date("2024-01-05"), 5, 0).is_empty());
    }
}
