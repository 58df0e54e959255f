//! French month names, independent of the process locale.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Returns the French name of `month` (1-12), `None` outside that range.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTHS.get(index).copied()
}

/// Formats a date as "{month} {year}", e.g. "mars 2024".
#[must_use]
pub fn format_month_year(date: NaiveDate) -> String {
    // chrono months are always 1-12.
    let month = month_name(date.month()).unwrap_or_default();
    format!("{month} {:04}", date.year())
}
