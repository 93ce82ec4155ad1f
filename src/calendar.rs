use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{LedgerError, Result};

/// whole calendar months elapsed between two dates
///
/// counts `(year_diff * 12 + month_diff)`, then subtracts one when the end
/// day-of-month falls before the start day-of-month. a partial final month
/// never counts as elapsed; anything at or before `from` counts as zero.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }

    months.max(0) as u32
}

/// add whole calendar months, clamping to the last day of shorter months
/// (jan 31 + 1 month = feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| LedgerError::InvalidDate {
            message: format!("{date} plus {months} months is outside the supported calendar"),
        })
}

/// (year, month) pair used for sequence issuance
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
