//! Business-day anchors for payment due dates.
//!
//! A business day is Monday through Friday; holidays are not modelled.
//! The lenient functions never fail: if a computation cannot be completed
//! they log a warning and fall back to today's date. Callers that need strict
//! behavior use the `try_*` variants.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use tracing::warn;

use crate::core::{AppError, Result};

/// Accepted textual date layouts, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Moves a Saturday back to Friday (1 day) and a Sunday back to Friday (2 days).
pub fn business_day_on_or_before(date: NaiveDate) -> Result<NaiveDate> {
    let back = match date.weekday() {
        Weekday::Sat => 1,
        Weekday::Sun => 2,
        _ => return Ok(date),
    };

    date.checked_sub_days(Days::new(back))
        .ok_or_else(|| AppError::invalid_date(format!("{} has no preceding business day", date)))
}

/// Moves a Saturday forward to Monday (2 days) and a Sunday forward to Monday (1 day).
pub fn business_day_on_or_after(date: NaiveDate) -> Result<NaiveDate> {
    let forward = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => return Ok(date),
    };

    date.checked_add_days(Days::new(forward))
        .ok_or_else(|| AppError::invalid_date(format!("{} has no following business day", date)))
}

fn last_day_of_month(reference: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if reference.month() == 12 {
        (reference.year() + 1, 1)
    } else {
        (reference.year(), reference.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or_else(|| AppError::invalid_date(format!("{} is outside the supported range", reference)))
}

/// Last calendar day of `reference`'s month, moved back onto a Friday when it
/// falls on a weekend.
pub fn try_last_business_day_of_month(reference: NaiveDate) -> Result<NaiveDate> {
    business_day_on_or_before(last_day_of_month(reference)?)
}

/// `reference` adjusted onto a business day, then one calendar day earlier.
///
/// The final step is a flat decrement: a Monday reference yields the Sunday
/// before it.
pub fn try_penultimate_business_day(reference: NaiveDate) -> Result<NaiveDate> {
    business_day_on_or_before(reference)?
        .pred_opt()
        .ok_or_else(|| AppError::invalid_date(format!("{} has no preceding day", reference)))
}

/// Lenient form of [`try_last_business_day_of_month`]; `None` means today.
pub fn last_business_day_of_month(reference: Option<NaiveDate>) -> NaiveDate {
    let reference = reference.unwrap_or_else(today);
    try_last_business_day_of_month(reference).unwrap_or_else(|e| fallback("last_business_day_of_month", e))
}

/// Lenient form of [`try_penultimate_business_day`]; `None` means today.
pub fn penultimate_business_day(reference: Option<NaiveDate>) -> NaiveDate {
    let reference = reference.unwrap_or_else(today);
    try_penultimate_business_day(reference).unwrap_or_else(|e| fallback("penultimate_business_day", e))
}

/// Alias of [`penultimate_business_day`].
pub fn current_or_last_business_day(reference: Option<NaiveDate>) -> NaiveDate {
    penultimate_business_day(reference)
}

pub fn parse_reference_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| AppError::invalid_date(format!("Unrecognized date '{}'", input)))
}

pub fn last_business_day_of_month_from_str(input: &str) -> NaiveDate {
    match parse_reference_date(input) {
        Ok(reference) => last_business_day_of_month(Some(reference)),
        Err(e) => fallback("last_business_day_of_month", e),
    }
}

pub fn penultimate_business_day_from_str(input: &str) -> NaiveDate {
    match parse_reference_date(input) {
        Ok(reference) => penultimate_business_day(Some(reference)),
        Err(e) => fallback("penultimate_business_day", e),
    }
}

fn fallback(operation: &str, error: AppError) -> NaiveDate {
    let now = today();
    warn!(operation, error = %error, fallback = %now, "Calendar computation failed, using current date");
    now
}
