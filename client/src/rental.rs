use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Adds calendar months, letting a day past the end of the target month roll
/// over into the next one (Jan 31 + 1 month is Mar 2 in a leap year).
/// `None` when the result leaves chrono's date range.
pub fn calculate_rental_end_date(start: NaiveDate, duration_months: i32) -> Option<NaiveDate> {
    let total = start
        .year()
        .checked_mul(12)?
        .checked_add(start.month0() as i32)?
        .checked_add(duration_months)?;
    let first_of_month = NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)?;
    first_of_month.checked_add_days(Days::new(u64::from(start.day() - 1)))
}

/// Whole days from `now` until the agreement ends, rounded up. Negative once it has ended.
pub fn days_until_expiry_at(start: NaiveDate, duration_months: i32, now: NaiveDateTime) -> Option<i64> {
    let end = calculate_rental_end_date(start, duration_months)?.and_hms_opt(0, 0, 0)?;
    let remaining = end.signed_duration_since(now).num_milliseconds() as f64;
    Some((remaining / MILLIS_PER_DAY).ceil() as i64)
}

pub fn days_until_expiry(start: NaiveDate, duration_months: i32) -> Option<i64> {
    days_until_expiry_at(start, duration_months, Utc::now().naive_utc())
}
