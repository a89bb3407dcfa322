//! Display helpers shared by the listing pages: prices, dates, status labels
//! and the CSS classes of status badges.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::PropertyType;

const CURRENCY: &str = "LKR";

/// Whole-unit LKR amount with thousands separators. `None`, zero and
/// non-finite values read `N/A`; rent prices get a `/month` suffix. The
/// currency code is followed by a plain ASCII space, not the no-break space
/// a browser's currency formatter emits.
pub fn format_price(price: Option<f64>, kind: Option<&str>) -> String {
    let price = match price {
        Some(p) if p != 0.0 && p.is_finite() => p,
        _ => return "N/A".to_string(),
    };

    let sign = if price < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", price.abs().round());
    let formatted = format!("{}{} {}", sign, CURRENCY, group_thousands(&digits));

    if kind == Some(PropertyType::Rent.as_str()) {
        format!("{}/month", formatted)
    } else {
        formatted
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Long US date, e.g. `March 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Like [`format_date`] for the ISO strings the backend sends. Anything
/// unparsable reads `Invalid Date`.
pub fn format_date_str(value: &str) -> String {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match date {
        Some(date) => format_date(date),
        None => "Invalid Date".to_string(),
    }
}

pub fn status_class(status: &str) -> &'static str {
    match status {
        "AVAILABLE" => "status-available",
        "SOLD" => "status-sold",
        "RENTED" => "status-rented",
        "PENDING" => "status-pending",
        "CONFIRMED" => "status-confirmed",
        "CANCELLED" => "status-cancelled",
        _ => "status-default",
    }
}

pub fn inquiry_status_class(status: &str) -> &'static str {
    match status {
        "OPEN" => "status-pending",
        "RESOLVED" => "status-confirmed",
        "ARCHIVED" => "status-cancelled",
        _ => "status-default",
    }
}

pub fn offer_status_class(status: &str) -> &'static str {
    match status {
        "PENDING" => "status-pending",
        "ACCEPTED" => "status-confirmed",
        "REJECTED" | "EXPIRED" => "status-cancelled",
        "COUNTERED" => "status-warning",
        _ => "status-default",
    }
}

// Label lookups fall back to the raw status.

pub fn format_rental_status(status: &str) -> &str {
    match status {
        "ACTIVE" => "Active",
        "EXPIRED" => "Expired",
        "TERMINATED" => "Terminated",
        other => other,
    }
}

pub fn format_booking_status(status: &str) -> &str {
    match status {
        "PENDING" => "Pending",
        "CONFIRMED" => "Confirmed",
        "CANCELLED" => "Cancelled",
        other => other,
    }
}

pub fn format_inquiry_status(status: &str) -> &str {
    match status {
        "OPEN" => "Open",
        "RESOLVED" => "Resolved",
        "ARCHIVED" => "Archived",
        other => other,
    }
}

pub fn format_offer_status(status: &str) -> &str {
    match status {
        "PENDING" => "Pending",
        "ACCEPTED" => "Accepted",
        "REJECTED" => "Rejected",
        "COUNTERED" => "Countered",
        "EXPIRED" => "Expired",
        other => other,
    }
}
