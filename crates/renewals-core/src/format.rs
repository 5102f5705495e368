//! Display formatting (en-US, USD)

use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Capitalized month name for a 0-11 index
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month as usize).copied()
}

/// Three-letter month label for a 0-11 index
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    month_name(month).map(|name| &name[..3])
}

/// Long-form date, e.g. "March 5, 2025"
pub fn format_renewal_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// US dollar amount with thousands separators, e.g. "$1,234.50"
pub fn format_price(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}$∞", sign);
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, remainder)
}
