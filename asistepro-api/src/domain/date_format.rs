use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub fn month_name_es(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS_ES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// `5 de marzo de 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), month_name_es(date.month()), date.year())
}

/// `05-03-2025`, used in exported file names.
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// `05/03/2025`, used in course pickers.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `5 de marzo de 2025, 14:07` (UTC).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_long_date(ts.date_naive()),
        ts.hour(),
        ts.minute()
    )
}
