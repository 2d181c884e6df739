//! Display formatting: dates and contact links.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};

/// Shown in place of a missing date.
pub const DATE_PLACEHOLDER: &str = "—";

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Locale used for rendering dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    EsPr,
    EnUs,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EsPr => "es-PR",
            Self::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for locale tags other than `es-PR` and `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale \"{0}\"")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "es-pr" => Ok(Self::EsPr),
            "en-us" => Ok(Self::EnUs),
            _ => Err(UnsupportedLocale(s.to_owned())),
        }
    }
}

/// Render an ISO date or timestamp in the locale's short form.
///
/// Timestamps keep the calendar date of their own offset. Input that is
/// neither is returned as-is.
pub fn format_date(value: Option<&str>, locale: Locale) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DATE_PLACEHOLDER.to_owned();
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => short_date(date, locale),
        None => raw.to_owned(),
    }
}

fn short_date(date: NaiveDate, locale: Locale) -> String {
    let month = date.month0() as usize;
    match locale {
        Locale::EsPr => format!("{} {} {}", date.day(), MONTHS_ES[month], date.year()),
        Locale::EnUs => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
    }
}

/// `tel:` link keeping only digits and `+`.
pub fn phone_href(number: &str) -> String {
    let digits: String = number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}

/// `wa.me` link keeping only digits.
pub fn whatsapp_href(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}
