// Display helpers: phone numbers, dates, sizes and names.
use crate::date::Date;
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use unicode_normalization::UnicodeNormalization;

const WEEKDAYS: [&str; 7] = ["Dim.", "Lun.", "Mar.", "Mer.", "Jeu.", "Ven.", "Sam."];

const MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

const SIZE_UNITS: [&str; 4] = ["o", "Ko", "Mo", "Go"];

// Anything from ' ' to '/' in ASCII, plus ';' and tab.
fn is_tel_separator(c: char) -> bool {
    (' '..='/').contains(&c) || c == ';' || c == '\t'
}

/// Returns the number without spaces or delimiters.
pub fn strip_tel(tel: &str) -> String {
    tel.chars().filter(|c| !is_tel_separator(*c)).collect()
}

pub fn format_tel(tel: &str) -> String {
    format_tel_with(tel, " ")
}

/// Groups the digits of `tel` by pairs.
///
/// Numbers with at least 8 digits keep their prefix (country code, leading
/// zero...) as one chunk, followed by the last 8 digits as four pairs.
/// Shorter, incomplete numbers are split by pairs from the left.
pub fn format_tel_with(tel: &str, separator: &str) -> String {
    let digits: Vec<char> = tel.chars().filter(|c| !is_tel_separator(*c)).collect();
    let pair = |chunk: &[char]| chunk.iter().collect::<String>();

    if digits.len() < 8 {
        return digits.chunks(2).map(pair).collect::<Vec<_>>().join(separator);
    }

    let start = digits.len() - 8;
    let mut chunks = Vec::with_capacity(5);
    if start > 0 {
        chunks.push(pair(&digits[..start]));
    }
    chunks.extend(digits[start..].chunks(2).map(pair));
    chunks.join(separator)
}

pub fn format_tels(tels: &[String]) -> String {
    tels.iter().map(|t| format_tel(t)).collect::<Vec<_>>().join(";")
}

/// `Lun. 3 janv.` style label, empty for an unset date.
pub fn format_date(date: Date, show_year: bool, show_weekday: bool) -> String {
    let Some(day) = date.naive() else {
        return String::new();
    };
    let mut out = format!("{} {}", day.day(), MONTHS[day.month0() as usize]);
    if show_year {
        out = format!("{out} {}", day.year());
    }
    if show_weekday {
        out = format!("{} {out}", WEEKDAYS[day.weekday().num_days_from_sunday() as usize]);
    }
    out
}

/// Full date with weekday and year, followed by `HH:MM`.
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    let date = Date::from_datetime(instant);
    if date.is_zero() {
        return String::new();
    }
    format!(
        "{}, {:02}:{:02}",
        format_date(date, true, true),
        instant.hour(),
        instant.minute()
    )
}

/// `DD/MM/YYYY`, empty for an unset date.
pub fn format_birth_date(date: Date) -> String {
    date.naive()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Renders a value given in hundredths: no decimals when it is whole,
/// two decimals with a comma otherwise.
pub fn format_hundredths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let (units, rest) = (abs / 100, abs % 100);
    if rest == 0 {
        format!("{sign}{units}")
    } else {
        format!("{sign}{units},{rest:02}")
    }
}

/// File size with a 1000 base: `950 o`, `1,50 Ko`, `3 Mo`.
pub fn format_size(bytes: u64) -> String {
    let mut unit = 0;
    let mut scale: u128 = 1;
    while unit + 1 < SIZE_UNITS.len() && u128::from(bytes) >= scale * 1000 {
        scale *= 1000;
        unit += 1;
    }
    let hundredths = u128::from(bytes) * 100 / scale;
    let hundredths = i64::try_from(hundredths).unwrap_or(i64::MAX);
    format!("{} {}", format_hundredths(hundredths), SIZE_UNITS[unit])
}

fn upper_first(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `jean  marie` -> `Jean-Marie`
pub fn format_first_name(s: &str) -> String {
    s.split([' ', '-', '.'])
        .filter(|p| !p.is_empty())
        .map(upper_first)
        .collect::<Vec<_>>()
        .join("-")
}

/// Search key: no spaces, no accents, lower case.
pub fn normalize(s: &str) -> String {
    s.replace(' ', "")
        .nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase()
}
