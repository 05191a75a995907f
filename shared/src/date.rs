// Calendar dates (day granularity) and date ranges.
//
// A `Date` either holds a real calendar day or is the "unset" sentinel,
// written `0001-01-01` on the wire. Any day in year 1 or earlier collapses
// to the sentinel.
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire form of the "unset" date.
pub const ZERO_DATE: &str = "0001-01-01";

const ISO_FORMAT: &str = "%Y-%m-%d";

const WEEKDAYS: [&str; 7] = ["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(Option<NaiveDate>);

impl Date {
    pub const ZERO: Date = Date(None);

    /// Returns `None` when the triple is not a calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_naive)
    }

    pub fn from_naive(day: NaiveDate) -> Self {
        if day.year() <= 1 {
            Self::ZERO
        } else {
            Self(Some(day))
        }
    }

    /// Calendar day of `instant`, read in the timezone it carries.
    /// Pass a `DateTime<Local>` to get the local day.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::from_naive(instant.date_naive())
    }

    pub fn today() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn naive(&self) -> Option<NaiveDate> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn year(&self) -> Option<i32> {
        self.0.map(|d| d.year())
    }

    /// Shifts by `n` days, `n` may be negative. The sentinel stays unset.
    pub fn add_days(self, n: i64) -> Self {
        let Some(day) = self.0 else {
            return Self::ZERO;
        };
        let shifted = if n >= 0 {
            day.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            day.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        shifted.map_or(Self::ZERO, Self::from_naive)
    }

    /// Age reached at `now`, comparing month and day so that leap days
    /// do not drift. `None` for the sentinel.
    pub fn age_at(&self, now: NaiveDate) -> Option<i32> {
        let birth = self.0?;
        let years = now.year() - birth.year();
        if (birth.month(), birth.day()) <= (now.month(), now.day()) {
            Some(years)
        } else {
            Some(years - 1)
        }
    }

    /// `Mer 2` style label, empty for the sentinel.
    pub fn short_string(&self) -> String {
        match self.0 {
            Some(day) => format!(
                "{} {}",
                WEEKDAYS[day.weekday().num_days_from_sunday() as usize],
                day.day()
            ),
            None => String::new(),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(day) => write!(f, "{}", day.format(ISO_FORMAT)),
            None => f.write_str(ZERO_DATE),
        }
    }
}

impl FromStr for Date {
    type Err = chrono::ParseError;

    /// Strict `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, ISO_FORMAT).map(Self::from_naive)
    }
}

impl From<NaiveDate> for Date {
    fn from(day: NaiveDate) -> Self {
        Self::from_naive(day)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Empty or malformed dates decode to the sentinel rather than failing
// the whole record.
impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Date::ZERO))
    }
}

/// Parses user input in `JJ/MM/AAAA` or `JJ-MM-AAAA` form.
///
/// Day and month take one or two digits, the year exactly four, and a
/// single separator kind is used throughout. Returns `None` when the input
/// does not match, when it names no calendar day, or when it would collapse
/// to the unset sentinel (year 1 and before).
pub fn parse(s: &str) -> Option<Date> {
    let separator = if s.contains('/') { '/' } else { '-' };
    let mut parts = s.split(separator);
    let day = digits(parts.next()?, 1, 2)?;
    let month = digits(parts.next()?, 1, 2)?;
    let year = digits(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }
    Date::new(year as i32, month, day).filter(|d| !d.is_zero())
}

fn digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Adds a trailing `/` once a day, or a day and month, have been typed.
pub fn autocomplete(s: &str) -> String {
    let is_two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
    let complete = match s.split_once('/') {
        None => is_two_digits(s),
        Some((day, month)) => digits(day, 1, 2).is_some() && is_two_digits(month),
    };
    if complete {
        format!("{s}/")
    } else {
        s.to_string()
    }
}

/// True for anything that does not denote a set date: wrong length, the
/// sentinel, an unparseable string or a year <= 1.
pub fn is_date_zero(s: &str) -> bool {
    if s.len() != 10 || s == ZERO_DATE {
        return true;
    }
    s.parse::<Date>().map_or(true, |d| d.is_zero())
}

/// Age of someone born on `birth` (ISO string) at `now`, today by default.
pub fn age_from(birth: &str, now: Option<NaiveDate>) -> Option<i32> {
    if is_date_zero(birth) {
        return None;
    }
    let birth: Date = birth.parse().ok()?;
    let now = match now {
        Some(now) => now,
        None => Local::now().date_naive(),
    };
    birth.age_at(now)
}

pub fn add_days(date: Date, n: i64) -> Date {
    date.add_days(n)
}

/// Month/day of `a` is on or before the month/day of `b`, years ignored.
fn before_no_year(a: NaiveDate, b: NaiveDate) -> bool {
    (a.month(), a.day()) <= (b.month(), b.day())
}

/// A span of whole days, both ends included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Date,
    pub days: u32,
}

impl DateRange {
    pub fn new(from: Date, days: u32) -> Self {
        Self { from, days }
    }

    /// Last day of the range.
    pub fn to(&self) -> Date {
        self.from.add_days(i64::from(self.days) - 1)
    }

    pub fn contains(&self, date: Date) -> bool {
        if self.from.is_zero() || date.is_zero() {
            return false;
        }
        self.from <= date && date <= self.to()
    }

    /// True when someone born on `birth` has their birthday during the range.
    pub fn has_birthday(&self, birth: Date) -> bool {
        let (Some(birth), Some(from), Some(to)) = (birth.naive(), self.from.naive(), self.to().naive())
        else {
            return false;
        };
        if to.year() > from.year() {
            before_no_year(from, birth) || before_no_year(birth, to)
        } else {
            before_no_year(from, birth) && before_no_year(birth, to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn naive(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_FORMAT).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("1/2/20"), None);
        assert_eq!(parse("1/002/20"), None);
        assert_eq!(parse("1/2/2000"), Some(d("2000-02-01")));
        assert_eq!(parse("01/03/2000"), Some(d("2000-03-01")));
        assert_eq!(parse("1/12/2000"), Some(d("2000-12-01")));
        assert_eq!(parse("1-12-2000"), Some(d("2000-12-01")));
        assert_eq!(parse("01-03-2000"), Some(d("2000-03-01")));
    }

    #[test]
    fn test_parse_rejects_mixed_separators_and_impossible_days() {
        assert_eq!(parse("1/12-2000"), None);
        assert_eq!(parse("40/13/2020"), None);
        assert_eq!(parse("1/2/2000/"), None);
    }

    #[test]
    fn test_parse_rejects_sentinel_years() {
        assert_eq!(parse("01/01/0001"), None);
        assert_eq!(parse("15/06/0000"), None);
        assert_eq!(parse("01/01/0002"), Some(d("0002-01-01")));
    }

    #[test]
    fn test_parse_emits_iso() {
        assert_eq!(parse("1/2/2000").unwrap().to_string(), "2000-02-01");
    }

    #[test]
    fn test_autocomplete() {
        assert_eq!(autocomplete(""), "");
        assert_eq!(autocomplete("1"), "1");
        assert_eq!(autocomplete("12"), "12/");
        assert_eq!(autocomplete("12/01"), "12/01/");
        assert_eq!(autocomplete("1/01"), "1/01/");
        assert_eq!(autocomplete("/2004"), "/2004");
        assert_eq!(autocomplete("12/01/"), "12/01/");
    }

    #[test]
    fn test_is_date_zero() {
        assert!(is_date_zero(""));
        assert!(is_date_zero("54"));
        assert!(is_date_zero("0001-01-01"));
        assert!(is_date_zero("2000-13-45"));
        assert!(!is_date_zero("2000-01-01"));
        assert!(!is_date_zero("1900-01-01"));
        assert!(!is_date_zero("1901-01-01"));
    }

    #[test]
    fn test_age_from() {
        assert_eq!(age_from("", None), None);
        assert_eq!(age_from("", Some(naive("2020-01-01"))), None);
        assert_eq!(age_from("2000-01-01", Some(naive("2000-01-02"))), Some(0));
        assert_eq!(age_from("2000-01-01", Some(naive("2002-01-01"))), Some(2));
        assert_eq!(age_from("2000-05-01", Some(naive("2002-04-02"))), Some(1));
        assert_eq!(age_from("2000-02-29", Some(naive("2002-02-28"))), Some(1));
        assert_eq!(age_from("2000-02-29", Some(naive("2002-03-01"))), Some(2));
        assert_eq!(age_from("2001-02-28", Some(naive("2004-02-29"))), Some(3));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(d("2000-02-28"), 1), d("2000-02-29"));
        assert_eq!(add_days(d("2000-03-01"), -1), d("2000-02-29"));
        assert_eq!(add_days(d("2021-12-31"), 1), d("2022-01-01"));
        assert_eq!(add_days(Date::ZERO, 10), Date::ZERO);
    }

    #[test]
    fn test_from_datetime_keeps_calendar_day() {
        use chrono::{FixedOffset, Utc};
        let late = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 7, 1, 23, 30, 0)
            .unwrap();
        assert_eq!(Date::from_datetime(&late), d("2023-07-01"));
        assert_eq!(Date::from_datetime(&late.with_timezone(&Utc)), d("2023-07-01"));
    }

    #[test]
    fn test_serde_sentinel() {
        let json = serde_json::to_string(&Date::ZERO).unwrap();
        assert_eq!(json, "\"0001-01-01\"");
        let back: Date = serde_json::from_str("\"\"").unwrap();
        assert!(back.is_zero());
        let back: Date = serde_json::from_str("\"2010-06-15\"").unwrap();
        assert_eq!(back, d("2010-06-15"));
    }

    #[test]
    fn test_short_string() {
        assert_eq!(d("2024-10-02").short_string(), "Mer 2");
        assert_eq!(Date::ZERO.short_string(), "");
    }

    #[test]
    fn test_range_contains_and_to() {
        let range = DateRange::new(d("2023-07-10"), 3);
        assert_eq!(range.to(), d("2023-07-12"));
        assert!(range.contains(d("2023-07-10")));
        assert!(range.contains(d("2023-07-12")));
        assert!(!range.contains(d("2023-07-13")));
        assert!(!range.contains(Date::ZERO));
    }

    #[test]
    fn test_range_has_birthday_across_new_year() {
        let range = DateRange::new(d("2023-12-30"), 5);
        assert!(range.has_birthday(d("2010-12-31")));
        assert!(range.has_birthday(d("2012-01-02")));
        assert!(!range.has_birthday(d("2012-01-05")));

        let summer = DateRange::new(d("2023-07-10"), 10);
        assert!(summer.has_birthday(d("2011-07-15")));
        assert!(!summer.has_birthday(d("2011-08-15")));
        assert!(!summer.has_birthday(Date::ZERO));
    }
}
