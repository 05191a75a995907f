// Camp labels and period helpers.
use chrono::Datelike;
use shared::date::{Date, DateRange};
use shared::format::{format_date, normalize};
use shared::models::{Camp, CampExt};

pub fn range(camp: &Camp) -> DateRange {
    DateRange::new(camp.start, camp.days)
}

/// Year of the start date, 0 when the start is unset.
pub fn year(camp: &Camp) -> i32 {
    camp.start.year().unwrap_or(0)
}

/// Last day of the camp.
pub fn end_date(camp: &Camp) -> Date {
    range(camp).to()
}

pub fn label(camp: &Camp) -> String {
    format!("{} - {}", camp.name, year(camp))
}

/// `Lun. 10 juil. au Ven. 21 juil.`
pub fn format_range(camp: &Camp) -> String {
    format!(
        "{} au {}",
        format_date(camp.start, false, true),
        format_date(end_date(camp), false, true)
    )
}

/// Colour of the season the camp starts in.
pub fn period_color(camp: &Camp) -> &'static str {
    match camp.start.naive().map(|d| d.month()) {
        Some(7 | 8) => "rgba(45, 185, 187, 200)",      // summer
        Some(9..=11) => "rgba(170, 228, 62, 200)",     // autumn
        Some(12 | 1..=3) => "rgba(173, 116, 30, 200)", // winter
        _ => "rgba(203, 199, 193, 200)",               // spring
    }
}

/// `normalized_pattern` must already be passed through [`normalize`].
pub fn matches(camp: &Camp, normalized_pattern: &str) -> bool {
    if normalized_pattern.is_empty() {
        return true;
    }
    normalize(&format!("{}{}", label(camp), camp.place)).contains(normalized_pattern)
}

pub fn is_open(camp: &CampExt) -> bool {
    camp.camp.open && !camp.is_terminated
}

/// True once `today` is at least `days` days after the last day.
pub fn is_passed_by(camp: &Camp, days: i64, today: Date) -> bool {
    let end = end_date(camp);
    !end.is_zero() && end.add_days(days) <= today
}

pub fn ext(camp: Camp, today: Date) -> CampExt {
    let is_terminated = is_passed_by(&camp, 1, today);
    CampExt { camp, is_terminated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn camp() -> Camp {
        Camp {
            id: 1,
            name: "Séjour Été".to_string(),
            place: "Château d'Ax".to_string(),
            start: d("2023-07-10"),
            days: 12,
            open: true,
        }
    }

    #[test]
    fn test_dates_and_labels() {
        let camp = camp();
        assert_eq!(year(&camp), 2023);
        assert_eq!(end_date(&camp), d("2023-07-21"));
        assert_eq!(label(&camp), "Séjour Été - 2023");
        assert_eq!(format_range(&camp), "Lun. 10 juil. au Ven. 21 juil.");
    }

    #[test]
    fn test_period_color() {
        let mut camp = camp();
        assert_eq!(period_color(&camp), "rgba(45, 185, 187, 200)");
        camp.start = d("2023-02-10");
        assert_eq!(period_color(&camp), "rgba(173, 116, 30, 200)");
        camp.start = d("2023-10-20");
        assert_eq!(period_color(&camp), "rgba(170, 228, 62, 200)");
        camp.start = d("2023-05-01");
        assert_eq!(period_color(&camp), "rgba(203, 199, 193, 200)");
    }

    #[test]
    fn test_matches() {
        let camp = camp();
        assert!(matches(&camp, ""));
        assert!(matches(&camp, &normalize("sejour ete")));
        assert!(matches(&camp, &normalize("CHÂTEAU")));
        assert!(!matches(&camp, "hiver"));
    }

    #[test]
    fn test_open_and_terminated() {
        let open = ext(camp(), d("2023-07-21"));
        assert!(!open.is_terminated);
        assert!(is_open(&open));

        let over = ext(camp(), d("2023-07-22"));
        assert!(over.is_terminated);
        assert!(!is_open(&over));
    }
}
