use chrono::Datelike;

use crate::helpers::harvest::utils::ReportWindow;
use crate::models::harvest::User;

/// An ordered status scale: `(threshold, color)` pairs with strictly
/// increasing thresholds starting at 0. Tier 0 carries no color.
pub struct StatusScale {
    tiers: [(f64, &'static str); 5],
}

/// Scale for billable hours.
pub const BILLABLE_SCALE: StatusScale = StatusScale {
    tiers: [
        (0.0, ""),
        (10.0, "yellow"),
        (15.0, "green"),
        (20.0, "blue"),
        (30.0, "purple"),
    ],
};

/// Scale for total logged hours.
pub const TOTAL_SCALE: StatusScale = StatusScale {
    tiers: [
        (0.0, ""),
        (15.0, "yellow"),
        (25.0, "green"),
        (30.0, "blue"),
        (40.0, "purple"),
    ],
};

const PHRASES: [&str; 5] = [
    "nothing to speak of",
    "a slow week",
    "a solid week",
    "a strong week",
    "an exceptional week",
];

impl StatusScale {
    /// Step-function lookup: the highest tier whose threshold the value
    /// meets. Values below every nonzero threshold land in tier 0.
    pub fn classify(&self, hours: f64) -> usize {
        self.tiers
            .iter()
            .rposition(|(threshold, _)| hours >= *threshold)
            .unwrap_or(0)
    }

    pub fn color(&self, hours: f64) -> &'static str {
        self.tiers[self.classify(hours)].1
    }

    pub fn phrase(&self, hours: f64) -> &'static str {
        PHRASES[self.classify(hours)]
    }
}

/// Rounds a raw entry value up to the next multiple of `granularity`.
/// Applied per entry before summation; rounding the sum instead would give a
/// different result for fractional entries.
pub fn round_up(hours: f64, granularity: f64) -> f64 {
    (hours / granularity).ceil() * granularity
}

fn heart(color: &str) -> String {
    if color.is_empty() {
        ":heart:".to_string()
    } else {
        format!(":{color}_heart:")
    }
}

/// One decorated summary line: billable field, total field, bold name.
/// Numeric fields are zero-padded to width 4 with one decimal.
pub fn format_line(user: &User, total_hours: f64, billable_hours: f64) -> String {
    format!(
        "{} {:04.1} / {} {:04.1} - *{}*",
        heart(BILLABLE_SCALE.color(billable_hours)),
        billable_hours,
        heart(TOTAL_SCALE.color(total_hours)),
        total_hours,
        user.full_name(),
    )
}

/// Header `D.M.YYYY - D.M.YYYY`, end shown as the last inclusive day.
pub fn date_range_header(window: &ReportWindow) -> String {
    let last = window.last_day();
    format!(
        "{}.{}.{} - {}.{}.{}",
        window.start.day(),
        window.start.month(),
        window.start.year(),
        last.day(),
        last.month(),
        last.year(),
    )
}

/// The full message: date-range header, then one line per user.
pub fn format_report(lines: &[String], window: &ReportWindow) -> String {
    let mut report = Vec::with_capacity(lines.len() + 1);
    report.push(date_range_header(window));
    report.extend(lines.iter().cloned());
    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::harvest::utils::week_containing;
    use chrono::NaiveDate;

    fn user(first: &str, last: &str) -> User {
        User {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            is_active: true,
            roles: vec!["WATA".to_string()],
        }
    }

    #[test]
    fn classify_is_left_closed() {
        assert_eq!(BILLABLE_SCALE.classify(9.9), 0);
        assert_eq!(BILLABLE_SCALE.classify(10.0), 1);
        assert_eq!(BILLABLE_SCALE.classify(14.9), 1);
        assert_eq!(BILLABLE_SCALE.classify(30.0), 4);
        assert_eq!(BILLABLE_SCALE.classify(99.0), 4);
    }

    #[test]
    fn classify_floors_at_tier_zero() {
        assert_eq!(BILLABLE_SCALE.classify(0.0), 0);
        assert_eq!(BILLABLE_SCALE.classify(-1.0), 0);
        assert_eq!(TOTAL_SCALE.classify(-1.0), 0);
    }

    #[test]
    fn tier_zero_has_no_color() {
        assert_eq!(TOTAL_SCALE.color(0.0), "");
        assert_eq!(TOTAL_SCALE.color(15.0), "yellow");
        assert_eq!(TOTAL_SCALE.color(40.0), "purple");
    }

    #[test]
    fn round_up_reaches_next_multiple() {
        assert_eq!(round_up(1.2, 0.5), 1.5);
        assert_eq!(round_up(2.3, 0.5), 2.5);
        assert_eq!(round_up(1.2, 0.25), 1.25);
    }

    #[test]
    fn round_up_is_idempotent() {
        assert_eq!(round_up(1.5, 0.5), 1.5);
        assert_eq!(round_up(round_up(2.3, 0.25), 0.25), round_up(2.3, 0.25));
        assert_eq!(round_up(2.0, 0.25), 2.0);
    }

    #[test]
    fn line_is_zero_padded_and_bold() {
        let line = format_line(&user("Jana", "Novak"), 4.0, 1.5);
        assert_eq!(line, ":heart: 01.5 / :heart: 04.0 - *Jana Novak*");
    }

    #[test]
    fn line_tags_hearts_above_tier_zero() {
        let line = format_line(&user("Petr", "Svoboda"), 25.0, 15.0);
        assert_eq!(
            line,
            ":green_heart: 15.0 / :green_heart: 25.0 - *Petr Svoboda*"
        );
    }

    #[test]
    fn header_spans_seven_inclusive_days() {
        let window = week_containing(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap());
        assert_eq!(date_range_header(&window), "14.4.2025 - 20.4.2025");
        assert_eq!(window.last_day(), window.start + chrono::Duration::days(6));
    }

    #[test]
    fn empty_report_is_header_only() {
        let window = week_containing(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap());
        assert_eq!(format_report(&[], &window), "14.4.2025 - 20.4.2025");
    }

    #[test]
    fn report_starts_with_header() {
        let window = week_containing(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap());
        let lines = vec![format_line(&user("Jana", "Novak"), 4.0, 1.5)];
        let report = format_report(&lines, &window);
        assert!(report.starts_with("14.4.2025 - 20.4.2025\n"));
        assert_eq!(report.lines().count(), 2);
    }
}
