//! Calendar-aware elapsed time between two instants
//!
//! Review ages are reported in natural calendar units ("2 years 3 months"),
//! honoring real month and year lengths, rather than dividing a raw second
//! count by fixed ratios.

use chrono::{DateTime, Datelike, Duration, Months, Utc};

/// Elapsed time broken down into calendar components.
///
/// Components are normalized: `months < 12`, `hours < 24`, `minutes < 60`.
/// `days` is whatever remains after the whole-months anchor, so it reflects
/// the actual length of the months crossed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeDelta {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl RelativeDelta {
    /// Compute the calendar delta from `from` up to `to`.
    ///
    /// A `from` at or after `to` yields the zero delta.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        if to <= from {
            return Self::default();
        }

        let mut months =
            (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
        if months < 0 {
            months = 0;
        }

        // Anchor at from + whole months, backing off if the anchor overshoots
        // (month-end clamping can push it past `to`).
        let mut anchor = add_months(from, months as u32);
        while months > 0 && anchor > to {
            months -= 1;
            anchor = add_months(from, months as u32);
        }

        let rest = to - anchor;
        let days = rest.num_days();
        let hours = (rest - Duration::days(days)).num_hours();
        let minutes = (rest - Duration::days(days) - Duration::hours(hours)).num_minutes();

        Self {
            years: (months / 12) as u32,
            months: (months % 12) as u32,
            days: days as u32,
            hours: hours as u32,
            minutes: minutes as u32,
        }
    }

    /// Total whole months in this delta
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

fn add_months(t: DateTime<Utc>, n: u32) -> DateTime<Utc> {
    t.checked_add_months(Months::new(n)).unwrap_or(t)
}

/// Format the time elapsed since `created_at` as a human-readable string.
///
/// Evaluated against the current UTC time; repeated calls for the same
/// instant may yield different strings as the clock advances.
pub fn format_duration(created_at: DateTime<Utc>) -> String {
    format_duration_at(created_at, Utc::now())
}

/// Format the time elapsed between `created_at` and `now`.
///
/// Components are walked coarsest-first; zero components are skipped and
/// minutes are dropped once any coarser unit was emitted. If nothing
/// qualifies the result is `"less than 1 minute"`.
pub fn format_duration_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = RelativeDelta::between(created_at, now);

    let components = [
        ("year", delta.years),
        ("month", delta.months),
        ("day", delta.days),
        ("hour", delta.hours),
        ("minute", delta.minutes),
    ];

    let mut parts: Vec<String> = Vec::new();
    for (unit, value) in components {
        // minutes only when no coarser unit made it in
        if unit == "minute" && !parts.is_empty() {
            continue;
        }
        if value == 1 {
            parts.push(format!("1 {}", unit));
        } else if value > 1 {
            parts.push(format!("{} {}s", value, unit));
        }
    }

    if parts.is_empty() {
        "less than 1 minute".to_string()
    } else {
        parts.join(" ")
    }
}
