//! Age-based filtering of review requests
//!
//! Callers ask for reviews "older than" or "newer than" some amount of time.
//! Years and months are compared through the calendar-aware relative delta;
//! days, hours and minutes through the raw elapsed duration.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::review::RelativeDelta;

/// Direction of an age bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeState {
    /// Keep reviews at least as old as the bound
    Older,
    /// Keep reviews younger than the bound
    Newer,
}

impl FromStr for AgeState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "older" => Ok(AgeState::Older),
            "newer" => Ok(AgeState::Newer),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

/// Unit of an age bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeUnit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
}

impl FromStr for AgeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "y" => Ok(AgeUnit::Years),
            "m" => Ok(AgeUnit::Months),
            "d" => Ok(AgeUnit::Days),
            "h" => Ok(AgeUnit::Hours),
            "min" => Ok(AgeUnit::Minutes),
            other => Err(Error::InvalidDuration(other.to_string())),
        }
    }
}

/// An "older/newer than N units" bound on review age.
///
/// Pure: evaluation depends only on the filter, the review timestamp and the
/// clock passed in (or the current UTC time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeFilter {
    pub state: AgeState,
    pub value: u32,
    pub unit: AgeUnit,
}

impl AgeFilter {
    pub fn new(state: AgeState, value: u32, unit: AgeUnit) -> Self {
        Self { state, value, unit }
    }

    /// Build a filter from the raw optional parts of a request.
    ///
    /// Returns `Ok(None)` when any part is absent: the caller asked for
    /// unfiltered results. Invalid `state` or `unit` strings are errors,
    /// never silently ignored.
    pub fn from_parts(
        state: Option<&str>,
        value: Option<u32>,
        unit: Option<&str>,
    ) -> Result<Option<Self>> {
        match (state, value, unit) {
            (Some(state), Some(value), Some(unit)) => Ok(Some(Self {
                state: state.parse()?,
                value,
                unit: unit.parse()?,
            })),
            _ => Ok(None),
        }
    }

    /// Whether a review filed at `created_at` satisfies this bound, against
    /// the current UTC time
    pub fn passes(&self, created_at: DateTime<Utc>) -> bool {
        self.passes_at(created_at, Utc::now())
    }

    /// Whether a review filed at `created_at` satisfies this bound as of `now`
    pub fn passes_at(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let relative = RelativeDelta::between(created_at, now);
        let elapsed = now.signed_duration_since(created_at);

        let quantity = match self.unit {
            AgeUnit::Years => relative.years as f64,
            AgeUnit::Months => relative.total_months() as f64,
            AgeUnit::Days => elapsed.num_days() as f64,
            AgeUnit::Hours => elapsed.num_seconds() as f64 / 3600.0,
            AgeUnit::Minutes => elapsed.num_seconds() as f64 / 60.0,
        };

        match self.state {
            AgeState::Older => quantity >= self.value as f64,
            AgeState::Newer => quantity < self.value as f64,
        }
    }
}

/// Check whether a review filed at `created_at` is older or newer than the
/// requested bound.
///
/// A bound with any of `state`, `value`, `unit` unset is a no-op and passes
/// everything.
pub fn check_request_age(
    created_at: DateTime<Utc>,
    state: Option<&str>,
    value: Option<u32>,
    unit: Option<&str>,
) -> Result<bool> {
    match AgeFilter::from_parts(state, value, unit)? {
        Some(filter) => Ok(filter.passes(created_at)),
        None => Ok(true),
    }
}

/// True when the review's last activity happened within the last `days` days.
///
/// Absent inputs (or a zero-day window) are false.
pub fn has_new_comments(last_activity: Option<DateTime<Utc>>, days: Option<i64>) -> bool {
    has_new_comments_at(last_activity, days, Utc::now())
}

/// [`has_new_comments`] against an explicit clock
pub fn has_new_comments_at(
    last_activity: Option<DateTime<Utc>>,
    days: Option<i64>,
    now: DateTime<Utc>,
) -> bool {
    match (last_activity, days) {
        (Some(last_activity), Some(days)) if days > 0 => {
            now.signed_duration_since(last_activity).num_days() < days
        }
        _ => false,
    }
}
