//! Calendar engine: reset boundaries, Sunday cadence, chart sampling.
//!
//! Everything here is a pure function of a reference instant and a season
//! window. The game refreshes daily counters at a fixed 09:00 UTC boundary;
//! the very first reset of a season additionally grants a "day zero" bonus
//! before the first rollover is reached, which is folded in here rather than
//! special-cased by callers.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};

use crate::catalog::Season;
use crate::constants::{DAILY_RESET_HOUR_UTC, QUEST_SLOTS_AT_SEASON_START};

/// Whole-unit decomposition of a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

/// Reset-boundary counts between a reference instant and season end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days_left: u32,
    pub sundays_left: u32,
    pub quests_left: u32,
}

/// Floor-decompose `to - from` into days, hours and minutes.
///
/// Callers are expected to pass `from <= to`; an inverted range produces a
/// meaningless negative decomposition rather than an error.
#[must_use]
pub fn time_remaining(from: DateTime<Utc>, to: DateTime<Utc>) -> TimeRemaining {
    let diff = to - from;
    TimeRemaining {
        days: diff.num_days(),
        hours: diff.num_hours() % 24,
        minutes: diff.num_minutes() % 60,
    }
}

/// Count daily resets (and Sunday resets) remaining before the season ends.
///
/// The first future reset is found by advancing to the next calendar day
/// when the reference is already past 09:00 UTC, then pinning the time of
/// day to exactly 09:00. When the reference sits at or before the season
/// start the initial bonus applies: one extra day and Sunday, and three
/// quest slots granted at season start.
#[must_use]
pub fn time_left(reference: DateTime<Utc>, season: &Season) -> TimeLeft {
    let initial_bonus = u32::from(reference <= season.start_date);

    let mut date = reference.date_naive();
    if reference.hour() >= DAILY_RESET_HOUR_UTC {
        date = date.succ_opt().unwrap_or(date);
    }
    let Some(naive) = date.and_hms_opt(DAILY_RESET_HOUR_UTC, 0, 0) else {
        return TimeLeft::default();
    };
    let mut cursor = Utc.from_utc_datetime(&naive);

    let mut days = 0u32;
    let mut sundays = 0u32;
    while cursor < season.end_date {
        days += 1;
        if cursor.weekday() == Weekday::Sun {
            sundays += 1;
        }
        cursor += Duration::days(1);
    }

    TimeLeft {
        days_left: days + initial_bonus,
        sundays_left: sundays + initial_bonus,
        quests_left: days + QUEST_SLOTS_AT_SEASON_START * initial_bonus,
    }
}

/// Sampling instants for charting: season start, stepping by
/// `interval_hours`, inclusive of the first point past the season end.
///
/// A non-positive interval yields only the starting point.
#[must_use]
pub fn dates_between(season: &Season, interval_hours: i64) -> Vec<DateTime<Utc>> {
    let mut points = Vec::new();
    let mut cursor = season.start_date;
    loop {
        points.push(cursor);
        if cursor > season.end_date || interval_hours <= 0 {
            break;
        }
        cursor += Duration::hours(interval_hours);
    }
    points
}

/// Clamp a reference instant to the season window's start.
///
/// Projections before the season begins behave as if taken at the start.
#[must_use]
pub fn clamp_to_season(now: DateTime<Utc>, season: &Season) -> DateTime<Utc> {
    if now < season.start_date {
        season.start_date
    } else {
        now
    }
}
