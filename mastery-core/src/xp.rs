//! XP projection engine.
//!
//! Composes the calendar counts with play-rate assumptions into XP totals.
//! Every contribution is independently capped the way the game caps its
//! per-period rewards: 10 rewarded wins per day, 15 per week, and one quest
//! per remaining quest slot unless the caller assumes fewer.

use chrono::{DateTime, Utc};

use crate::calendar::{clamp_to_season, time_left};
use crate::catalog::Season;
use crate::constants::{
    DAILY_WIN_CAP, WEEKLY_WIN_CAP, XP_PER_DAILY_WIN, XP_PER_LEVEL, XP_PER_QUEST,
    XP_PER_WEEKLY_WIN,
};

/// Play-rate assumptions feeding a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRates {
    pub daily_wins: u32,
    pub weekly_wins: u32,
    /// Assumed remaining quest completions; `None` assumes every quest.
    pub quest_cap: Option<u32>,
}

impl Default for WinRates {
    fn default() -> Self {
        Self {
            daily_wins: DAILY_WIN_CAP,
            weekly_wins: WEEKLY_WIN_CAP,
            quest_cap: None,
        }
    }
}

/// Counters for rewards already unlocked today/this week but not yet
/// collected. They only make sense for the live season; for any other
/// season they are forced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outstanding {
    pub quests: u32,
    pub daily_wins: u32,
    pub weekly_wins: u32,
}

impl Outstanding {
    /// Zero out the counters unless `season` is the current one.
    #[must_use]
    pub fn for_season(self, season: &Season, current_code: &str) -> Self {
        if season.code == current_code {
            self
        } else {
            Self::default()
        }
    }

    fn xp_value(self) -> u64 {
        u64::from(self.quests) * XP_PER_QUEST
            + u64::from(self.daily_wins) * XP_PER_DAILY_WIN
            + u64::from(self.weekly_wins) * XP_PER_WEEKLY_WIN
    }
}

/// XP obtainable from `reference` to the end of the season under the given
/// play rates.
#[must_use]
pub fn xp_for_instant(reference: DateTime<Utc>, season: &Season, rates: WinRates) -> u64 {
    let left = time_left(reference, season);
    let xp_per_day = u64::from(rates.daily_wins.min(DAILY_WIN_CAP)) * XP_PER_DAILY_WIN;
    let xp_per_week = u64::from(rates.weekly_wins.min(WEEKLY_WIN_CAP)) * XP_PER_WEEKLY_WIN;
    let quests = rates
        .quest_cap
        .map_or(left.quests_left, |cap| left.quests_left.min(cap));
    xp_per_day * u64::from(left.days_left)
        + xp_per_week * u64::from(left.sundays_left)
        + XP_PER_QUEST * u64::from(quests)
}

/// Level reached at a given XP total. Level 1 starts at 0 XP; one level per
/// 1000 XP with no ceiling. Max-level clamping belongs to reward lookup,
/// never here.
#[must_use]
pub fn xp_to_level(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL).unwrap_or(u32::MAX - 1) + 1
}

/// Full projection for one season at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// XP a maximally active player earns over the whole season.
    pub total_xp: u64,
    /// XP still obtainable from now at the full caps.
    pub remaining_xp: u64,
    /// XP still obtainable from now at the user's assumed rates.
    pub estimated_xp: u64,
    /// Estimated season-end XP: estimate plus banked XP plus outstanding
    /// uncollected rewards.
    pub max_xp: u64,
    pub current_level: u32,
    pub target_level: u32,
    /// Level unlocked by `total_xp`; upper bound of the reward track reach.
    pub max_possible_level: u32,
}

impl Projection {
    /// Compute a projection; `now` is clamped to the season start first.
    #[must_use]
    pub fn compute(
        now: DateTime<Utc>,
        season: &Season,
        rates: WinRates,
        current_xp: u64,
        outstanding: Outstanding,
    ) -> Self {
        let reference = clamp_to_season(now, season);
        let total_xp = xp_for_instant(season.start_date, season, WinRates::default());
        let remaining_xp = xp_for_instant(reference, season, WinRates::default());
        let estimated_xp = xp_for_instant(reference, season, rates);
        let max_xp = estimated_xp + current_xp + outstanding.xp_value();
        Self {
            total_xp,
            remaining_xp,
            estimated_xp,
            max_xp,
            current_level: xp_to_level(current_xp),
            target_level: xp_to_level(max_xp),
            max_possible_level: xp_to_level(total_xp),
        }
    }

    /// The three contiguous level ranges driving reward aggregation:
    /// earned, projected, and unreachable. Together they partition
    /// `[1, max_possible_level]`.
    #[must_use]
    pub fn level_partition(&self) -> [(u32, u32); 3] {
        [
            (1, self.current_level),
            (self.current_level + 1, self.target_level),
            (self.target_level + 1, self.max_possible_level),
        ]
    }
}

/// XP-earned-by-date samples for charting: for each instant in the season
/// sampled every `interval_hours`, the XP a full-cap player has banked.
#[must_use]
pub fn xp_curve(
    season: &Season,
    rates: WinRates,
    interval_hours: i64,
) -> Vec<(DateTime<Utc>, u64)> {
    let start_xp = xp_for_instant(season.start_date, season, rates);
    crate::calendar::dates_between(season, interval_hours)
        .into_iter()
        .map(|at| {
            let left = xp_for_instant(at, season, rates);
            (at, start_xp.saturating_sub(left))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeasonCatalog;
    use chrono::{Duration, TimeZone};

    fn dft() -> Season {
        SeasonCatalog::builtin()
            .unwrap()
            .get("DFT")
            .cloned()
            .unwrap()
    }

    #[test]
    fn xp_to_level_steps_every_thousand() {
        assert_eq!(xp_to_level(0), 1);
        assert_eq!(xp_to_level(999), 1);
        assert_eq!(xp_to_level(1_000), 2);
        assert_eq!(xp_to_level(59_999), 60);
        assert_eq!(xp_to_level(60_000), 61);
    }

    #[test]
    fn xp_for_instant_caps_each_contribution() {
        let season = dft();
        let at = season.start_date;
        let capped = xp_for_instant(at, &season, WinRates::default());
        let over = xp_for_instant(
            at,
            &season,
            WinRates {
                daily_wins: 50,
                weekly_wins: 50,
                quest_cap: None,
            },
        );
        assert_eq!(capped, over);
    }

    #[test]
    fn quest_cap_models_partial_completion() {
        let season = dft();
        let all = xp_for_instant(season.start_date, &season, WinRates::default());
        let none = xp_for_instant(
            season.start_date,
            &season,
            WinRates {
                quest_cap: Some(0),
                ..WinRates::default()
            },
        );
        let left = crate::calendar::time_left(season.start_date, &season);
        assert_eq!(all - none, u64::from(left.quests_left) * 500);
    }

    #[test]
    fn projection_at_start_has_nothing_banked() {
        let season = dft();
        let projection = Projection::compute(
            season.start_date,
            &season,
            WinRates::default(),
            0,
            Outstanding::default(),
        );
        assert_eq!(projection.total_xp, projection.remaining_xp);
        assert_eq!(projection.estimated_xp, projection.max_xp);
        assert_eq!(projection.current_level, 1);
        assert_eq!(projection.target_level, projection.max_possible_level);
    }

    #[test]
    fn projection_clamps_reference_before_season() {
        let season = dft();
        let before = season.start_date - Duration::days(10);
        let at_start = Projection::compute(
            season.start_date,
            &season,
            WinRates::default(),
            0,
            Outstanding::default(),
        );
        let early = Projection::compute(
            before,
            &season,
            WinRates::default(),
            0,
            Outstanding::default(),
        );
        assert_eq!(at_start, early);
    }

    #[test]
    fn outstanding_counters_zero_for_other_seasons() {
        let season = dft();
        let counters = Outstanding {
            quests: 2,
            daily_wins: 5,
            weekly_wins: 10,
        };
        assert_eq!(counters.for_season(&season, "DFT"), counters);
        assert_eq!(
            counters.for_season(&season, "TDM"),
            Outstanding::default()
        );
        assert_eq!(counters.xp_value(), 2 * 500 + 5 * 25 + 10 * 250);
    }

    #[test]
    fn level_partition_covers_track_without_gaps() {
        let season = dft();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let projection = Projection::compute(
            now,
            &season,
            WinRates {
                daily_wins: 4,
                weekly_wins: 15,
                quest_cap: None,
            },
            12_345,
            Outstanding::default(),
        );
        let [earned, expected, missed] = projection.level_partition();
        assert_eq!(earned.0, 1);
        assert_eq!(expected.0, earned.1 + 1);
        assert_eq!(missed.0, expected.1 + 1);
        assert_eq!(missed.1, projection.max_possible_level);
    }

    #[test]
    fn xp_curve_rises_to_the_season_total() {
        let season = dft();
        let curve = xp_curve(&season, WinRates::default(), 24);
        assert_eq!(curve.first().map(|(_, xp)| *xp), Some(0));
        let total = xp_for_instant(season.start_date, &season, WinRates::default());
        assert_eq!(curve.last().map(|(_, xp)| *xp), Some(total));
        assert!(curve.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}
