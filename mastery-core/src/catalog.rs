//! Season catalog: immutable reference data for every mastery season.
//!
//! The catalog is an explicit value constructed once at process start and
//! passed by reference to every consumer. Season windows and reward tables
//! are compiled in; nothing here is mutable at runtime.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constants::{DEFAULT_BONUS_SHEET_RATE, DEFAULT_MYTHIC_UPGRADE_RATE};
use crate::rewards::RewardTable;

/// One time-boxed mastery season.
#[derive(Debug, Clone)]
pub struct Season {
    pub code: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_level: Option<u32>,
    pub rewards: Option<RewardTable>,
}

/// Per-season pack constants with documented defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonPackRates {
    /// Chance that the rare slot upgrades to a mythic.
    pub mythic_upgrade: f64,
    /// Fraction of a common slot diverted to the season's bonus sheet.
    pub bonus_sheet: f64,
}

impl Default for SeasonPackRates {
    fn default() -> Self {
        Self {
            mythic_upgrade: DEFAULT_MYTHIC_UPGRADE_RATE,
            bonus_sheet: DEFAULT_BONUS_SHEET_RATE,
        }
    }
}

/// Errors surfaced while building or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("season {code} has an invalid timestamp: {value}")]
    BadTimestamp { code: &'static str, value: &'static str },
    #[error("embedded reward table for {code} is invalid: {source}")]
    BadRewardTable {
        code: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no season starts at or before the reference instant")]
    NoCurrentSeason,
}

/// Compiled-in season rows: code, name, start, end, max level, reward JSON.
type SeasonRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Option<u32>,
    Option<&'static str>,
);

const SEASON_ROWS: &[SeasonRow] = &[
    (
        "LCI",
        "Lost Caverns of Ixalan",
        "2023-11-14T17:00:00Z",
        "2024-02-06T13:00:00Z",
        Some(90),
        None,
    ),
    (
        "MKM",
        "Murders at Karlov Manor",
        "2024-02-06T17:00:00Z",
        "2024-04-16T13:00:00Z",
        Some(70),
        None,
    ),
    (
        "OTJ",
        "Outlaws of Thunder Junction",
        "2024-04-16T17:00:00Z",
        "2024-07-30T13:00:00Z",
        Some(110),
        None,
    ),
    (
        "BLB",
        "Bloomburrow",
        "2024-07-30T17:00:00Z",
        "2024-09-24T13:00:00Z",
        Some(60),
        None,
    ),
    (
        "DSK",
        "Duskmourn: House of Horror",
        "2024-09-24T17:00:00Z",
        "2024-11-12T13:00:00Z",
        Some(60),
        None,
    ),
    (
        "FDN",
        "Foundations",
        "2024-11-12T17:00:00Z",
        "2025-02-11T13:00:00Z",
        Some(90),
        None,
    ),
    (
        "DFT",
        "Aetherdrift",
        "2025-02-11T17:00:00Z",
        "2025-04-08T13:00:00Z",
        Some(60),
        Some(include_str!("../data/rewards_dft.json")),
    ),
    (
        "TDM",
        "Tarkir: Dragonstorm",
        "2025-04-08T17:00:00Z",
        "2025-06-10T13:00:00Z",
        Some(70),
        Some(include_str!("../data/rewards_tdm.json")),
    ),
    (
        "FIN",
        "Final Fantasy",
        "2025-06-10T16:00:00Z",
        "2025-07-29T13:00:00Z",
        Some(50),
        None,
    ),
    (
        "EOE",
        "Edge of Eternities",
        "2025-07-29T16:00:00Z",
        "2025-09-23T13:00:00Z",
        Some(60),
        None,
    ),
    (
        "OM1",
        "Through the Omenpaths",
        "2025-09-23T16:00:00Z",
        // The in-game countdown suggests 12:00, likely tied to the DST change.
        "2025-11-18T12:00:00Z",
        Some(60),
        None,
    ),
    (
        "TLA",
        "Avatar: The Last Airbender",
        "2025-11-18T15:00:00Z",
        "2026-01-20T12:00:00Z",
        Some(60),
        None,
    ),
    (
        "ECL",
        "Lorwyn Eclipsed",
        "2026-01-20T15:00:00Z",
        "2026-03-03T12:00:00Z",
        Some(40),
        None,
    ),
    (
        "TMT",
        "Teenage Mutant Ninja Turtles",
        "2026-03-03T15:00:00Z",
        "2026-04-21T12:00:00Z",
        None,
        None,
    ),
];

/// Seasons whose packs deviate from the default rates. Everything absent
/// falls back to `SeasonPackRates::default()` through `pack_rates`.
const PACK_RATE_OVERRIDES: &[(&str, SeasonPackRates)] = &[
    (
        "OTJ",
        SeasonPackRates {
            mythic_upgrade: DEFAULT_MYTHIC_UPGRADE_RATE,
            bonus_sheet: 1.0,
        },
    ),
    (
        "FIN",
        SeasonPackRates {
            mythic_upgrade: DEFAULT_MYTHIC_UPGRADE_RATE,
            bonus_sheet: 1.0,
        },
    ),
];

/// Immutable set of all known seasons, ordered by start date.
#[derive(Debug, Clone)]
pub struct SeasonCatalog {
    seasons: Vec<Season>,
}

impl SeasonCatalog {
    /// Build the compiled-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded timestamp or reward table fails to
    /// parse. With the shipped data this only fires on a bad edit.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut seasons = Vec::with_capacity(SEASON_ROWS.len());
        for &(code, name, start, end, max_level, rewards_json) in SEASON_ROWS {
            let start_date = parse_instant(code, start)?;
            let end_date = parse_instant(code, end)?;
            let rewards = match rewards_json {
                Some(json) => Some(
                    RewardTable::from_json(json)
                        .map_err(|source| CatalogError::BadRewardTable { code, source })?,
                ),
                None => None,
            };
            seasons.push(Season {
                code: code.to_string(),
                name: name.to_string(),
                start_date,
                end_date,
                max_level,
                rewards,
            });
        }
        Ok(Self { seasons })
    }

    /// All seasons, in start-date order.
    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.seasons.iter()
    }

    /// Look a season up by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.code == code)
    }

    /// The season with the latest start date not after `now`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoCurrentSeason` when every season starts in
    /// the future (or the catalog is empty).
    pub fn current(&self, now: DateTime<Utc>) -> Result<&Season, CatalogError> {
        self.seasons
            .iter()
            .filter(|s| s.start_date <= now)
            .max_by_key(|s| s.start_date)
            .ok_or(CatalogError::NoCurrentSeason)
    }

    /// Per-season pack constants, falling back to the documented defaults.
    #[must_use]
    pub fn pack_rates(&self, code: &str) -> SeasonPackRates {
        PACK_RATE_OVERRIDES
            .iter()
            .find(|(c, _)| *c == code)
            .map_or_else(SeasonPackRates::default, |(_, rates)| *rates)
    }
}

fn parse_instant(
    code: &'static str,
    value: &'static str,
) -> Result<DateTime<Utc>, CatalogError> {
    value
        .parse::<DateTime<Utc>>()
        .map_err(|_| CatalogError::BadTimestamp { code, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = SeasonCatalog::builtin().expect("catalog builds");
        assert!(catalog.get("DFT").is_some());
        let dft = catalog.get("DFT").unwrap();
        assert_eq!(dft.max_level, Some(60));
        assert!(dft.rewards.is_some());
        assert_eq!(dft.rewards.as_ref().unwrap().row_count(), 60);
    }

    #[test]
    fn current_picks_latest_started_season() {
        let catalog = SeasonCatalog::builtin().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let season = catalog.current(now).unwrap();
        assert_eq!(season.code, "DFT");

        let before_everything = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            catalog.current(before_everything),
            Err(CatalogError::NoCurrentSeason)
        ));
    }

    #[test]
    fn pack_rates_fall_back_to_defaults() {
        let catalog = SeasonCatalog::builtin().unwrap();
        let dft = catalog.pack_rates("DFT");
        assert!((dft.mythic_upgrade - 1.0 / 7.0).abs() < 1e-12);
        assert!((dft.bonus_sheet - 0.0).abs() < 1e-12);

        let otj = catalog.pack_rates("OTJ");
        assert!((otj.bonus_sheet - 1.0).abs() < 1e-12);
    }
}
