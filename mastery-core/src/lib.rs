//! Arena Mastery Engine
//!
//! Platform-agnostic calculation engines for the seasonal mastery
//! calculator: calendar and XP projection, gold income, reward aggregation,
//! pack-to-wildcard expectations, and hypergeometric draw odds. This crate
//! provides all of the math without UI or platform-specific dependencies.

pub mod calendar;
pub mod catalog;
pub mod constants;
pub mod gold;
pub mod hypergeometric;
pub mod numbers;
pub mod packs;
pub mod progress;
pub mod rewards;
pub mod view;
pub mod xp;

// Re-export commonly used types
pub use calendar::{TimeLeft, TimeRemaining, clamp_to_season, dates_between, time_left, time_remaining};
pub use catalog::{CatalogError, Season, SeasonCatalog, SeasonPackRates};
pub use gold::{GoldPerWeek, gold_per_week, quest_fraction};
pub use hypergeometric::{
    at_least, combinations, distribution, distribution_with_smoothing,
    distribution_with_smoothing7, pmf,
};
pub use packs::{PackOptions, PackYield, RarityCounts, packs_to_wildcards};
pub use progress::{MemoryProgress, ProgressBook, ProgressMap, ProgressStorage};
pub use rewards::{AggregatedReward, RewardEntry, RewardRow, RewardTable, aggregate_rewards, sort_rank};
pub use view::ViewMode;
pub use xp::{Outstanding, Projection, WinRates, xp_curve, xp_for_instant, xp_to_level};
