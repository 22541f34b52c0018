//! Centralized tuning constants for the mastery calculators.
//!
//! These values mirror the live game's reward schedule. Keeping them together
//! ensures projections can only be adjusted via code changes reviewed in
//! version control, rather than through external assets.

// Daily cadence ------------------------------------------------------------
pub const DAILY_RESET_HOUR_UTC: u32 = 9;
pub(crate) const QUEST_SLOTS_AT_SEASON_START: u32 = 3;

// XP schedule --------------------------------------------------------------
pub const XP_PER_DAILY_WIN: u64 = 25;
pub const XP_PER_WEEKLY_WIN: u64 = 250;
pub const XP_PER_QUEST: u64 = 500;
pub const XP_PER_LEVEL: u64 = 1_000;
pub const DAILY_WIN_CAP: u32 = 10;
pub const WEEKLY_WIN_CAP: u32 = 15;

// Gold schedule ------------------------------------------------------------
// Marginal gold for the n-th daily win of the week; front-loaded, trailing
// entries are deliberately zero.
pub(crate) const DAILY_WIN_GOLD: [u64; 15] =
    [250, 100, 100, 100, 0, 50, 0, 50, 0, 50, 0, 25, 0, 25, 0];
pub(crate) const QUEST_GOLD_MIN: f64 = 500.0;
pub(crate) const QUEST_GOLD_MAX: f64 = 750.0;
// Observed quest pool: 9 low rolls of 500 against 7 high rolls of 750.
pub(crate) const QUEST_GOLD_LOW_ROLLS: f64 = 9.0;
pub(crate) const QUEST_GOLD_HIGH_ROLLS: f64 = 7.0;
pub(crate) const DAYS_PER_WEEK: f64 = 7.0;

// Pack composition ---------------------------------------------------------
pub(crate) const PACK_COMMON_SLOTS: f64 = 5.0;
pub(crate) const PACK_UNCOMMON_SLOTS: f64 = 2.0;
pub(crate) const PACK_RARE_SLOTS: f64 = 1.0;
pub(crate) const WILDCARD_COMMON_RATE: f64 = 1.0 / 3.0;
pub(crate) const WILDCARD_UNCOMMON_RATE: f64 = 1.0 / 5.0;
pub(crate) const WILDCARD_RARE_SLOT_RATE: f64 = 1.0 / 30.0;
pub(crate) const DEFAULT_MYTHIC_UPGRADE_RATE: f64 = 1.0 / 7.0;
pub(crate) const DEFAULT_BONUS_SHEET_RATE: f64 = 0.0;
pub(crate) const GOLDEN_MYTHIC_UPGRADE_RATE: f64 = 1.0 / 6.0;

// Wildcard wheel -----------------------------------------------------------
pub(crate) const WHEEL_WILDCARD_RATE: f64 = 1.0 / 6.0;
pub(crate) const WHEEL_RARE_SHARE: f64 = 4.0 / 5.0;
pub(crate) const WHEEL_MYTHIC_SHARE: f64 = 1.0 / 5.0;
pub(crate) const GOLDEN_WHEEL_BOOST: f64 = 1.1;

// Vault --------------------------------------------------------------------
pub(crate) const VAULT_PCT_PER_COMMON: f64 = 0.1;
pub(crate) const VAULT_PCT_PER_UNCOMMON: f64 = 0.3;
pub(crate) const VAULT_UNCOMMON_WC_PER_PCT: f64 = 0.03;
pub(crate) const VAULT_RARE_WC_PER_PCT: f64 = 0.02;
pub(crate) const VAULT_MYTHIC_WC_PER_PCT: f64 = 0.01;

// Draw smoothing -----------------------------------------------------------
// Empirically tuned best-of-three-hands bias; treat both values as opaque.
pub(crate) const SMOOTHING_WEIGHT_BASE: f64 = 4.0;
pub(crate) const SMOOTHING_WEIGHT_EXPONENT: f64 = 2.5;
pub const OPENING_HAND_SIZE: u32 = 7;

// Persistence --------------------------------------------------------------
pub const PROGRESS_STORAGE_KEY: &str = "mastery.progress";
