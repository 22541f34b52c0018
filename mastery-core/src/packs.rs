//! Pack-to-wildcard expectation engine.
//!
//! Models the three additive reward sources of an opened pack as expected
//! fractional counts rather than sampled outcomes: the pack's own wildcard
//! slots, the periodic wildcard wheel, and optional vault progress from the
//! commons and uncommons that stay cards. Every output is linear in the
//! opened-pack count.

use crate::catalog::SeasonPackRates;
use crate::constants::{
    GOLDEN_MYTHIC_UPGRADE_RATE, GOLDEN_WHEEL_BOOST, PACK_COMMON_SLOTS, PACK_RARE_SLOTS,
    PACK_UNCOMMON_SLOTS, VAULT_MYTHIC_WC_PER_PCT, VAULT_PCT_PER_COMMON, VAULT_PCT_PER_UNCOMMON,
    VAULT_RARE_WC_PER_PCT, VAULT_UNCOMMON_WC_PER_PCT, WHEEL_MYTHIC_SHARE, WHEEL_RARE_SHARE,
    WHEEL_WILDCARD_RATE, WILDCARD_COMMON_RATE, WILDCARD_RARE_SLOT_RATE, WILDCARD_UNCOMMON_RATE,
};

/// User-facing simulation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackOptions {
    pub packs: f64,
    /// Pack variant that always upgrades the rare slot to mythic.
    pub mythic_pack: bool,
    /// Golden pack variant: boosted wheel and shifted card rarities.
    pub golden_pack: bool,
    /// Whether vault progress should be converted into wildcards.
    pub include_vault: bool,
}

/// Expected counts per rarity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RarityCounts {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub mythic: f64,
}

impl RarityCounts {
    fn scale(self, factor: f64) -> Self {
        Self {
            common: self.common * factor,
            uncommon: self.uncommon * factor,
            rare: self.rare * factor,
            mythic: self.mythic * factor,
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            common: self.common + other.common,
            uncommon: self.uncommon + other.uncommon,
            rare: self.rare + other.rare,
            mythic: self.mythic + other.mythic,
        }
    }
}

/// Expected yield of an opened-pack batch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackYield {
    /// Total expected wildcards from all sources combined.
    pub wildcards: RarityCounts,
    /// Expected cards that stay cards (wildcard slots excluded).
    pub cards: RarityCounts,
    /// Expected bonus-sheet cards diverted from common slots.
    pub bonus_cards: f64,
    /// Wildcard breakdown by source.
    pub from_packs: RarityCounts,
    pub from_wheel: RarityCounts,
    pub from_vault: RarityCounts,
    /// Vault percentage points accrued, whether or not they are converted.
    pub vault_percent: f64,
}

/// Expected wildcards and cards for a batch of packs under the season's
/// rates. Total over its whole domain; nonsensical inputs (negative pack
/// counts) are the caller's clamping problem.
#[must_use]
pub fn packs_to_wildcards(options: PackOptions, rates: SeasonPackRates) -> PackYield {
    let mythic_upgrade = if options.mythic_pack {
        1.0
    } else {
        rates.mythic_upgrade
    };

    // Source one: the pack's own wildcard slots.
    let from_packs = RarityCounts {
        common: WILDCARD_COMMON_RATE,
        uncommon: WILDCARD_UNCOMMON_RATE,
        rare: WILDCARD_RARE_SLOT_RATE * (1.0 - mythic_upgrade),
        mythic: WILDCARD_RARE_SLOT_RATE * mythic_upgrade,
    };

    // Source two: the periodic wildcard wheel.
    let wheel_boost = if options.golden_pack {
        GOLDEN_WHEEL_BOOST
    } else {
        1.0
    };
    let from_wheel = RarityCounts {
        common: 0.0,
        uncommon: WHEEL_WILDCARD_RATE,
        rare: WHEEL_WILDCARD_RATE * WHEEL_RARE_SHARE,
        mythic: WHEEL_WILDCARD_RATE * WHEEL_MYTHIC_SHARE,
    }
    .scale(wheel_boost);

    // Cards that stay cards: slots minus wildcard and bonus-sheet
    // replacements. Golden packs shift the rare slot with their own fixed
    // upgrade rate.
    let card_mythic_upgrade = if options.golden_pack {
        GOLDEN_MYTHIC_UPGRADE_RATE
    } else {
        mythic_upgrade
    };
    let rare_slot_cards = PACK_RARE_SLOTS - WILDCARD_RARE_SLOT_RATE;
    let cards = RarityCounts {
        common: (PACK_COMMON_SLOTS - WILDCARD_COMMON_RATE - rates.bonus_sheet).max(0.0),
        uncommon: PACK_UNCOMMON_SLOTS - WILDCARD_UNCOMMON_RATE,
        rare: rare_slot_cards * (1.0 - card_mythic_upgrade),
        mythic: rare_slot_cards * card_mythic_upgrade,
    };

    // Source three: vault progress from the commons and uncommons above.
    let vault_pct_per_pack =
        cards.common * VAULT_PCT_PER_COMMON + cards.uncommon * VAULT_PCT_PER_UNCOMMON;
    let from_vault = if options.include_vault {
        RarityCounts {
            common: 0.0,
            uncommon: vault_pct_per_pack * VAULT_UNCOMMON_WC_PER_PCT,
            rare: vault_pct_per_pack * VAULT_RARE_WC_PER_PCT,
            mythic: vault_pct_per_pack * VAULT_MYTHIC_WC_PER_PCT,
        }
    } else {
        RarityCounts::default()
    };

    let packs = options.packs;
    let from_packs = from_packs.scale(packs);
    let from_wheel = from_wheel.scale(packs);
    let from_vault = from_vault.scale(packs);
    PackYield {
        wildcards: from_packs.plus(from_wheel).plus(from_vault),
        cards: cards.scale(packs),
        bonus_cards: rates.bonus_sheet * packs,
        from_packs,
        from_wheel,
        from_vault,
        vault_percent: vault_pct_per_pack * packs,
    }
}
