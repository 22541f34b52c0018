//! Reward tables and level-range aggregation.
//!
//! Tables arrive as JSON rows of `[count, item, subitem?]` triples, one row
//! per mastery level, produced offline by scraping the published drop-rate
//! page. The scraper is best-effort; a mis-split reward string shows up here
//! as an oddly named item, not as a parse failure.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;

/// One reward on a mastery level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEntry {
    pub count: u32,
    pub item: String,
    /// Refines display (e.g. a booster's originating set); never affects
    /// grouping.
    pub subitem: Option<String>,
}

/// All rewards granted by a single level.
pub type RewardRow = SmallVec<[RewardEntry; 4]>;

/// Ordered reward rows, 1-indexed by level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardTable(Vec<RewardRow>);

/// A reward item summed over a level range, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedReward {
    pub item: String,
    pub count: u32,
    /// Per-subitem counts; `BTreeMap` keeps rendering alphabetical.
    pub subitems: Option<BTreeMap<String, u32>>,
}

impl RewardTable {
    /// Parse a scraped reward table from its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not the `[[count, item,
    /// subitem?], ...]` row format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Reward row for a 1-indexed level, clamped to the last row so levels
    /// past the table keep repeating the final reward.
    #[must_use]
    pub fn row_for_level(&self, level: u32) -> Option<&RewardRow> {
        if self.0.is_empty() {
            return None;
        }
        let idx = (level.max(1) as usize - 1).min(self.0.len() - 1);
        self.0.get(idx)
    }
}

impl Serialize for RewardEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.subitem.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.count)?;
        seq.serialize_element(&self.item)?;
        if let Some(subitem) = &self.subitem {
            seq.serialize_element(subitem)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RewardEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = RewardEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [count, item, subitem?] reward triple")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let count = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let item = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let subitem = seq.next_element()?;
                Ok(RewardEntry { count, item, subitem })
            }
        }

        deserializer.deserialize_seq(EntryVisitor)
    }
}

/// Category matcher: either an exact item name or a pattern, evaluated in
/// priority order with first-match-wins semantics.
enum Matcher {
    Exact(&'static str),
    Pattern(Regex),
}

impl Matcher {
    fn matches(&self, item: &str) -> bool {
        match self {
            Self::Exact(name) => item == *name,
            Self::Pattern(re) => re.is_match(item),
        }
    }
}

/// Rank for items no matcher claims; sorts after every named category.
const UNCATEGORIZED_RANK: u8 = 99;

static CATEGORY_RANKS: Lazy<Vec<(Matcher, u8)>> = Lazy::new(|| {
    let pattern = |src: &str| Matcher::Pattern(Regex::new(src).expect("static category pattern"));
    vec![
        (Matcher::Exact("Gems"), 0),
        (Matcher::Exact("Gold"), 1),
        (Matcher::Exact("Booster"), 2),
        (pattern("Draft Token"), 3),
        (pattern(r"\bICR\b"), 4),
        (pattern(r"\bCard$"), 4),
        (Matcher::Exact("Orb"), 5),
        (pattern(r"\bCS\b"), 9),
        (Matcher::Exact("Card Style"), 9),
        (pattern(r"\bPet\b|\bCompanion\b"), 6),
        (pattern(r"\bAvatar\b"), 7),
        (pattern(r"\bSleeve\b"), 8),
        (pattern(r"\bEmote\b"), 10),
    ]
});

/// Display rank of a reward item name; first matching category wins.
#[must_use]
pub fn sort_rank(item: &str) -> u8 {
    for (matcher, rank) in CATEGORY_RANKS.iter() {
        if matcher.matches(item) {
            return *rank;
        }
    }
    UNCATEGORIZED_RANK
}

/// Sum rewards over an inclusive level range into a deduplicated, ranked
/// list. Levels past the table clamp to its last row; an inverted range is
/// empty. Ties within a rank keep first-seen order.
#[must_use]
pub fn aggregate_rewards(
    table: &RewardTable,
    start_level: u32,
    end_level: u32,
) -> Vec<AggregatedReward> {
    let mut order: Vec<AggregatedReward> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for level in start_level..=end_level {
        let Some(row) = table.row_for_level(level) else {
            break;
        };
        for entry in row {
            let slot = *index.entry(entry.item.clone()).or_insert_with(|| {
                order.push(AggregatedReward {
                    item: entry.item.clone(),
                    count: 0,
                    subitems: None,
                });
                order.len() - 1
            });
            let aggregated = &mut order[slot];
            aggregated.count += entry.count;
            if let Some(subitem) = &entry.subitem {
                let map = aggregated.subitems.get_or_insert_with(BTreeMap::new);
                *map.entry(subitem.clone()).or_insert(0) += entry.count;
            }
        }
    }

    order.sort_by_key(|reward| sort_rank(&reward.item));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RewardTable {
        RewardTable::from_json(
            r#"[
                [[1, "Booster", "DFT"], [100, "Gold"]],
                [[1, "Gems"]],
                [[1, "Booster", "TDM"], [1, "Foo Token"]]
            ]"#,
        )
        .expect("fixture parses")
    }

    #[test]
    fn entries_parse_with_and_without_subitems() {
        let t = table();
        let row = t.row_for_level(1).unwrap();
        assert_eq!(row[0].subitem.as_deref(), Some("DFT"));
        assert_eq!(row[1].subitem, None);
        assert_eq!(row[1].count, 100);
    }

    #[test]
    fn rows_clamp_to_last_for_overflow_levels() {
        let t = table();
        assert_eq!(t.row_for_level(3), t.row_for_level(8));
        assert!(RewardTable::default().row_for_level(1).is_none());
    }

    #[test]
    fn aggregation_matches_direct_summation() {
        let t = table();
        let rewards = aggregate_rewards(&t, 1, 3);
        let boosters = rewards.iter().find(|r| r.item == "Booster").unwrap();
        assert_eq!(boosters.count, 2);
        let subitems = boosters.subitems.as_ref().unwrap();
        assert_eq!(subitems.get("DFT"), Some(&1));
        assert_eq!(subitems.get("TDM"), Some(&1));
    }

    #[test]
    fn aggregation_reuses_last_row_for_excess_levels() {
        let t = table();
        // Five levels past the table all repeat row 3.
        let rewards = aggregate_rewards(&t, 1, 8);
        let boosters = rewards.iter().find(|r| r.item == "Booster").unwrap();
        assert_eq!(boosters.count, 7);
        assert_eq!(
            boosters.subitems.as_ref().unwrap().get("TDM"),
            Some(&6)
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(aggregate_rewards(&table(), 3, 2).is_empty());
    }

    #[test]
    fn category_order_puts_uncategorized_last() {
        let rewards = aggregate_rewards(&table(), 1, 3);
        let names: Vec<&str> = rewards.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(names, vec!["Gems", "Gold", "Booster", "Foo Token"]);
    }

    #[test]
    fn sort_rank_first_match_wins() {
        assert_eq!(sort_rank("Gems"), 0);
        assert_eq!(sort_rank("Gold"), 1);
        assert_eq!(sort_rank("Mythic ICR"), 4);
        assert_eq!(sort_rank("Player Card"), 4);
        assert_eq!(sort_rank("Depict CS"), 9);
        assert_eq!(sort_rank("Boltwing Pet"), 6);
        assert_eq!(sort_rank("Loot Emote"), 10);
        assert_eq!(sort_rank("Mystery Thing"), UNCATEGORIZED_RANK);
    }
}
