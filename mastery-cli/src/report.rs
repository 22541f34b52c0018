//! Console rendering helpers.

use chrono::{DateTime, Utc};
use colored::Colorize;
use mastery_core::{AggregatedReward, RarityCounts, Season, TimeRemaining};

/// Group an XP total with thousands separators, mastery style.
#[must_use]
pub fn format_xp(xp: u64) -> String {
    let digits = xp.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %d").to_string()
}

/// Season header line: name, window, current marker.
#[must_use]
pub fn season_banner(season: &Season, is_current: bool) -> String {
    let window = format!(
        "{} - {}",
        format_date(season.start_date),
        format_date(season.end_date)
    );
    let marker = if is_current {
        " (current)".green().to_string()
    } else {
        String::new()
    };
    format!(
        "{} [{}]: {}{}",
        season.name.bold(),
        season.code,
        window,
        marker
    )
}

/// `3d 4h 30m`, or an expired note with the season's total length.
#[must_use]
pub fn time_remaining_line(remaining: TimeRemaining, season: &Season, now: DateTime<Utc>) -> String {
    if now > season.end_date {
        let lasted = (season.end_date - season.start_date).num_days();
        return format!("Expired (lasted {lasted} days)").dimmed().to_string();
    }
    format!(
        "{}d {}h {}m",
        remaining.days, remaining.hours, remaining.minutes
    )
}

/// One aggregated reward as a list line, subitems alphabetical in
/// parentheses with counts only when above one.
#[must_use]
pub fn reward_line(reward: &AggregatedReward) -> String {
    let mut line = format!("{} {}", reward.count, reward.item);
    if let Some(subitems) = &reward.subitems {
        let parts: Vec<String> = subitems
            .iter()
            .map(|(name, count)| {
                if *count > 1 {
                    format!("{count}x {name}")
                } else {
                    name.clone()
                }
            })
            .collect();
        line.push_str(&format!(" ({})", parts.join(", ")).dimmed().to_string());
    }
    line
}

/// Fixed-width rarity table row.
#[must_use]
pub fn rarity_row(label: &str, counts: RarityCounts) -> String {
    format!(
        "{label:<12} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
        counts.common, counts.uncommon, counts.rare, counts.mythic
    )
}

#[must_use]
pub fn rarity_header() -> String {
    format!(
        "{:<12} {:>8} {:>8} {:>8} {:>8}",
        "", "common", "uncommon", "rare", "mythic"
    )
    .bold()
    .to_string()
}

/// Probability as a percentage with two decimals.
#[must_use]
pub fn pct(p: f64) -> String {
    format!("{:>7.2}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn xp_grouping_inserts_separators() {
        assert_eq!(format_xp(0), "0");
        assert_eq!(format_xp(950), "950");
        assert_eq!(format_xp(77_500), "77,500");
        assert_eq!(format_xp(1_234_567), "1,234,567");
    }

    #[test]
    fn reward_lines_show_subitem_counts_above_one() {
        colored::control::set_override(false);
        let mut subitems = BTreeMap::new();
        subitems.insert("DFT".to_string(), 2);
        subitems.insert("FDN".to_string(), 1);
        let reward = AggregatedReward {
            item: "Booster".to_string(),
            count: 3,
            subitems: Some(subitems),
        };
        assert_eq!(reward_line(&reward), "3 Booster (2x DFT, FDN)");
    }
}
