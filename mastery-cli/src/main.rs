mod report;
mod store;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use mastery_core::{
    Outstanding, PackOptions, ProgressBook, Projection, Season, SeasonCatalog, WinRates,
    aggregate_rewards, at_least, distribution, distribution_with_smoothing,
    distribution_with_smoothing7, gold_per_week, packs_to_wildcards, quest_fraction, time_left,
    time_remaining, xp_curve, xp_for_instant,
};

use report::{
    format_date, format_xp, pct, rarity_header, rarity_row, reward_line, season_banner,
    time_remaining_line,
};
use store::FileProgress;

const WATCH_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Parser)]
#[command(name = "mastery", version)]
#[command(about = "Seasonal mastery, pack and draw-odds calculators for Arena")]
struct Cli {
    /// Progress file holding banked XP per season
    #[arg(long, global = true, default_value = "mastery-progress.json")]
    data_file: PathBuf,

    /// Reference instant (RFC 3339); defaults to now
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every season in the catalog
    Seasons,
    /// Season window, time remaining and banked XP
    Status {
        /// Season code; defaults to the current season
        #[arg(long)]
        season: Option<String>,
        /// Re-render once per minute until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Project season-end XP, target level and weekly gold
    Project(ProjectArgs),
    /// Aggregate earned, expected and missed rewards
    Rewards(ProjectArgs),
    /// Expected wildcards and cards for a batch of packs
    Packs {
        /// Number of packs to open
        #[arg(long, default_value_t = 1.0)]
        packs: f64,
        /// Packs always upgrade the rare slot to mythic
        #[arg(long)]
        mythic: bool,
        /// Golden pack variant
        #[arg(long)]
        golden: bool,
        /// Convert vault progress into wildcards
        #[arg(long)]
        vault: bool,
        /// Season code selecting pack rates; defaults to the current season
        #[arg(long)]
        season: Option<String>,
    },
    /// Hypergeometric land-draw odds
    Draw {
        #[arg(long, default_value_t = 60)]
        deck: u64,
        #[arg(long, default_value_t = 24)]
        lands: u64,
        #[arg(long, default_value_t = 7)]
        draws: u64,
        /// Lower bound of the desired land count
        #[arg(long, default_value_t = 0)]
        min: u64,
        /// Upper bound of the desired land count; defaults to the draw count
        #[arg(long)]
        max: Option<u64>,
        /// Apply the best-of-three-hands smoothing bias
        #[arg(long)]
        smooth: bool,
        /// Smooth only the 7-card opening hand
        #[arg(long)]
        opening_hand: bool,
    },
    /// Persist banked XP for a season
    SetXp {
        #[arg(long)]
        season: String,
        #[arg(long)]
        xp: u64,
    },
}

/// Shared projection inputs for `project` and `rewards`.
#[derive(Debug, ClapArgs)]
struct ProjectArgs {
    /// Season code; defaults to the current season
    #[arg(long)]
    season: Option<String>,
    /// Expected wins per day (rewards cap at 10)
    #[arg(long, default_value_t = 4)]
    daily_wins: u32,
    /// Expected wins per week (rewards cap at 15)
    #[arg(long, default_value_t = 15)]
    weekly_wins: u32,
    /// Assumed remaining quest completions; omit to assume all
    #[arg(long)]
    quests: Option<u32>,
    /// Banked XP override; defaults to the progress file entry
    #[arg(long)]
    current_xp: Option<u64>,
    /// Completed-but-uncollected quests (live season only)
    #[arg(long, default_value_t = 0)]
    rem_quests: u32,
    /// Uncollected daily wins (live season only)
    #[arg(long, default_value_t = 0)]
    rem_daily_wins: u32,
    /// Uncollected weekly wins (live season only)
    #[arg(long, default_value_t = 0)]
    rem_weekly_wins: u32,
    /// Hours between XP curve samples
    #[arg(long, default_value_t = 168)]
    interval_hours: i64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = SeasonCatalog::builtin().context("building the season catalog")?;
    let now = cli.at.unwrap_or_else(Utc::now);
    let book = ProgressBook::new(FileProgress::new(cli.data_file.clone()));

    match cli.command {
        Command::Seasons => run_seasons(&catalog, now),
        Command::Status { season, watch } => {
            run_status(&catalog, &book, now, season.as_deref(), watch)
        }
        Command::Project(args) => run_project(&catalog, &book, now, &args),
        Command::Rewards(args) => run_rewards(&catalog, &book, now, &args),
        Command::Packs {
            packs,
            mythic,
            golden,
            vault,
            season,
        } => run_packs(&catalog, now, packs, mythic, golden, vault, season.as_deref()),
        Command::Draw {
            deck,
            lands,
            draws,
            min,
            max,
            smooth,
            opening_hand,
        } => run_draw(deck, lands, draws, min, max, smooth, opening_hand),
        Command::SetXp { season, xp } => run_set_xp(&catalog, &book, &season, xp),
    }
}

fn resolve_season<'a>(
    catalog: &'a SeasonCatalog,
    now: DateTime<Utc>,
    code: Option<&str>,
) -> Result<&'a Season> {
    match code {
        Some(code) => catalog
            .get(code)
            .with_context(|| format!("unknown season code {code}")),
        None => catalog
            .current(now)
            .context("resolving the current season"),
    }
}

fn run_seasons(catalog: &SeasonCatalog, now: DateTime<Utc>) -> Result<()> {
    let current = catalog.current(now).map(|s| s.code.clone()).ok();
    for season in catalog.seasons() {
        let is_current = current.as_deref() == Some(season.code.as_str());
        println!("{}", season_banner(season, is_current));
    }
    Ok(())
}

fn run_status(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    now: DateTime<Utc>,
    code: Option<&str>,
    watch: bool,
) -> Result<()> {
    loop {
        let at = if watch { Utc::now() } else { now };
        render_status(catalog, book, at, code)?;
        if !watch {
            return Ok(());
        }
        thread::sleep(Duration::from_secs(WATCH_INTERVAL_SECS));
        println!();
    }
}

fn render_status(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    now: DateTime<Utc>,
    code: Option<&str>,
) -> Result<()> {
    let season = resolve_season(catalog, now, code)?;
    let current = catalog.current(now).map(|s| s.code.clone()).ok();
    let reference = mastery_core::clamp_to_season(now, season);
    let banked = book.xp_for(&season.code)?;

    let total = xp_for_instant(season.start_date, season, WinRates::default());
    let remaining = xp_for_instant(reference, season, WinRates::default());
    let left = time_left(reference, season);

    println!(
        "{}",
        season_banner(season, current.as_deref() == Some(season.code.as_str()))
    );
    println!(
        "Time remaining: {}",
        time_remaining_line(time_remaining(reference, season.end_date), season, now)
    );
    println!(
        "Remaining XP: {} / {}",
        format_xp(remaining).bold(),
        format_xp(total)
    );
    println!(
        "Banked XP: {} (level {})",
        format_xp(banked),
        mastery_core::xp_to_level(banked)
    );
    println!(
        "Resets left: {} days, {} Sundays, {} quests",
        left.days_left, left.sundays_left, left.quests_left
    );
    Ok(())
}

fn projection_inputs(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    now: DateTime<Utc>,
    args: &ProjectArgs,
) -> Result<(Projection, WinRates, u64)> {
    let season = resolve_season(catalog, now, args.season.as_deref())?;
    let current_code = catalog.current(now).map(|s| s.code.clone()).ok();

    let rates = WinRates {
        daily_wins: args.daily_wins.min(15),
        weekly_wins: args.weekly_wins.min(15).max(args.daily_wins.min(15)),
        quest_cap: args.quests,
    };
    let current_xp = match args.current_xp {
        Some(xp) => xp,
        None => book.xp_for(&season.code)?,
    };
    // Uncollected counters only make sense for the live season.
    let outstanding = Outstanding {
        quests: args.rem_quests.min(3),
        daily_wins: args.rem_daily_wins.min(10),
        weekly_wins: args.rem_weekly_wins.min(15),
    }
    .for_season(season, current_code.as_deref().unwrap_or_default());

    let projection = Projection::compute(now, season, rates, current_xp, outstanding);
    Ok((projection, rates, current_xp))
}

fn run_project(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    now: DateTime<Utc>,
    args: &ProjectArgs,
) -> Result<()> {
    let season = resolve_season(catalog, now, args.season.as_deref())?;
    let (projection, rates, _) = projection_inputs(catalog, book, now, args)?;

    let reference = mastery_core::clamp_to_season(now, season);
    let left = time_left(reference, season);
    let fraction = quest_fraction(args.quests.unwrap_or(left.quests_left), left.quests_left);
    let gold = gold_per_week(rates.daily_wins, fraction);

    println!("Projected XP to earn: {}", format_xp(projection.estimated_xp).bold());
    println!(
        "Estimated season-end XP: {} (level {}{})",
        format_xp(projection.max_xp),
        projection.target_level,
        season
            .max_level
            .map(|cap| format!("/{cap}"))
            .unwrap_or_default()
    );
    println!(
        "Weekly gold: {} avg ({} - {})",
        format_xp(gold.avg).bold(),
        format_xp(gold.min),
        format_xp(gold.max)
    );

    if args.interval_hours > 0 {
        println!();
        println!("{}", "XP earned by date (full caps):".bold());
        for (date, xp) in xp_curve(season, WinRates::default(), args.interval_hours) {
            println!("  {}  {}", format_date(date), format_xp(xp));
        }
    }
    Ok(())
}

fn run_rewards(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    now: DateTime<Utc>,
    args: &ProjectArgs,
) -> Result<()> {
    let season = resolve_season(catalog, now, args.season.as_deref())?;
    let Some(table) = season.rewards.as_ref() else {
        bail!("season {} has no reward table", season.code);
    };
    let (projection, _, _) = projection_inputs(catalog, book, now, args)?;

    let [earned, expected, missed] = projection.level_partition();
    for (title, (lo, hi)) in [
        ("Current rewards", earned),
        ("Expected rewards", expected),
        ("Missed rewards", missed),
    ] {
        println!("{}", title.bold());
        let rewards = aggregate_rewards(table, lo, hi);
        if rewards.is_empty() {
            println!("  (none)");
        }
        for reward in rewards {
            println!("  {}", reward_line(&reward));
        }
        println!();
    }
    Ok(())
}

fn run_packs(
    catalog: &SeasonCatalog,
    now: DateTime<Utc>,
    packs: f64,
    mythic: bool,
    golden: bool,
    vault: bool,
    code: Option<&str>,
) -> Result<()> {
    let season = resolve_season(catalog, now, code)?;
    let rates = catalog.pack_rates(&season.code);
    let options = PackOptions {
        packs: packs.max(0.0),
        mythic_pack: mythic,
        golden_pack: golden,
        include_vault: vault,
    };
    let yielded = packs_to_wildcards(options, rates);

    println!(
        "Opening {packs:.0} {} packs ({})",
        season.code,
        if golden { "golden" } else if mythic { "mythic" } else { "standard" }
    );
    println!("{}", rarity_header());
    println!("{}", rarity_row("wildcards", yielded.wildcards));
    println!("{}", rarity_row("  packs", yielded.from_packs));
    println!("{}", rarity_row("  wheel", yielded.from_wheel));
    if vault {
        println!("{}", rarity_row("  vault", yielded.from_vault));
    }
    println!("{}", rarity_row("cards", yielded.cards));
    if yielded.bonus_cards > 0.0 {
        println!("Bonus-sheet cards: {:.2}", yielded.bonus_cards);
    }
    println!("Vault progress: {:.2}%", yielded.vault_percent);
    Ok(())
}

fn run_draw(
    deck: u64,
    lands: u64,
    draws: u64,
    min: u64,
    max: Option<u64>,
    smooth: bool,
    opening_hand: bool,
) -> Result<()> {
    // Out-of-range entry is clamped to the documented domain, not rejected.
    let deck = deck.max(1);
    let lands = lands.min(deck);
    let draws = draws.clamp(1, deck);
    let max = max.unwrap_or(draws).min(draws);
    let min = min.min(max);

    let exact = distribution(draws, lands, deck);
    let smoothed = if opening_hand {
        Some(distribution_with_smoothing7(draws, lands, deck))
    } else if smooth {
        Some(distribution_with_smoothing(draws, lands, deck))
    } else {
        None
    };

    println!(
        "{deck}-card deck, {lands} lands, drawing {draws}: P({min} <= lands <= {max}) = {}",
        pct((min..=max).map(|k| exact.get(k as usize).copied().unwrap_or(0.0)).sum())
            .trim()
            .bold()
    );
    println!("At least {min}: {}", pct(at_least(min, draws, lands, deck)).trim());
    println!();

    let header = if smoothed.is_some() {
        format!("{:>5} {:>9} {:>9}", "lands", "exact", "smoothed")
    } else {
        format!("{:>5} {:>9}", "lands", "exact")
    };
    println!("{}", header.bold());
    for (k, p) in exact.iter().enumerate() {
        match &smoothed {
            Some(s) => println!("{k:>5} {} {}", pct(*p), pct(s[k])),
            None => println!("{k:>5} {}", pct(*p)),
        }
    }
    Ok(())
}

fn run_set_xp(
    catalog: &SeasonCatalog,
    book: &ProgressBook<FileProgress>,
    code: &str,
    xp: u64,
) -> Result<()> {
    if catalog.get(code).is_none() {
        bail!("unknown season code {code}");
    }
    book.set_xp(code, xp)
        .with_context(|| format!("writing progress for {code}"))?;
    log::debug!("stored {xp} XP for {code}");
    println!(
        "Stored {} XP for {} (level {})",
        format_xp(xp),
        code,
        mastery_core::xp_to_level(xp)
    );
    Ok(())
}
