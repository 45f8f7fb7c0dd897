//! Repeated coin-flip wagering game.
//!
//! Every player starts with the same bankroll and bets all of it on each of
//! a fixed number of fair tosses. The population average grows while most
//! individual players go broke; the report makes that visible.

pub mod rng;
pub mod simulation;

use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::analyzers::utility::round_to;
use crate::game::rng::Coin;
use crate::game::simulation::{GameOutcome, log_histogram, play, selected_players};

/// Smallest and largest decade of the bankroll histogram.
const HISTOGRAM_DECADES: (i32, i32) = (-2, 10);

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub people: usize,
    pub bank: f64,
    pub flips: u32,
    /// Drawn from the clock when absent.
    pub seed: Option<u64>,
    /// Players whose individual result is announced.
    pub me: Vec<usize>,
    pub win: f64,
    pub loss: f64,
    pub histogram: bool,
    pub verbose: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            people: 10_000,
            bank: 1000.0,
            flips: 50,
            seed: None,
            me: Vec::new(),
            win: 0.50,
            loss: 0.40,
            histogram: false,
            verbose: false,
        }
    }
}

impl GameConfig {
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
            nanos.unsigned_abs() % 100_000_000
        })
    }
}

/// Plays one game with a seeded generator and writes the report to `out`.
pub fn run<W: Write>(out: &mut W, config: &GameConfig) -> Result<GameOutcome> {
    let seed = config.resolve_seed();
    info!(seed, "Seeding coin");

    let mut coin = Coin::seeded(seed);
    let outcome = play(config, &mut coin);
    write_report(out, config, &outcome)?;

    Ok(outcome)
}

pub fn write_report<W: Write>(
    out: &mut W,
    config: &GameConfig,
    outcome: &GameOutcome,
) -> Result<()> {
    let me = selected_players(config);

    for &player in &me {
        let won = outcome.is_winner(player, config.bank).unwrap_or(false);
        writeln!(
            out,
            "Player {player} ended with a total of ${}: you {}!",
            format_money(outcome.finals[player]),
            if won { "win" } else { "lose" }
        )?;
    }

    if config.verbose || !me.is_empty() {
        writeln!(
            out,
            "On average, every player ended with ${}: the team {}!",
            format_money(outcome.average),
            if outcome.team_wins() { "wins" } else { "loses" }
        )?;
    }

    if config.verbose {
        writeln!(out, "     total: ${}", format_money(round_to(outcome.total, 2)))?;
        writeln!(out, "   average: ${}", format_money(outcome.average))?;
        writeln!(out, "house bank: ${}", format_money(outcome.house_bank))?;
        writeln!(out, "   winners: {}", outcome.winners)?;
    }

    if config.histogram {
        let (start, end) = HISTOGRAM_DECADES;
        writeln!(out, "bin, Count")?;
        for (upper, count) in log_histogram(&outcome.finals, start, end) {
            writeln!(out, "{upper:?}, {count}")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Shortest decimal form with `,` between thousands: `1234567.5` becomes
/// `1,234,567.5`.
pub fn format_money(value: f64) -> String {
    let text = format!("{value:?}");
    if text.contains('e') || !value.is_finite() {
        return text;
    }

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
