use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::analyzers::utility::{mean, round_to};
use crate::game::GameConfig;
use crate::game::rng::Coin;

/// Plays `flips` tosses starting from `bankroll`. Heads grows the bankroll by
/// `payout`, tails shrinks it by `loss`; both rounded to cents. A player who
/// hits zero stops playing.
pub fn evaluate_winnings(
    coin: &mut Coin,
    bankroll: f64,
    flips: u32,
    payout: f64,
    loss: f64,
) -> f64 {
    let mut bankroll = bankroll;

    for _ in 0..flips {
        bankroll = if coin.flip() {
            round_to((1.0 + payout) * bankroll, 2)
        } else {
            round_to((1.0 - loss) * bankroll, 2)
        };

        if bankroll == 0.0 {
            break;
        }
    }

    bankroll
}

/// Result of one game across the whole population.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    /// Final bankroll of every player, in player order.
    pub finals: Vec<f64>,
    pub total: f64,
    /// Players who ended with at least their starting bankroll.
    pub winners: usize,
    /// What the house netted; negative when the players came out ahead.
    pub house_bank: f64,
    pub average: f64,
}

impl GameOutcome {
    pub fn is_winner(&self, player: usize, bankroll: f64) -> Option<bool> {
        self.finals.get(player).map(|&final_bank| final_bank >= bankroll)
    }

    pub fn team_wins(&self) -> bool {
        self.house_bank < 0.0
    }
}

/// Plays the game for every player, drawing all tosses from `coin`.
#[tracing::instrument(skip_all, fields(people = config.people, flips = config.flips))]
pub fn play(config: &GameConfig, coin: &mut Coin) -> GameOutcome {
    let mut finals = Vec::with_capacity(config.people);
    let mut total = 0.0;
    let mut winners = 0;

    for _ in 0..config.people {
        let winnings = evaluate_winnings(coin, config.bank, config.flips, config.win, config.loss);
        finals.push(winnings);
        total += winnings;

        if winnings >= config.bank {
            winners += 1;
        }
    }

    let house_bank = round_to(config.people as f64 * config.bank - round_to(total, 2), 2);
    let average = round_to(mean(&finals), 2);

    info!(total, winners, house_bank, "Game finished");

    GameOutcome {
        finals,
        total,
        winners,
        house_bank,
        average,
    }
}

/// Counts of final bankrolls per logarithmic bin, four bins per decade
/// between `10^start` and `10^end`. Values outside the range are dropped.
/// Each entry is `(upper edge, count)`.
pub fn log_histogram(values: &[f64], start: i32, end: i32) -> Vec<(f64, usize)> {
    let mut steps = 4 * (end - start);
    // spanning 10^0 adds one edge
    if start * end < 0 {
        steps += 1;
    }
    if steps < 2 {
        return Vec::new();
    }

    let exponent_step = f64::from(end - start) / f64::from(steps - 1);
    let edges: Vec<f64> = (0..steps)
        .map(|i| 10f64.powf(f64::from(start) + f64::from(i) * exponent_step))
        .collect();

    let mut counts = vec![0usize; edges.len() - 1];
    let (low, high) = (edges[0], edges[edges.len() - 1]);
    let last = counts.len() - 1;

    for &value in values {
        if value < low || value > high {
            continue;
        }
        // last bin is closed on the right
        let slot = edges.partition_point(|&edge| edge <= value).saturating_sub(1);
        counts[slot.min(last)] += 1;
    }

    debug!(bins = counts.len(), "Histogram built");
    edges[1..].iter().copied().zip(counts).collect()
}

/// Players whose individual result should be announced, ignoring indices
/// outside the population.
pub fn selected_players(config: &GameConfig) -> BTreeSet<usize> {
    config
        .me
        .iter()
        .copied()
        .filter(|&player| player < config.people)
        .collect()
}
