use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::cards::{Card, Rank, Suit, standard_deck};
use crate::equity::estimate;
use crate::range::Range;

pub const SCARE_THRESHOLD: f64 = 5.0;

pub const HEATMAP_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunoutEntry {
    pub card: Card,
    pub equity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunoutTable {
    entries: Vec<RunoutEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunoutRisk {
    pub baseline: f64,
    pub weighted_downside_risk: f64,
    pub scare_cards: usize,
    /// Cards that do not lower equity at all.
    pub safe_cards: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub rank: char,
    pub equities: [Option<f64>; 4],
}

impl RunoutTable {
    pub fn new(entries: Vec<RunoutEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RunoutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn equity_for(&self, card: Card) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.card == card)
            .map(|entry| entry.equity)
    }

    pub fn risk(&self, baseline: f64) -> RunoutRisk {
        let mut weighted_downside_risk = 0.0;
        let mut hurting = 0;
        let mut scare_cards = 0;
        for entry in &self.entries {
            let loss = baseline - entry.equity;
            if loss > 0.0 {
                weighted_downside_risk += loss;
                hurting += 1;
            }
            if loss > SCARE_THRESHOLD {
                scare_cards += 1;
            }
        }
        RunoutRisk {
            baseline,
            weighted_downside_risk,
            scare_cards,
            safe_cards: self.entries.len() - hurting,
        }
    }

    pub fn heatmap(&self) -> Vec<HeatmapRow> {
        Rank::ALL
            .iter()
            .rev()
            .map(|rank| HeatmapRow {
                rank: rank.code(),
                equities: HEATMAP_SUITS.map(|suit| self.equity_for(Card::new(*rank, suit))),
            })
            .collect()
    }
}

pub fn candidate_cards(board: &Board) -> Vec<Card> {
    if board.is_complete() {
        return Vec::new();
    }
    standard_deck()
        .into_iter()
        .filter(|card| !board.contains(*card))
        .collect()
}

/// A complete board has no next card and yields an empty table.
pub fn analyze_runouts<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> RunoutTable {
    analyze_runouts_with_progress(hero, villain, board, iterations, rng, |_, _| {})
}

pub fn analyze_runouts_with_progress<R, F>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
    mut progress: F,
) -> RunoutTable
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize),
{
    let candidates = candidate_cards(board);
    let total = candidates.len();
    debug!(%board, cards = total, iterations, "analyzing runouts");

    let mut entries = Vec::with_capacity(total);
    for (done, card) in candidates.into_iter().enumerate() {
        let equity = estimate(hero, villain, &board.with(card), iterations, rng);
        entries.push(RunoutEntry { card, equity });
        progress(done + 1, total);
    }
    RunoutTable { entries }
}

// Seeds are drawn before fan-out so the result does not depend on scheduling.
pub fn analyze_runouts_parallel<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> RunoutTable {
    let candidates = candidate_cards(board);
    let seeds: Vec<u64> = candidates.iter().map(|_| rng.next_u64()).collect();
    debug!(%board, cards = candidates.len(), iterations, "analyzing runouts in parallel");

    let entries = candidates
        .par_iter()
        .zip(seeds.par_iter())
        .map(|(card, seed)| {
            let mut card_rng = StdRng::seed_from_u64(*seed);
            let equity = estimate(hero, villain, &board.with(*card), iterations, &mut card_rng);
            RunoutEntry { card: *card, equity }
        })
        .collect();
    RunoutTable { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn entry(code: &str, equity: f64) -> RunoutEntry {
        RunoutEntry {
            card: card(code),
            equity,
        }
    }

    #[test]
    fn risk_sums_losses_below_baseline() {
        let table = RunoutTable::new(vec![
            entry("2c", 40.0),
            entry("3c", 48.0),
            entry("4c", 50.0),
            entry("5c", 70.0),
        ]);
        let risk = table.risk(50.0);
        assert!((risk.weighted_downside_risk - 12.0).abs() < 1e-9);
        assert_eq!(risk.scare_cards, 1);
        assert_eq!(risk.safe_cards, 2);
    }

    #[test]
    fn exactly_five_points_is_not_a_scare_card() {
        let table = RunoutTable::new(vec![entry("9d", 45.0)]);
        let risk = table.risk(50.0);
        assert_eq!(risk.scare_cards, 0);
        assert_eq!(risk.safe_cards, 0);
    }

    #[test]
    fn candidates_skip_board_cards() {
        let board = Board::parse("Th 8d 2c").unwrap();
        let cards = candidate_cards(&board);
        assert_eq!(cards.len(), 49);
        assert!(!cards.contains(&card("Th")));
        assert!(candidate_cards(&Board::parse("2c 3d 4h 5s 7c").unwrap()).is_empty());
    }

    #[test]
    fn heatmap_marks_board_cards_empty() {
        let table = RunoutTable::new(vec![entry("Ah", 61.0)]);
        let rows = table.heatmap();
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0].rank, 'A');
        assert_eq!(rows[0].equities, [None, Some(61.0), None, None]);
        assert_eq!(rows[12].rank, '2');
    }
}
