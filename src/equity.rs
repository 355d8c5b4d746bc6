use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{Board, MAX_BOARD_CARDS};
use crate::cards::{Card, remaining_deck};
use crate::range::Range;
use crate::ranking::{FiveCardEvaluator, HandRanker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityTally {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
    /// Trials dropped for a card conflict or a short deck.
    pub discarded: u32,
    /// Trials run, discarded ones included.
    pub iterations: u32,
}

impl EquityTally {
    pub fn equity(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        (self.wins as f64 + self.ties as f64 / 2.0) / self.iterations as f64 * 100.0
    }

    pub fn resolved(&self) -> u32 {
        self.wins + self.ties + self.losses
    }
}

pub fn estimate<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> f64 {
    simulate(hero, villain, board, iterations, rng).equity()
}

pub fn estimate_with<K: HandRanker, R: Rng + ?Sized>(
    ranker: &K,
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> f64 {
    simulate_with(ranker, hero, villain, board, iterations, rng).equity()
}

pub fn simulate<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> EquityTally {
    simulate_with(&FiveCardEvaluator, hero, villain, board, iterations, rng)
}

pub fn simulate_with<K: HandRanker, R: Rng + ?Sized>(
    ranker: &K,
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> EquityTally {
    let mut tally = EquityTally::default();
    if hero.is_empty() || villain.is_empty() {
        debug!(
            hero = hero.len(),
            villain = villain.len(),
            "empty range, skipping simulation"
        );
        return tally;
    }

    let need = MAX_BOARD_CARDS.saturating_sub(board.len());
    let mut hero_cards: Vec<Card> = Vec::with_capacity(MAX_BOARD_CARDS + 2);
    let mut villain_cards: Vec<Card> = Vec::with_capacity(MAX_BOARD_CARDS + 2);

    for _ in 0..iterations {
        tally.iterations += 1;
        let (Some(hero_hand), Some(villain_hand)) =
            (hero.hands().choose(rng), villain.hands().choose(rng))
        else {
            tally.discarded += 1;
            continue;
        };

        let mut used = board.card_set();
        for card in hero_hand.cards().into_iter().chain(villain_hand.cards()) {
            used.insert(card);
        }
        // Conflicting draws are discarded, not redrawn, and still count as a trial.
        if used.len() != board.len() + 4 {
            tally.discarded += 1;
            continue;
        }

        let deck = remaining_deck(&used);
        if deck.len() < need {
            tally.discarded += 1;
            continue;
        }

        hero_cards.clear();
        villain_cards.clear();
        hero_cards.extend_from_slice(board.cards());
        hero_cards.extend(deck.choose_multiple(rng, need).copied());
        villain_cards.extend_from_slice(&hero_cards);
        hero_cards.extend(hero_hand.cards());
        villain_cards.extend(villain_hand.cards());

        match ranker.rank(&hero_cards).cmp(&ranker.rank(&villain_cards)) {
            Ordering::Greater => tally.wins += 1,
            Ordering::Equal => tally.ties += 1,
            Ordering::Less => tally.losses += 1,
        }
    }

    trace!(
        wins = tally.wins,
        ties = tally.ties,
        losses = tally.losses,
        discarded = tally.discarded,
        board = %board,
        "simulation finished"
    );
    tally
}
