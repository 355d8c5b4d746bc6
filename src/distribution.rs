use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::equity::estimate;
use crate::range::{Hand, Range};

pub const DISTRIBUTION_SAMPLE_CAP: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSample {
    pub hands: Vec<Hand>,
    pub equities: Vec<f64>,
}

impl DistributionSample {
    pub fn len(&self) -> usize {
        self.equities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equities.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.equities.is_empty() {
            return None;
        }
        Some(self.equities.iter().sum::<f64>() / self.equities.len() as f64)
    }

    /// Counts per equal-width bucket over `0..=100`; 100 lands in the last one.
    pub fn histogram(&self, buckets: usize) -> Vec<usize> {
        let mut counts = vec![0; buckets];
        if buckets == 0 {
            return counts;
        }
        for equity in &self.equities {
            let idx = ((equity.clamp(0.0, 100.0) / 100.0) * buckets as f64) as usize;
            counts[idx.min(buckets - 1)] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeDistribution {
    pub hero: DistributionSample,
    pub villain: DistributionSample,
}

pub fn sample_hands<R: Rng + ?Sized>(range: &Range, rng: &mut R) -> Vec<Hand> {
    if range.len() > DISTRIBUTION_SAMPLE_CAP {
        range
            .hands()
            .choose_multiple(rng, DISTRIBUTION_SAMPLE_CAP)
            .copied()
            .collect()
    } else {
        range.hands().to_vec()
    }
}

pub fn analyze_distribution<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> RangeDistribution {
    let hero_hands = sample_hands(hero, rng);
    let villain_hands = sample_hands(villain, rng);
    debug!(
        %board,
        hero = hero_hands.len(),
        villain = villain_hands.len(),
        iterations,
        "analyzing range distribution"
    );

    let score = |hands: Vec<Hand>, opponent: &Range, rng: &mut R| {
        let equities = hands
            .iter()
            .map(|hand| estimate(&Range::from(*hand), opponent, board, iterations, &mut *rng))
            .collect();
        DistributionSample { hands, equities }
    };

    let hero_sample = score(hero_hands, villain, &mut *rng);
    let villain_sample = score(villain_hands, hero, &mut *rng);
    RangeDistribution {
        hero: hero_sample,
        villain: villain_sample,
    }
}

pub fn analyze_distribution_parallel<R: Rng + ?Sized>(
    hero: &Range,
    villain: &Range,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> RangeDistribution {
    let hero_hands = sample_hands(hero, rng);
    let villain_hands = sample_hands(villain, rng);
    let hero_seeds: Vec<u64> = hero_hands.iter().map(|_| rng.next_u64()).collect();
    let villain_seeds: Vec<u64> = villain_hands.iter().map(|_| rng.next_u64()).collect();
    debug!(
        %board,
        hero = hero_hands.len(),
        villain = villain_hands.len(),
        iterations,
        "analyzing range distribution in parallel"
    );

    let score = |hands: Vec<Hand>, seeds: Vec<u64>, opponent: &Range| {
        let equities = hands
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(hand, seed)| {
                let mut hand_rng = StdRng::seed_from_u64(*seed);
                estimate(&Range::from(*hand), opponent, board, iterations, &mut hand_rng)
            })
            .collect();
        DistributionSample { hands, equities }
    };

    RangeDistribution {
        hero: score(hero_hands, hero_seeds, villain),
        villain: score(villain_hands, villain_seeds, hero),
    }
}
