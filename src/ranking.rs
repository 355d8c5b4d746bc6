use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Orders poker hands. A greater strength is a strictly better hand; equal
/// strengths split the pot.
pub trait HandRanker {
    type Strength: Ord;

    fn rank(&self, cards: &[Card]) -> Self::Strength;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandStrength {
    pub category: HandCategory,
    pub ranks: [u8; 5],
}

impl HandStrength {
    const WEAKEST: HandStrength = HandStrength {
        category: HandCategory::HighCard,
        ranks: [0; 5],
    };
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FiveCardEvaluator;

impl HandRanker for FiveCardEvaluator {
    type Strength = HandStrength;

    fn rank(&self, cards: &[Card]) -> HandStrength {
        best_five_card_hand(cards)
    }
}

fn fill(mut values: Vec<u8>) -> [u8; 5] {
    values.resize(5, 0);
    [values[0], values[1], values[2], values[3], values[4]]
}

fn kickers(groups: &[(u8, u8)]) -> Vec<u8> {
    groups
        .iter()
        .filter(|(count, _)| *count == 1)
        .map(|(_, rank)| *rank)
        .collect()
}

/// Scores at most five cards. Fewer than five can only make pairs, trips,
/// quads and high cards.
fn evaluate_five(cards: &[Card]) -> HandStrength {
    let mut counts = [0u8; 15];
    let mut suits = [0u8; 4];
    let mut sorted_cards: Vec<u8> = cards.iter().map(|c| c.rank_value()).collect();
    sorted_cards.sort_unstable_by(|a, b| b.cmp(a));

    for card in cards {
        counts[card.rank_value() as usize] += 1;
        suits[card.suit.index()] += 1;
    }

    let is_flush = suits.contains(&5);

    let mut mask: u32 = 0;
    for rank_value in 2u8..=14 {
        if counts[rank_value as usize] > 0 {
            mask |= 1 << rank_value as u32;
            if rank_value == Rank::Ace.value() {
                mask |= 1 << 1; // wheel
            }
        }
    }

    let mut straight_high = None;
    for high in (5u8..=14).rev() {
        let needed: u32 = (0..5u8).fold(0, |acc, i| acc | 1 << (high - i) as u32);
        if mask & needed == needed {
            straight_high = Some(high);
            break;
        }
    }

    // (count, rank), biggest group first, ties broken by rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|rank| counts[*rank as usize] > 0)
        .map(|rank| (counts[rank as usize], rank))
        .collect();
    groups.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    if is_flush && let Some(high) = straight_high {
        return HandStrength {
            category: HandCategory::StraightFlush,
            ranks: fill(vec![high]),
        };
    }

    let top = groups.first().copied();
    let second_count = groups.get(1).map(|(count, _)| *count).unwrap_or(0);

    if let Some((4, rank)) = top {
        let kicker = groups.get(1).map(|(_, r)| *r).unwrap_or(0);
        return HandStrength {
            category: HandCategory::FourOfAKind,
            ranks: fill(vec![rank, kicker]),
        };
    }

    if let Some((3, rank)) = top
        && second_count == 2
    {
        return HandStrength {
            category: HandCategory::FullHouse,
            ranks: fill(vec![rank, groups[1].1]),
        };
    }

    if is_flush {
        return HandStrength {
            category: HandCategory::Flush,
            ranks: fill(sorted_cards),
        };
    }

    if let Some(high) = straight_high {
        return HandStrength {
            category: HandCategory::Straight,
            ranks: fill(vec![high]),
        };
    }

    match top {
        Some((3, rank)) => {
            let mut values = vec![rank];
            values.extend(kickers(&groups));
            HandStrength {
                category: HandCategory::ThreeOfAKind,
                ranks: fill(values),
            }
        }
        Some((2, rank)) if second_count == 2 => {
            let kicker = kickers(&groups).first().copied().unwrap_or(0);
            HandStrength {
                category: HandCategory::TwoPair,
                ranks: fill(vec![rank, groups[1].1, kicker]),
            }
        }
        Some((2, rank)) => {
            let mut values = vec![rank];
            values.extend(kickers(&groups));
            HandStrength {
                category: HandCategory::OnePair,
                ranks: fill(values),
            }
        }
        _ => HandStrength {
            category: HandCategory::HighCard,
            ranks: fill(sorted_cards),
        },
    }
}

pub fn best_five_card_hand(cards: &[Card]) -> HandStrength {
    if cards.len() <= 5 {
        return evaluate_five(cards);
    }
    cards
        .iter()
        .copied()
        .combinations(5)
        .map(|combo| evaluate_five(&combo))
        .fold(HandStrength::WEAKEST, Ord::max)
}
