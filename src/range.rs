use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::cards::{Card, CardParseError, Rank, Suit};

/// Two distinct cards. Equality and hashing ignore card order; display keeps it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    first: Card,
    second: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandParseError {
    #[error("hand '{0}' must be two card codes")]
    Length(String),
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error("hand repeats {0}")]
    RepeatedCard(Card),
}

impl Hand {
    pub fn new(first: Card, second: Card) -> Option<Self> {
        (first != second).then_some(Self { first, second })
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.first, self.second]
    }

    pub fn first(&self) -> Card {
        self.first
    }

    pub fn second(&self) -> Card {
        self.second
    }

    pub fn is_pair(&self) -> bool {
        self.first.rank == self.second.rank
    }

    pub fn is_suited(&self) -> bool {
        self.first.suit == self.second.suit
    }

    fn key(&self) -> (usize, usize) {
        let (a, b) = (self.first.index(), self.second.index());
        (a.min(b), a.max(b))
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

impl FromStr for Hand {
    type Err = HandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace("10", "T");
        if normalized.chars().count() != 4 {
            return Err(HandParseError::Length(s.to_string()));
        }
        let split = normalized
            .char_indices()
            .nth(2)
            .map(|(idx, _)| idx)
            .unwrap_or(normalized.len());
        let first: Card = normalized[..split].parse()?;
        let second: Card = normalized[split..].parse()?;
        Hand::new(first, second).ok_or(HandParseError::RepeatedCard(first))
    }
}

impl TryFrom<String> for Hand {
    type Error = HandParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> Self {
        hand.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Range {
    hands: Vec<Hand>,
}

impl Range {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter()
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.hands.contains(hand)
    }

    /// Drops repeated combos, keeping first occurrences.
    pub fn dedup(&self) -> Range {
        let mut seen = HashSet::new();
        let hands = self
            .hands
            .iter()
            .filter(|hand| seen.insert(**hand))
            .copied()
            .collect();
        Range { hands }
    }

    pub fn grid(&self) -> RangeGrid {
        RangeGrid::from_hands(&self.hands)
    }
}

impl From<Vec<Hand>> for Range {
    fn from(hands: Vec<Hand>) -> Self {
        Range::new(hands)
    }
}

impl From<Hand> for Range {
    fn from(hand: Hand) -> Self {
        Range::new(vec![hand])
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<String> = self.hands.iter().map(Hand::to_string).collect();
        f.write_str(&codes.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub range: Range,
    pub skipped: Vec<String>,
}

pub fn parse(text: &str) -> Range {
    parse_with_report(text).range
}

pub fn parse_with_report(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match expand_token(token) {
            Some(hands) => report.range.hands.extend(hands),
            None => {
                trace!(token, "skipping unreadable range token");
                report.skipped.push(token.to_string());
            }
        }
    }
    report
}

fn expand_token(token: &str) -> Option<Vec<Hand>> {
    let token = token.replace("10", "T");
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 {
        return None;
    }

    if chars.len() == 4 && is_suit_letter(chars[1]) && is_suit_letter(chars[3]) {
        return token.parse::<Hand>().ok().map(|hand| vec![hand]);
    }

    let high = Rank::from_char(chars[0])?;
    let low = Rank::from_char(chars[1])?;
    let suffix: String = chars[2..].iter().collect::<String>().to_ascii_lowercase();
    let (shape, plus) = match suffix.as_str() {
        "" => (Shape::Any, false),
        "+" => (Shape::Any, true),
        "s" => (Shape::Suited, false),
        "s+" => (Shape::Suited, true),
        "o" => (Shape::Offsuit, false),
        "o+" => (Shape::Offsuit, true),
        _ => return None,
    };

    if high == low {
        if shape != Shape::Any {
            return None;
        }
        return Some(expand_pairs(high, plus));
    }

    let (high, low) = if high > low { (high, low) } else { (low, high) };
    Some(expand_unpaired(high, low, shape, plus))
}

fn is_suit_letter(c: char) -> bool {
    Suit::from_char(c).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Suited,
    Offsuit,
    Any,
}

fn expand_pairs(from: Rank, plus: bool) -> Vec<Hand> {
    let top = if plus { Rank::Ace } else { from };
    let mut hands = Vec::new();
    for rank in Rank::ALL.into_iter().filter(|r| (from..=top).contains(r)) {
        for (i, s1) in Suit::ALL.iter().enumerate() {
            for s2 in &Suit::ALL[i + 1..] {
                hands.extend(Hand::new(Card::new(rank, *s1), Card::new(rank, *s2)));
            }
        }
    }
    hands
}

/// The top card stays fixed; `+` walks the kicker up to one below it.
fn expand_unpaired(high: Rank, low: Rank, shape: Shape, plus: bool) -> Vec<Hand> {
    let top_kicker = if plus { high.index() - 1 } else { low.index() };
    let mut hands = Vec::new();
    for kicker in Rank::ALL[low.index()..=top_kicker].iter().copied() {
        if shape != Shape::Offsuit {
            for suit in Suit::ALL {
                hands.extend(Hand::new(Card::new(high, suit), Card::new(kicker, suit)));
            }
        }
        if shape != Shape::Suited {
            for s1 in Suit::ALL {
                for s2 in Suit::ALL.into_iter().filter(|s| *s != s1) {
                    hands.extend(Hand::new(Card::new(high, s1), Card::new(kicker, s2)));
                }
            }
        }
    }
    hands
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeGrid {
    cells: [[bool; 13]; 13],
}

impl RangeGrid {
    pub fn from_hands(hands: &[Hand]) -> Self {
        let mut grid = RangeGrid::default();
        for hand in hands {
            let a = 12 - hand.first.rank.index();
            let b = 12 - hand.second.rank.index();
            let (strong, weak) = (a.min(b), a.max(b));
            if hand.is_pair() {
                grid.cells[strong][strong] = true;
            } else if hand.is_suited() {
                grid.cells[strong][weak] = true;
            } else {
                grid.cells[weak][strong] = true;
            }
        }
        grid
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| **cell).count()
    }
}

impl Display for RangeGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|on| if *on { 'x' } else { '.' }).collect())
            .collect();
        f.write_str(&lines.join("\n"))
    }
}
