use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, CardParseError, CardSet};

pub const MAX_BOARD_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Display for Street {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a board holds at most 5 cards, got {0}")]
    TooManyCards(usize),
    #[error("card {0} appears twice on the board")]
    DuplicateCard(Card),
    #[error(transparent)]
    Card(#[from] CardParseError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Result<Self, BoardError> {
        if cards.len() > MAX_BOARD_CARDS {
            return Err(BoardError::TooManyCards(cards.len()));
        }
        let mut seen = CardSet::new();
        for card in &cards {
            if !seen.insert(*card) {
                return Err(BoardError::DuplicateCard(*card));
            }
        }
        Ok(Self { cards })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Accepts codes separated by whitespace or commas, or run together
    /// (`"Th 8d 2c"`, `"Th,8d,2c"`, `"Th8d2c"`).
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut cards = Vec::new();
        for token in text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let normalized = token.replace("10", "T");
            let chars: Vec<char> = normalized.chars().collect();
            for code in chars.chunks(2) {
                let code: String = code.iter().collect();
                cards.push(code.parse::<Card>()?);
            }
        }
        Self::new(cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == MAX_BOARD_CARDS
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn card_set(&self) -> CardSet {
        self.cards.iter().copied().collect()
    }

    pub fn street(&self) -> Street {
        match self.cards.len() {
            0..=2 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    pub(crate) fn with(&self, card: Card) -> Board {
        debug_assert!(!self.contains(card) && !self.is_complete());
        let mut cards = self.cards.clone();
        cards.push(card);
        Board { cards }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.cards.is_empty() {
            return f.write_str("--");
        }
        let codes: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        f.write_str(&codes.join(" "))
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s)
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = BoardError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Board::new(cards)
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separated_and_concatenated_codes() {
        let spaced = Board::parse("Th 8d 2c").unwrap();
        let joined = Board::parse("Th8d2c").unwrap();
        let commas = Board::parse("10h, 8d, 2c").unwrap();
        assert_eq!(spaced, joined);
        assert_eq!(spaced, commas);
        assert_eq!(spaced.street(), Street::Flop);
        assert_eq!(spaced.to_string(), "Th 8d 2c");
    }

    #[test]
    fn rejects_duplicates_and_oversized_boards() {
        assert!(matches!(
            Board::parse("Th Th"),
            Err(BoardError::DuplicateCard(_))
        ));
        assert_eq!(
            Board::parse("2c 3c 4c 5c 6c 7c"),
            Err(BoardError::TooManyCards(6))
        );
        assert!(matches!(Board::parse("Zz"), Err(BoardError::Card(_))));
    }

    #[test]
    fn empty_text_is_an_empty_board() {
        let board = Board::parse("   ").unwrap();
        assert!(board.is_empty());
        assert_eq!(board.street(), Street::Preflop);
    }
}
