use crate::range::{self, Range};

pub const HAND_ORDER: [&str; 169] = [
    "AA", "KK", "QQ", "AKs", "JJ", "AKo", "AQs", "TT", "AJs", "KQs", "99", "ATs", "AQo", "KJs",
    "88", "QJs", "JTs", "AJo", "KQo", "77", "ATo", "KTs", "QTs", "T9s", "KJo", "QJo", "J9s",
    "98s", "66", "A9s", "A5s", "A8s", "K9s", "Q9s", "JTo", "55", "A4s", "A7s", "A3s", "T8s",
    "87s", "A2s", "K8s", "Q8s", "J8s", "44", "A9o", "KTo", "QTo", "97s", "76s", "33", "22", "A6s",
    "K7s", "Q7s", "J7s", "T7s", "86s", "65s", "A8o", "K9o", "Q9o", "J9o", "T9o", "K6s", "Q6s",
    "J6s", "T6s", "96s", "75s", "54s", "A5o", "A7o", "K8o", "Q8o", "J8o", "T8o", "98o", "87o",
    "K5s", "Q5s", "J5s", "T5s", "95s", "85s", "64s", "A4o", "A6o", "K7o", "Q7o", "J7o", "T7o",
    "97o", "76o", "K4s", "Q4s", "J4s", "T4s", "94s", "84s", "74s", "53s", "A3o", "A2o", "65o",
    "54o", "K3s", "Q3s", "J3s", "T3s", "93s", "83s", "73s", "63s", "43s", "K2s", "Q2s", "J2s",
    "T2s", "92s", "82s", "72s", "62s", "52s", "42s", "32s", "K6o", "Q6o", "J6o", "T6o", "96o",
    "86o", "75o", "64o", "53o", "K5o", "Q5o", "J5o", "T5o", "95o", "85o", "74o", "63o", "52o",
    "43o", "K4o", "Q4o", "J4o", "T4o", "94o", "84o", "73o", "62o", "42o", "32o", "K3o", "Q3o",
    "J3o", "T3o", "93o", "83o", "72o", "K2o", "Q2o", "J2o", "T2o", "92o", "82o",
];

/// Bounds are clamped to `0..=100` and floored onto the table; a NaN bound
/// gives an empty window.
pub fn percentile_range(start: f64, end: f64) -> String {
    if start.is_nan() || end.is_nan() {
        return String::new();
    }
    let start = start.clamp(0.0, 100.0);
    let end = end.clamp(0.0, 100.0);
    if start >= end {
        return String::new();
    }
    let total = HAND_ORDER.len() as f64;
    let from = (total * start / 100.0) as usize;
    let to = (total * end / 100.0) as usize;
    HAND_ORDER[from..to].join(", ")
}

pub fn percentile_hands(start: f64, end: f64) -> Range {
    range::parse(&percentile_range(start, end))
}

pub fn strength_index(class: &str) -> Option<usize> {
    HAND_ORDER.iter().position(|entry| *entry == class)
}
