use std::collections::HashSet;

use insta::assert_snapshot;
use range_equity::cards::Rank;
use range_equity::preflop::{HAND_ORDER, percentile_hands, percentile_range};
use range_equity::range::{Hand, parse, parse_with_report};

#[test]
fn aces_are_six_unique_pairs() {
    let range = parse("AA");
    assert_eq!(range.len(), 6);
    let distinct: HashSet<Hand> = range.iter().copied().collect();
    assert_eq!(distinct.len(), 6);
    assert!(range.iter().all(|h| h.first().rank == Rank::Ace && h.second().rank == Rank::Ace));
}

#[test]
fn suited_combos_in_suit_order() {
    assert_snapshot!(parse("AKs").to_string(), @"AcKc, AdKd, AhKh, AsKs");
}

#[test]
fn queens_plus_stays_within_queens_kings_aces() {
    let range = parse("QQ+");
    assert_eq!(range.len(), 18);
    assert!(range.iter().all(|h| {
        h.is_pair() && matches!(h.first().rank, Rank::Queen | Rank::King | Rank::Ace)
    }));
}

#[test]
fn empty_and_garbage_input_yield_nothing() {
    assert!(parse("").is_empty());
    assert!(parse("   ").is_empty());
    assert!(parse("bogus!!").is_empty());
    assert_eq!(parse_with_report("bogus!!").skipped, vec!["bogus!!"]);
}

#[test]
fn mixed_tokens_parse_independently() {
    let report = parse_with_report("QQ+, AKs, AKo, zz, AhKd");
    assert_eq!(report.range.len(), 18 + 4 + 12 + 1);
    assert_eq!(report.skipped, vec!["zz"]);
}

#[test]
fn lowercase_ranks_are_accepted() {
    assert_eq!(parse("aks"), parse("AKs"));
    assert_eq!(parse("tt+"), parse("TT+"));
    assert_eq!(parse("ahkd").len(), 1);
}

#[test]
fn grid_places_pairs_suited_and_offsuit() {
    let grid = parse("AA, AKs, KQo").grid();
    assert_eq!(grid.count(), 3);
    assert_snapshot!(grid.to_string(), @r"
    xx...........
    .............
    .x...........
    .............
    .............
    .............
    .............
    .............
    .............
    .............
    .............
    .............
    .............
    ");
}

#[test]
fn every_percentile_window_parses_back() {
    for (start, end) in [(0.0, 10.0), (10.0, 25.0), (25.0, 100.0)] {
        let notation = percentile_range(start, end);
        let report = parse_with_report(&notation);
        assert!(report.skipped.is_empty(), "{notation}");
        assert!(!report.range.is_empty());
    }
    assert_eq!(HAND_ORDER.len(), 169);
    assert_eq!(percentile_hands(0.0, 1.0).len(), 6);
}
