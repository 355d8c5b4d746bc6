use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_chacha::ChaCha8Rng;

use range_equity::board::Board;
use range_equity::distribution::{
    DISTRIBUTION_SAMPLE_CAP, analyze_distribution, analyze_distribution_parallel,
};
use range_equity::equity::estimate;
use range_equity::range::parse;
use range_equity::runout::{
    SCARE_THRESHOLD, analyze_runouts, analyze_runouts_parallel, analyze_runouts_with_progress,
};

#[test]
fn runout_table_covers_every_undealt_card() {
    let board = Board::parse("Th 8d 2c").unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let table = analyze_runouts(&parse("QQ+, AKs"), &parse("TT+, AJs+"), &board, 60, &mut rng);

    assert_eq!(table.len(), 49);
    assert!(table.entries().iter().all(|e| !board.contains(e.card)));
    assert!(table.entries().iter().all(|e| (0.0..=100.0).contains(&e.equity)));
}

#[test]
fn risk_matches_the_table() {
    let board = Board::parse("9h 8h 2c 3d").unwrap();
    let hero = parse("AA");
    let villain = parse("T9s, JTs, 76s");
    let mut rng = StdRng::seed_from_u64(31);
    let baseline = estimate(&hero, &villain, &board, 400, &mut rng);
    let table = analyze_runouts(&hero, &villain, &board, 80, &mut rng);
    let risk = table.risk(baseline);

    let losses: Vec<f64> = table
        .entries()
        .iter()
        .map(|e| baseline - e.equity)
        .filter(|loss| *loss > 0.0)
        .collect();
    assert!((risk.weighted_downside_risk - losses.iter().sum::<f64>()).abs() < 1e-9);
    assert_eq!(
        risk.scare_cards,
        losses.iter().filter(|loss| **loss > SCARE_THRESHOLD).count()
    );
    assert_eq!(risk.safe_cards, table.len() - losses.len());
}

#[test]
fn full_board_has_no_runouts() {
    let board = Board::parse("2c 7d 9h Js Kc").unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(analyze_runouts(&parse("AA"), &parse("KK"), &board, 50, &mut rng).is_empty());
}

#[test]
fn progress_reports_each_card() {
    let board = Board::parse("Ah Kd 7c 2s").unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let mut calls = Vec::new();
    let table = analyze_runouts_with_progress(
        &parse("QQ"),
        &parse("JJ"),
        &board,
        10,
        &mut rng,
        |done, total| calls.push((done, total)),
    );
    assert_eq!(table.len(), 48);
    assert_eq!(calls.len(), 48);
    assert_eq!(calls.last(), Some(&(48, 48)));
}

#[test]
fn parallel_runouts_are_deterministic_per_seed() {
    let board = Board::parse("Th 8d 2c").unwrap();
    let hero = parse("AKs, QQ");
    let villain = parse("JTs, 99");
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        analyze_runouts_parallel(&hero, &villain, &board, 40, &mut rng)
    };
    let first = run(8);
    let second = run(8);
    assert_eq!(first, second);
    assert_eq!(first.len(), 49);
}

#[test]
fn distribution_caps_large_ranges() {
    let hero = parse("22+, AK, AQ");
    let villain = parse("KK");
    let mut rng = StdRng::seed_from_u64(41);
    let distribution = analyze_distribution(&hero, &villain, &Board::empty(), 20, &mut rng);

    assert_eq!(distribution.hero.len(), DISTRIBUTION_SAMPLE_CAP);
    assert_eq!(distribution.hero.hands.len(), DISTRIBUTION_SAMPLE_CAP);
    assert_eq!(distribution.villain.len(), villain.len());
    assert!(
        distribution
            .hero
            .equities
            .iter()
            .chain(&distribution.villain.equities)
            .all(|e| (0.0..=100.0).contains(e))
    );
}

#[test]
fn distribution_scores_each_hand_against_the_whole_range() {
    // On this river AA always beats QQ, and both sides see no conflicts.
    let board = Board::parse("2c 7d 9h Js 3c").unwrap();
    let hero = parse("AA");
    let villain = parse("QQ");
    let mut rng = StdRng::seed_from_u64(6);
    let distribution = analyze_distribution(&hero, &villain, &board, 50, &mut rng);

    assert_eq!(distribution.hero.equities, vec![100.0; 6]);
    assert_eq!(distribution.villain.equities, vec![0.0; 6]);
}

#[test]
fn parallel_distribution_matches_shape() {
    let hero = parse("TT+");
    let villain = parse("AKs, AQs");
    let board = Board::parse("Th 8d 2c").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let distribution = analyze_distribution_parallel(&hero, &villain, &board, 30, &mut rng);
    assert_eq!(distribution.hero.len(), hero.len());
    assert_eq!(distribution.villain.len(), villain.len());
    assert_eq!(distribution.hero.hands, hero.hands().to_vec());
}
