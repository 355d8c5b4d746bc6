use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Style};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::Board;
use crate::cards::Card;
use crate::distribution::{analyze_distribution, analyze_distribution_parallel};
use crate::equity::simulate;
use crate::range::parse_with_report;
use crate::report::{AnalysisReport, RangeSummary, RunoutReport, Verdict};
use crate::runout::{HEATMAP_SUITS, analyze_runouts, analyze_runouts_parallel};

// 5-point bins over 0..=100.
const HISTOGRAM_BUCKETS: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub iterations: u32,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub runouts: bool,
    pub distribution: bool,
    pub no_color: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            seed: None,
            parallel: false,
            runouts: true,
            distribution: true,
            no_color: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalyzerConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub struct Analyzer {
    config: AnalyzerConfig,
    seed: u64,
    rng: StdRng,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn analyze(&mut self, hero: &str, villain: &str, board: &Board) -> AnalysisReport {
        let iterations = self.config.iterations;
        let hero_parse = parse_with_report(hero);
        let villain_parse = parse_with_report(villain);
        let (hero_range, villain_range) = (&hero_parse.range, &villain_parse.range);
        info!(
            hero = hero_range.len(),
            villain = villain_range.len(),
            %board,
            iterations,
            "starting analysis"
        );

        let tally = simulate(hero_range, villain_range, board, iterations, &mut self.rng);
        let equity = tally.equity();
        let playable = !hero_range.is_empty() && !villain_range.is_empty();

        let runouts = (playable && self.config.runouts && !board.is_complete()).then(|| {
            let table = if self.config.parallel {
                analyze_runouts_parallel(
                    hero_range,
                    villain_range,
                    board,
                    iterations,
                    &mut self.rng,
                )
            } else {
                analyze_runouts(hero_range, villain_range, board, iterations, &mut self.rng)
            };
            RunoutReport {
                risk: table.risk(equity),
                heatmap: table.heatmap(),
                cards: table,
            }
        });

        let distribution = (playable && self.config.distribution).then(|| {
            if self.config.parallel {
                analyze_distribution_parallel(
                    hero_range,
                    villain_range,
                    board,
                    iterations,
                    &mut self.rng,
                )
            } else {
                analyze_distribution(hero_range, villain_range, board, iterations, &mut self.rng)
            }
        });

        debug!(equity, discarded = tally.discarded, "analysis complete");
        AnalysisReport {
            hero: RangeSummary::from_parse(hero, &hero_parse),
            villain: RangeSummary::from_parse(villain, &villain_parse),
            board: board.clone(),
            street: board.street(),
            iterations,
            seed: self.seed,
            equity,
            tally,
            verdict: playable.then(|| Verdict::from_equity(equity)),
            runouts,
            distribution,
        }
    }

    pub fn print_report(&self, report: &AnalysisReport) {
        print!("{}", self.render_report(report));
    }

    pub fn render_report(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();
        let board = if report.board.is_empty() {
            "--".to_string()
        } else {
            let cards: Vec<String> = report.board.cards().iter().map(Card::pretty).collect();
            cards.join(" ")
        };
        let _ = writeln!(
            out,
            "{} {} ({}) | {} {} | seed {}",
            self.paint("Board", heading()),
            board,
            report.street,
            self.paint("Iterations", heading()),
            report.iterations,
            report.seed
        );
        for (label, summary) in [("Hero", &report.hero), ("Villain", &report.villain)] {
            let _ = write!(
                out,
                "{} {} combos, {} classes",
                self.paint(label, heading()),
                summary.combos,
                summary.classes
            );
            if !summary.skipped.is_empty() {
                let skipped = format!("skipped: {}", summary.skipped.join(", "));
                let _ = write!(out, " ({})", self.paint(&skipped, warning()));
            }
            out.push('\n');
        }

        let _ = write!(
            out,
            "{} {}",
            self.paint("Equity", highlight()),
            self.paint(&format!("{:.1}%", report.equity), highlight())
        );
        match report.verdict {
            Some(verdict @ Verdict::Advantage) => {
                let _ = write!(out, " {}", self.paint(verdict.label(), heading()));
            }
            Some(verdict @ Verdict::Disadvantage) => {
                let _ = write!(out, " {}", self.paint(verdict.label(), warning()));
            }
            None => {}
        }
        out.push('\n');

        if let Some(runouts) = &report.runouts {
            let risk = &runouts.risk;
            let _ = writeln!(
                out,
                "{} {:.1} | {} {} | {} {}",
                self.paint("Risk", heading()),
                risk.weighted_downside_risk,
                self.paint("Scare", warning()),
                risk.scare_cards,
                self.paint("Safe", heading()),
                risk.safe_cards
            );
            let suits: Vec<String> = HEATMAP_SUITS
                .iter()
                .map(|suit| format!("{:>5}", suit.symbol()))
                .collect();
            let _ = writeln!(out, "   {}", suits.concat());
            for row in &runouts.heatmap {
                let cells: Vec<String> = row
                    .equities
                    .iter()
                    .map(|cell| match cell {
                        Some(equity) => format!("{equity:>5.0}"),
                        None => format!("{:>5}", "--"),
                    })
                    .collect();
                let _ = writeln!(out, "{:>2} {}", row.rank, cells.concat());
            }
        } else if report.board.is_complete() {
            let _ = writeln!(out, "{}", self.paint("River reached", heading()));
        }

        if let Some(distribution) = &report.distribution {
            let sides = [("Hero", &distribution.hero), ("Villain", &distribution.villain)];
            for (label, sample) in sides {
                let histogram: Vec<String> = sample
                    .histogram(HISTOGRAM_BUCKETS)
                    .iter()
                    .map(usize::to_string)
                    .collect();
                let _ = writeln!(
                    out,
                    "{} {} hands, mean {:.1}%, buckets [{}]",
                    self.paint(&format!("{label} distribution"), heading()),
                    sample.len(),
                    sample.mean().unwrap_or(0.0),
                    histogram.join(" ")
                );
            }
        }
        out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.config.no_color {
            text.to_string()
        } else {
            text.style(style).to_string()
        }
    }
}

fn heading() -> Style {
    Style::new().bold().cyan()
}

fn highlight() -> Style {
    Style::new().bold().yellow()
}

fn warning() -> Style {
    Style::new().bold().red()
}
