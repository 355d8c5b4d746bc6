pub mod analyzer;
pub mod board;
pub mod cards;
pub mod distribution;
pub mod equity;
pub mod preflop;
pub mod range;
pub mod ranking;
pub mod report;
pub mod runout;
pub mod web;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use board::Board;
pub use distribution::analyze_distribution;
pub use equity::estimate;
pub use range::{Hand, Range, parse};
pub use runout::analyze_runouts;
