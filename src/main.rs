use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use range_equity::analyzer::{Analyzer, AnalyzerConfig};
use range_equity::board::Board;
use range_equity::preflop::percentile_range;
use range_equity::range::parse_with_report;
use range_equity::web;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "range-equity",
    version,
    about = "Monte Carlo hold'em range-vs-range equity",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Estimate equity, next-card sensitivity and per-hand distribution
    Analyze(AnalyzeArgs),
    /// Expand range notation into combos
    Parse {
        /// Range notation, e.g. "QQ+, AKs, AhKd"
        range: String,
    },
    /// Print the hand classes in a strength percentile window
    Top {
        /// Window start, percent of the 169 classes
        start: f64,
        /// Window end, percent of the 169 classes
        end: f64,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind (HOST:PORT)
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,

        /// JSON file with analyzer defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Hero range notation
    #[arg(long)]
    hero: String,

    /// Villain range notation
    #[arg(long)]
    villain: String,

    /// Board cards, e.g. "Th 8d 2c" (empty for preflop)
    #[arg(long, default_value = "")]
    board: String,

    /// Trials per equity estimate
    #[arg(long)]
    iterations: Option<u32>,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Spread per-card and per-hand work across threads
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Only estimate equity on the current board
    #[arg(long = "equity-only", default_value_t = false)]
    equity_only: bool,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Disable ANSI colors in CLI output
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,

    /// JSON file with analyzer defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => Ok(AnalyzerConfig::load(path)?),
        None => Ok(AnalyzerConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = color_eyre::install();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(args)?,
        Commands::Parse { range } => run_parse(&range),
        Commands::Top { start, end } => println!("{}", percentile_range(start, end)),
        Commands::Serve { addr, config } => {
            run_server(addr, load_config(config.as_ref())?).await?
        }
    }

    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.parallel |= args.parallel;
    config.no_color |= args.no_color;
    if args.equity_only {
        config.runouts = false;
        config.distribution = false;
    }

    let board = Board::parse(&args.board)
        .with_context(|| format!("invalid board '{}'", args.board))?;
    let mut analyzer = Analyzer::new(config);
    let report = analyzer.analyze(&args.hero, &args.villain, &board);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        analyzer.print_report(&report);
    }
    Ok(())
}

fn run_parse(range: &str) {
    let report = parse_with_report(range);
    println!("{}", report.range);
    println!("{} combos", report.range.len());
    println!("{}", report.range.grid());
    if !report.skipped.is_empty() {
        println!("skipped: {}", report.skipped.join(", "));
    }
}

async fn run_server(addr: String, config: AnalyzerConfig) -> Result<()> {
    let addr: SocketAddr = addr.parse()?;
    web::serve(addr, config).await
}
