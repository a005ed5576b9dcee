//! Pidigits CLI
//!
//! Command-line caller for the pidigits engine: requests a digit count,
//! runs the recommended (or an explicitly chosen) algorithm, and renders
//! the digits against the reference.

use clap::{CommandFactory, Parser as ClapParser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use pidigits_core::{
    Algorithm, ApproximationResult, CancellationToken, Engine, EngineConfig, MAX_DIGITS, PiError,
    select_algorithm,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod render;

use render::{RunReport, highlight, summary};

#[derive(ClapParser)]
#[command(name = "pidigits")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Approximate pi and check the digits against a reference", long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Algorithm names accepted on the command line
#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Leibniz,
    Machin,
    Chudnovsky,
    MonteCarlo,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Leibniz => Algorithm::Leibniz,
            AlgorithmArg::Machin => Algorithm::Machin,
            AlgorithmArg::Chudnovsky => Algorithm::Chudnovsky,
            AlgorithmArg::MonteCarlo => Algorithm::MonteCarlo,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute pi and highlight where it leaves the reference
    Run {
        /// Digits after the decimal point
        #[arg(short, long, default_value_t = 250)]
        digits: u32,

        /// Algorithm to use (defaults to the recommendation for the digit count)
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,

        /// Also run this algorithm, concurrently, for side-by-side comparison
        #[arg(long, value_enum)]
        compare_with: Option<AlgorithmArg>,

        /// Emit a JSON report instead of highlighted digits
        #[arg(long)]
        json: bool,
    },

    /// Show the recommended algorithm and its term count
    Recommend {
        /// Digits after the decimal point
        #[arg(short, long)]
        digits: u32,
    },

    /// Print the reference expansion
    Reference {
        /// Digits after the decimal point (defaults to all of them)
        #[arg(short, long)]
        digits: Option<u32>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            digits,
            algorithm,
            compare_with,
            json,
        } => {
            let engine = load_engine(cli.config.as_deref());
            run_approximation(
                &engine,
                digits,
                algorithm.map(Algorithm::from),
                compare_with.map(Algorithm::from),
                json,
            );
        }
        Commands::Recommend { digits } => run_recommend(digits),
        Commands::Reference { digits } => {
            let engine = load_engine(cli.config.as_deref());
            run_reference(&engine, digits);
        }
        Commands::Completions { shell } => run_completions(shell),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pidigits=warn,pidigits_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_engine(config_path: Option<&Path>) -> Engine {
    let config = match config_path {
        Some(path) => match EngineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    match Engine::new(config.with_env_overrides()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(unix)]
fn install_interrupt_handler(cancel: &CancellationToken) {
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, cancel.flag()) {
        warn!("could not install SIGINT handler: {}", e);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler(_cancel: &CancellationToken) {}

fn run_approximation(
    engine: &Engine,
    digits: u32,
    algorithm: Option<Algorithm>,
    compare_with: Option<Algorithm>,
    json: bool,
) {
    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel);

    let primary = algorithm.unwrap_or_else(|| engine.recommend(digits));

    // The comparison run gets its own thread and its own precision context
    let runs: Vec<(Algorithm, Result<ApproximationResult, PiError>)> = thread::scope(|s| {
        let secondary = compare_with.map(|alg| {
            let cancel = &cancel;
            (
                alg,
                s.spawn(move || engine.run_cancellable(alg, digits, cancel)),
            )
        });

        let mut runs = vec![(primary, engine.run_cancellable(primary, digits, &cancel))];
        if let Some((alg, handle)) = secondary {
            let result = match handle.join() {
                Ok(r) => r,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            runs.push((alg, result));
        }
        runs
    });

    let color = !json && io::stdout().is_terminal();
    let mut reports = Vec::new();
    let mut failed = false;

    for (alg, outcome) in runs {
        match outcome {
            Ok(result) => {
                let score = engine.compare(&result, digits);
                if json {
                    reports.push(RunReport::new(&result, &score));
                } else {
                    println!("{}", highlight(&score, color));
                    println!("{}", summary(&result, &score));
                }
            }
            Err(e) => {
                eprintln!("Error: {} run failed: {}", alg, e);
                failed = true;
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: failed to encode report: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

fn run_recommend(digits: u32) {
    match select_algorithm(digits) {
        Ok((algorithm, count)) => {
            println!("{} ({} terms) for {} digits", algorithm, count, digits);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_reference(engine: &Engine, digits: Option<u32>) {
    let digits = digits.unwrap_or(MAX_DIGITS);
    if digits == 0 || digits > MAX_DIGITS {
        eprintln!("Error: reference holds 1..={} digits", MAX_DIGITS);
        process::exit(1);
    }
    println!("{}", engine.reference().prefix(digits));
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "pidigits", &mut io::stdout());
}
