//! hough-line CLI: read a PGM, draw the most prominent line, write a PGM.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hough_line::{pgm, HoughConfig, LineDetectionReport, LineDetector};
use log::LevelFilter;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hough-line")]
#[command(
    about = "Detect the most prominent straight line in a P5 PGM image and draw it in black"
)]
#[command(version)]
struct Cli {
    /// Input PGM (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output PGM (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with detector overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Normalized gradient magnitude a pixel must exceed to vote.
    #[arg(long)]
    threshold: Option<i32>,

    /// Write the normalized parameter-space accumulator as a PGM.
    #[arg(long)]
    accumulator: Option<PathBuf>,

    /// Write a JSON detection report.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log verbosity on stderr (`RUST_LOG` takes precedence in tracing builds).
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hough-line: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    init_logging(cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => HoughConfig::load_json(path)?,
        None => HoughConfig::default(),
    };
    if cli.threshold.is_some() {
        config.threshold = cli.threshold;
    }
    let detector: LineDetector = config.build_detector()?;

    let src = match &cli.input {
        Some(path) => pgm::read_pgm_file(path)?,
        None => pgm::read_pgm(&mut std::io::stdin().lock())?,
    };

    let (detection, space) = detector.detect_with_accumulator(&src)?;
    let line = detection.line;
    eprintln!("{line}");

    match &cli.output {
        Some(path) => pgm::write_pgm_file(path, &detection.image)?,
        None => {
            let mut out = BufWriter::new(std::io::stdout().lock());
            pgm::write_pgm(&mut out, &detection.image)?;
            out.flush()?;
        }
    }

    if let Some(path) = &cli.accumulator {
        pgm::write_pgm_file(path, &space.to_normalized_image()?)?;
        log::info!("wrote accumulator image to {}", path.display());
    }

    if let Some(path) = &cli.report {
        LineDetectionReport::new(&src, detector.params(), line).write_json(path)?;
        log::info!("wrote report JSON to {}", path.display());
    }

    Ok(())
}

/// `RUST_LOG`, when set, overrides `--log-level`.
#[cfg(feature = "tracing")]
fn init_logging(level: LogLevel) -> CliResult<()> {
    hough_line::core::init_tracing(level.into(), false)?;
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) -> CliResult<()> {
    hough_line::core::init_with_level(level.into())?;
    Ok(())
}
