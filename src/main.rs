use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use zhutype::charset::is_ideograph;
use zhutype::config::{
    parse_pause_secs, parse_rate, InputMethod, MistakeOptions, Mode, SpeedProfile, TypistConfig,
    DEFAULT_PAUSE_MAX, DEFAULT_PAUSE_MIN,
};
use zhutype::controller::{CancelToken, Controller, Status};
use zhutype::engine::{Outcome, Typist};
use zhutype::injector::Transcript;
use zhutype::model::Script;
use zhutype::sim;
use zhutype::zhuyin::{spelling_to_keys, PhoneticTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Type word by word, inserting spaces and sentence pauses.
    Word,
    /// Type one character at a time, preserving whitespace exactly.
    Character,
}

impl ModeArg {
    fn to_library(self) -> Mode {
        match self {
            ModeArg::Word => Mode::Word,
            ModeArg::Character => Mode::Character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Emit ideographs natively; paste via clipboard on failure.
    Direct,
    /// Simulate Bopomofo key presses plus candidate confirmation.
    Zhuyin,
    /// Paste every ideograph via the clipboard.
    CopyPaste,
}

impl MethodArg {
    fn to_library(self) -> InputMethod {
        match self {
            MethodArg::Direct => InputMethod::Direct,
            MethodArg::Zhuyin => InputMethod::Zhuyin,
            MethodArg::CopyPaste => InputMethod::CopyPaste,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SpeedArg {
    VerySlow,
    Slow,
    Medium,
    Fast,
    VeryFast,
}

impl SpeedArg {
    fn to_library(self) -> SpeedProfile {
        match self {
            SpeedArg::VerySlow => SpeedProfile::very_slow(),
            SpeedArg::Slow => SpeedProfile::slow(),
            SpeedArg::Medium => SpeedProfile::medium(),
            SpeedArg::Fast => SpeedProfile::fast(),
            SpeedArg::VeryFast => SpeedProfile::very_fast(),
        }
    }
}

#[derive(Debug, Args, Clone)]
struct EngineArgs {
    /// Input text file, or '-' for stdin
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::Word)]
    mode: ModeArg,

    #[arg(long, value_enum, default_value_t = MethodArg::Direct)]
    method: MethodArg,

    #[arg(long, value_enum, default_value_t = SpeedArg::Medium)]
    speed: SpeedArg,

    /// Vary delays per character class and add occasional fatigue pauses
    #[arg(long)]
    speed_variation: bool,

    /// Enable synthetic typos
    #[arg(long)]
    mistakes: bool,

    /// Error probability per character, as a percentage (0-100).
    ///
    /// Lenient: non-numeric input disables errors, out-of-range is clamped.
    #[arg(long, default_value = "5", value_parser = rate_arg)]
    error_rate: f64,

    /// Leave typos in place instead of backspacing over them
    #[arg(long)]
    no_correction: bool,

    /// Probability a typo gets corrected, as a percentage (0-100)
    #[arg(long, default_value = "80", value_parser = rate_arg)]
    correction_rate: f64,

    /// Pause to "think" before pasted characters
    #[arg(long)]
    thinking_pauses: bool,

    /// Thinking-pause probability, as a percentage (0-100)
    #[arg(long, default_value = "10", value_parser = rate_arg)]
    pause_rate: f64,

    /// Minimum thinking pause in seconds (lenient; bad input uses 0.5)
    #[arg(long, default_value = "0.5", value_parser = pause_min_arg)]
    pause_min: Duration,

    /// Maximum thinking pause in seconds (lenient; bad input uses 2.0)
    #[arg(long, default_value = "2.0", value_parser = pause_max_arg)]
    pause_max: Duration,

    /// Optional RNG seed (for debugging)
    #[arg(long)]
    seed: Option<u64>,
}

impl EngineArgs {
    fn to_config(&self) -> TypistConfig {
        TypistConfig {
            mode: self.mode.to_library(),
            method: self.method.to_library(),
            speed: self.speed.to_library(),
            speed_variation: self.speed_variation,
            mistakes: MistakeOptions {
                enabled: self.mistakes,
                error_rate: self.error_rate,
                correction_enabled: !self.no_correction,
                correction_rate: self.correction_rate,
                thinking_pauses: self.thinking_pauses,
                pause_rate: self.pause_rate,
                pause_min: self.pause_min,
                pause_max: self.pause_max,
            },
        }
    }
}

fn rate_arg(raw: &str) -> Result<f64, String> {
    Ok(parse_rate(raw))
}

fn pause_min_arg(raw: &str) -> Result<Duration, String> {
    Ok(parse_pause_secs(raw, DEFAULT_PAUSE_MIN))
}

fn pause_max_arg(raw: &str) -> Result<Duration, String> {
    Ok(parse_pause_secs(raw, DEFAULT_PAUSE_MAX))
}

#[derive(Debug, Parser)]
#[command(name = "zhutype")]
#[command(about = "Human-like typing simulator for mixed English and Traditional Chinese text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type the input into the currently focused application after a countdown
    Run {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Record the injection actions as JSON without touching the system
    Trace {
        #[command(flatten)]
        engine: EngineArgs,

        /// Output transcript file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Report Zhuyin spelling coverage for the ideographs in the input
    Coverage {
        /// Input text file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Emit the report as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct CoverageEntry {
    character: char,
    spelling: Option<String>,
    keys: Vec<char>,
}

#[derive(Debug, Serialize)]
struct CoverageReport {
    total: usize,
    mapped: usize,
    entries: Vec<CoverageEntry>,
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_typing(engine: &EngineArgs) -> Result<()> {
    let text = read_input(&engine.input)?;
    if text.trim().is_empty() {
        bail!("no text to type");
    }

    let controller = Arc::new(Controller::new());
    {
        let controller = Arc::clone(&controller);
        ctrlc::set_handler(move || controller.request_stop())
            .context("failed to install Ctrl-C handler")?;
    }

    let (tx, rx) = mpsc::channel();
    let started = controller.start(text, engine.to_config(), engine.seed, open_system_io, tx);
    ensure!(started, "a typing run is already in progress");

    let mut failure = None;
    for status in rx {
        eprintln!("{status}");
        match &status {
            Status::Completed { uncorrected } if *uncorrected > 0 => {
                eprintln!("{uncorrected} uncorrected typo(s) left in place.");
            }
            Status::Failed(msg) => failure = Some(msg.clone()),
            _ => {}
        }
    }
    controller.join();

    match failure {
        Some(msg) => Err(anyhow!(msg)),
        None => Ok(()),
    }
}

#[cfg(feature = "system")]
fn open_system_io() -> Result<(zhutype::system::SystemInjector, zhutype::system::SystemClipboard)> {
    zhutype::system::open_io()
}

#[cfg(not(feature = "system"))]
fn open_system_io() -> Result<(zhutype::injector::RecordingInjector, zhutype::injector::RecordingClipboard)>
{
    Err(anyhow!(
        "system injection is disabled (build with --features system)"
    ))
}

fn run_trace(engine: &EngineArgs, output: Option<PathBuf>) -> Result<()> {
    let text = read_input(&engine.input)?;
    let transcript = Transcript::new();
    let mut injector = transcript.injector();
    let mut clipboard = transcript.clipboard();
    let mut rng = rng_from_seed(engine.seed);

    let outcome = Typist::new(
        &mut injector,
        &mut clipboard,
        engine.to_config(),
        CancelToken::new(),
        &mut rng,
    )
    .run(&text)?;

    if let Outcome::Completed { uncorrected } = outcome {
        if uncorrected > 0 {
            eprintln!("{uncorrected} uncorrected typo(s) left in place.");
        }
    }

    let actions = transcript.actions();
    let stats = sim::stats(&actions);
    eprintln!(
        "Traced: {} actions, {} key events, {} pastes, ~{:.1} s of waits",
        stats.actions,
        stats.key_events,
        stats.pastes,
        (stats.total_wait_ms as f64) / 1000.0
    );

    let script = Script::new(actions);
    let json = serde_json::to_string_pretty(&script).context("failed to serialize transcript")?;
    if let Some(out) = output {
        write_output(&out, &json)?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn run_coverage(input: &PathBuf, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let table = PhoneticTable::new();

    let mut seen = Vec::new();
    for c in text.chars().filter(|&c| is_ideograph(c)) {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }

    let entries: Vec<CoverageEntry> = seen
        .iter()
        .map(|&c| {
            let spelling = table.spelling_for(c);
            CoverageEntry {
                character: c,
                spelling: spelling.map(str::to_string),
                keys: spelling.map(spelling_to_keys).unwrap_or_default(),
            }
        })
        .collect();

    let report = CoverageReport {
        total: entries.len(),
        mapped: entries.iter().filter(|e| e.spelling.is_some()).count(),
        entries,
    };

    if json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
        return Ok(());
    }

    for entry in &report.entries {
        match &entry.spelling {
            Some(spelling) => {
                let keys: String = entry.keys.iter().collect();
                println!("'{}' -> {} -> keys: {}", entry.character, spelling, keys);
            }
            None => println!("'{}' -> no mapping (will use copy-paste)", entry.character),
        }
    }
    println!(
        "Coverage: {}/{} characters have Zhuyin spellings",
        report.mapped, report.total
    );

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { engine } => run_typing(&engine),
        Command::Trace { engine, output } => run_trace(&engine, output),
        Command::Coverage { input, json } => run_coverage(&input, json),
    }
}
