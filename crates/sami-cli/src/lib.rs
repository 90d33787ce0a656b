//! Command implementations for the `sami-cli` binary
//!
//! Every command reads its input file, runs the library, and returns the text
//! to emit. Only [`run`] touches stdout or output files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use sami_core::{CueList, ParserConfig, SamiFormat, SubtitleFormat};

/// SAMI caption converter
#[derive(Parser, Debug)]
#[command(name = "sami-cli")]
#[command(version)]
#[command(about = "Read, normalize and build SAMI caption files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reject documents containing a token longer than this many bytes
    #[arg(long, global = true, env = "SAMI_MAX_TOKEN_LEN")]
    pub max_token_len: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a SAMI file and print its cues
    Dump {
        /// SAMI file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output representation
        #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
        format: DumpFormat,
    },

    /// Parse a SAMI file and write it back in canonical form
    Normalize {
        /// SAMI file to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a JSON cue list as SAMI
    Build {
        /// JSON file holding `[{"start": ms, "end": ms, "text": "..."}]`
        #[arg(value_name = "CUES_JSON")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// How `dump` prints cues
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// One `start --> end: text` line per entry
    Text,
    /// The cue list as JSON
    Json,
}

impl Cli {
    /// Format handler honouring the global limits
    #[must_use]
    pub fn sami_format(&self) -> SamiFormat {
        let config = self
            .max_token_len
            .map_or_else(ParserConfig::default, ParserConfig::with_max_token_len);
        SamiFormat::with_config(config)
    }
}

/// Log level for a `-v` count
#[must_use]
pub const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger; `RUST_LOG` wins unless `-v` was given
pub fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(level_for(verbose).as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if verbose > 0 {
        builder.filter_level(level_for(verbose));
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn read_cues(format: &SamiFormat, path: &Path) -> Result<CueList> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let cues = format
        .read_bytes(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("read {} cue entries from {}", cues.len(), path.display());
    Ok(cues)
}

/// Render the cues of a SAMI file for display
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn dump(format: &SamiFormat, input: &Path, dump_format: DumpFormat) -> Result<String> {
    let cues = read_cues(format, input)?;
    match dump_format {
        DumpFormat::Text => Ok(cues
            .iter()
            .map(|cue| format!("{cue}\n"))
            .collect()),
        DumpFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&cues).context("Failed to serialize cues")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Re-render a SAMI file, dropping the `&nbsp;` gap entries
///
/// # Errors
///
/// Fails if the file cannot be read, parsed or rendered.
pub fn normalize(format: &SamiFormat, input: &Path) -> Result<String> {
    let cues = read_cues(format, input)?;
    let captions: CueList = cues.captions().cloned().collect();
    info!(
        "normalizing {} captions ({} gap entries dropped)",
        captions.len(),
        cues.len() - captions.len()
    );
    format.write(&captions).context("Failed to render SAMI")
}

/// Render a JSON cue list as SAMI
///
/// # Errors
///
/// Fails if the file cannot be read, is not a cue list, or cannot be
/// rendered.
pub fn build(format: &SamiFormat, input: &Path) -> Result<String> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let cues: CueList = serde_json::from_str(&json)
        .with_context(|| format!("Invalid cue list in {}", input.display()))?;
    info!("building SAMI from {} cues", cues.len());
    format.write(&cues).context("Failed to render SAMI")
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", content.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

/// Execute the parsed command line
///
/// # Errors
///
/// Propagates any command failure with context.
pub fn run(cli: &Cli) -> Result<()> {
    let format = cli.sami_format();
    match &cli.command {
        Command::Dump {
            input,
            format: dump_format,
        } => emit(&dump(&format, input, *dump_format)?, None),
        Command::Normalize { input, output } => {
            emit(&normalize(&format, input)?, output.as_deref())
        }
        Command::Build { input, output } => emit(&build(&format, input)?, output.as_deref()),
    }
}
