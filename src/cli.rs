//! Command-line interface for script-debugger.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Transcript to replay; stdin when absent.
    pub transcript: Option<PathBuf>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Allow overlapping edits of the same script.
    pub allow_concurrent_edits: bool,
    /// Do not reject out-of-range breakpoint lines.
    pub no_line_check: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("allow-concurrent-edits") => {
                result.allow_concurrent_edits = true;
            }
            Long("no-line-check") => {
                result.no_line_check = true;
            }
            Value(val) if result.transcript.is_none() => {
                result.transcript = Some(PathBuf::from(val));
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"script-debugger {version}
Replay a debugger session transcript through the session model

USAGE:
    script-debugger [OPTIONS] [TRANSCRIPT]

ARGS:
    <TRANSCRIPT>                JSON-lines session transcript [default: stdin]

OPTIONS:
    -c, --config <FILE>         Path to configuration file (JSON)
    -l, --log-level <LVL>       Log level (error, warn, info, debug, trace)
        --allow-concurrent-edits
                                Allow overlapping edits of one script
        --no-line-check         Accept breakpoint lines outside the script
    -h, --help                  Print help
    -V, --version               Print version

ENVIRONMENT VARIABLES:
    SCRIPT_DEBUGGER_LOG_LEVEL               Log level (overrides config)
    SCRIPT_DEBUGGER_ALLOW_CONCURRENT_EDITS  true/false (overrides config)
    RUST_LOG                                Alternative log level setting

OUTPUT:
    One JSON object per line on stdout for every backend command and
    model event. Logs go to stderr.

EXAMPLES:
    # Replay a recorded session
    script-debugger session.jsonl

    # Replay from stdin with debug logging
    cat session.jsonl | script-debugger -l debug
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("script-debugger {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
