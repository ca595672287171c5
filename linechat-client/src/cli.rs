//! Command-line argument parsing for the linechat client
//!
//! Uses clap for argument parsing with derive macros.

use clap::Parser;
use std::path::PathBuf;

/// linechat - line-oriented TCP chat client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Server host name or address
    pub host: String,

    /// Server port number or service name (e.g. `http`)
    pub port: String,

    /// Pseudo to identify with
    ///
    /// Skips the interactive pseudo prompt. Overrides the `pseudo` key of the
    /// config file.
    #[arg(long, short = 'p', env = "LINECHAT_PSEUDO")]
    pub pseudo: Option<String>,

    /// Custom config file path
    ///
    /// Unlike the default location, a file given here must exist and parse.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Log at debug level to stderr instead of the log file
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Parse command-line arguments
    ///
    /// Usage errors exit with status 1; `--help` and `--version` exit 0.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) if e.use_stderr() => {
                let _ = e.print();
                std::process::exit(1);
            }
            Err(e) => e.exit(),
        }
    }
}
