//! Command line and environment configuration.

use crate::models::{Cidr, IpcError};
use crate::parser::{parse_cidr, parse_equal_count, parse_size};
use crate::processing::PartitionRequest;
use clap::builder::FalseyValueParser;
use clap::Parser;
use std::error::Error as _;
use std::ffi::OsString;

/// ipc - IPv4 calculator
///
/// Analyse one network, or split it into equal or variable-sized subnets.
#[derive(Parser, Debug)]
#[command(name = "ipc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Network as A.B.C.D/N, e.g. 192.168.1.0/24
    #[arg(value_parser = parse_cidr)]
    pub cidr: Cidr,

    /// Split into COUNT equal subnets
    #[arg(short, long, value_name = "COUNT", value_parser = parse_equal_count)]
    #[arg(conflicts_with = "sizes")]
    pub equal: Option<u32>,

    /// Split into subnets of at least N addresses each, largest first
    #[arg(short, long, value_name = "N", num_args = 1.., value_parser = parse_size)]
    pub sizes: Option<Vec<u64>>,

    /// Also list space left unallocated after a split
    #[arg(long)]
    pub free: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "IPC_OUTPUT", default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Disable colours
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Analyze,
    Partition(PartitionRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cidr: Cidr,
    pub mode: Mode,
    pub format: OutputFormat,
    pub color: bool,
    pub show_free: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Config {
        let mode = match (cli.equal, cli.sizes) {
            (Some(count), _) => Mode::Partition(PartitionRequest::Equal(count)),
            (None, Some(sizes)) => Mode::Partition(PartitionRequest::Sized(sizes)),
            (None, None) => Mode::Analyze,
        };
        Config {
            cidr: cli.cidr,
            mode,
            format: if cli.json {
                OutputFormat::Json
            } else {
                cli.output
            },
            color: !cli.no_color,
            show_free: cli.free,
        }
    }
}

impl Config {
    /// Parse command line arguments, the first one being the program name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        log::debug!("try_parse_from: {cli:?}");
        Ok(cli.into())
    }
}

/// The input error behind a rejected argument value, if any.
pub fn input_error(e: &clap::Error) -> Option<&IpcError> {
    e.source()?.downcast_ref::<IpcError>()
}

/// Exit code for an argument error: the [`IpcError`] code for a bad value,
/// clap's own code (0 for help, 2 for usage) otherwise.
pub fn exit_code(e: &clap::Error) -> i32 {
    input_error(e)
        .map(IpcError::exit_code)
        .unwrap_or_else(|| e.exit_code())
}
