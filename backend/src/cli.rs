use clap::{Parser, error::ErrorKind};

pub const UNKNOWN_ARGUMENT_MESSAGE: &str = "Unknown argument. Use --help for usage information.";

const USAGE_EXAMPLES: &str = "\
Examples:
  crypto-price-tracker          Show prices in terminal
  crypto-price-tracker --api    Start the HTTP API server
  crypto-price-tracker --help   Show this help";

#[derive(Parser, Debug)]
#[command(
    name = "crypto-price-tracker",
    version,
    about = "Live ETH and BTC prices in USDT from Binance",
    after_help = USAGE_EXAMPLES
)]
pub struct Cli {
    /// Start the HTTP API server instead of printing prices
    #[arg(long, visible_alias = "web")]
    pub api: bool,
}

/// What the binary should do for a given command line
#[derive(Debug)]
pub enum Mode {
    Report,
    Serve,
    /// Help or version text, already rendered by clap
    Info(clap::Error),
    Unknown,
}

pub fn parse_args<I, T>(args: I) -> Mode
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) if cli.api => Mode::Serve,
        Ok(_) => Mode::Report,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => Mode::Info(e),
        Err(_) => Mode::Unknown,
    }
}
