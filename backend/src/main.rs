use crypto_price_tracker::{
    api,
    cli::{self, Mode, UNKNOWN_ARGUMENT_MESSAGE},
    config::Config,
    report,
    PriceFetcher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    match cli::parse_args(std::env::args_os()) {
        Mode::Report => {
            let config = Config::from_env()?;
            let fetcher = PriceFetcher::from_config(&config)?;
            report::print_report(&fetcher).await;
        }
        Mode::Serve => {
            let config = Config::from_env()?;
            api::start_server(&config).await?;
        }
        Mode::Info(help) => help.print()?,
        Mode::Unknown => println!("{}", UNKNOWN_ARGUMENT_MESSAGE),
    }

    Ok(())
}
