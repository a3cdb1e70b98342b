use clap::Parser;
use dotenv::dotenv;
use kalman_pairs::cli::{Cli, Commands, ProductionCliConfig, ScanCliConfig};
use kalman_pairs::commands::{run_production_command, run_scan_command};
use kalman_pairs::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from the .env file
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.verbose)?;

    match &cli.command {
        Commands::Scan {
            tickers,
            years,
            leverage,
            window,
            top,
            output,
            timeout_secs,
            data_dir,
        } => {
            let config = ScanCliConfig::from_args(
                tickers,
                *years,
                *leverage,
                *window,
                *top,
                output,
                *timeout_secs,
                data_dir.as_deref(),
            )?;
            run_scan_command(&config).await?;
        }
        Commands::Production {
            ticker_a,
            ticker_b,
            years,
            leverage,
            window,
            output,
            timeout_secs,
            data_dir,
        } => {
            let config = ProductionCliConfig::from_args(
                ticker_a,
                ticker_b,
                *years,
                *leverage,
                *window,
                output,
                *timeout_secs,
                data_dir.as_deref(),
            )?;
            run_production_command(&config).await?;
        }
    }

    Ok(())
}
