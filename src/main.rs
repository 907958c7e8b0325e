use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use court_catalog::application::CourtPipeline;
use court_catalog::cli::Cli;
use court_catalog::infrastructure::{
    init_logging_with_config, log_system_info, AppConfig, HttpClient, HttpClientConfig,
    PageFetcher,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging_with_config(&config.logging)?;
    log_system_info(&config.output.csv_path);

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::new(HttpClientConfig::from(&config))?);
    let mut pipeline = CourtPipeline::new(fetcher, &config)?.with_families(&cli.families);

    // row-level failures are already logged and counted in the summary
    pipeline.run().await;
    Ok(())
}
