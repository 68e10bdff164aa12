use anyhow::Result;
use dotenv::dotenv;
use gamescout_fixtures::{config::AppConfig, logging, pipeline::IngestPipeline};

fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    logging::init();

    let config = AppConfig::from_env();
    let report = IngestPipeline::from_config(&config).run()?;
    println!(
        "Exported {} upcoming fixtures to {}",
        report.fixtures_exported,
        config.export.path.display()
    );

    Ok(())
}
