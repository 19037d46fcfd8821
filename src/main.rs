mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tfgap::{Analyzer, CoverageStatus, TerraformCli, oracle, output, validate_path};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    validate_path(&cli.file)?;

    let recommender = oracle::get_recommender(&cli.backend, &cli.recommender_config())?;
    let schema_source = TerraformCli::new(cli.terraform_bin.clone());
    let analyzer = Analyzer::new(Box::new(schema_source), recommender, cli.model.clone());

    let summary = analyzer.run(&cli.file, &mut std::io::stdout()).await?;
    tracing::info!(
        covered = summary.count(CoverageStatus::Covered),
        recommended = summary.count(CoverageStatus::Recommended),
        skipped = summary.count(CoverageStatus::UnknownType),
        "analysis complete"
    );

    if cli.summary {
        eprintln!("{}", output::summary_table(&summary.resources));
    }

    Ok(())
}
