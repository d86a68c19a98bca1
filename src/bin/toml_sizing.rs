use anyhow::Context;
use clap::Parser;
use market_sizing::core::generator::seeded_rng;
use market_sizing::core::ConfigProvider;
use market_sizing::utils::{logger, validation::Validate};
use market_sizing::{LocalStorage, SizingEngine, SizingPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-sizing")]
#[command(about = "Market sizing driven by a TOML scenario file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "market-sizing.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override the seed from the scenario file
    #[arg(long)]
    seed: Option<u64>,

    /// Override the output directory from the scenario file
    #[arg(long)]
    output_path: Option<String>,

    /// Show what would be produced without writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("Loading scenario from: {}", args.config);
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load scenario file '{}'", args.config))?;

    if let Some(seed) = args.seed {
        config.market.seed = Some(seed);
        tracing::info!("Seed overridden to: {}", seed);
    }
    if let Some(output_path) = &args.output_path {
        config.load.output_path = output_path.clone();
        tracing::info!("Output path overridden to: {}", output_path);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    display_config_summary(&config);

    if args.dry_run {
        println!("Dry run: no files written.");
        return Ok(());
    }

    let (rng, seed) = seeded_rng(config.seed());
    tracing::info!(seed, "Dataset seed");

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SizingPipeline::new(storage, config, rng)
        .context("failed to build the market sizing pipeline")?;
    let mut engine = SizingEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            println!("Scenario completed. Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Scenario failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("Scenario Summary:");
    match &config.scenario.version {
        Some(version) => println!("  Scenario: {} v{}", config.scenario.name, version),
        None => println!("  Scenario: {}", config.scenario.name),
    }
    if let Some(description) = &config.scenario.description {
        println!("  Description: {}", description);
    }
    println!("  Regions: {}", config.regions().join(", "));
    for tier in &config.market.tiers {
        println!("  Tier {}: {}%", tier.label, tier.rate_percent);
    }
    println!("  Revenue per user: {}", config.revenue_per_user());
    let (min, max) = config.penetration_range();
    println!("  Penetration filter: {}% - {}%", min, max);
    let sweep = config.sensitivity_range();
    println!("  Sensitivity sweep: {}% - {}%", sweep.start(), sweep.end());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!();
}
