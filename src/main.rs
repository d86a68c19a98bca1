use anyhow::Context;
use clap::Parser;
use market_sizing::core::generator::seeded_rng;
use market_sizing::core::ConfigProvider;
use market_sizing::utils::{logger, validation::Validate};
use market_sizing::{CliConfig, LocalStorage, SizingEngine, SizingPipeline};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting market-sizing CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    if config.dry_run {
        print_summary(&config);
        println!("Dry run: no files written.");
        return Ok(());
    }

    let (rng, seed) = seeded_rng(config.seed());
    tracing::info!(seed, "Dataset seed (pass --seed {} to reproduce)", seed);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SizingPipeline::new(storage, config, rng)
        .context("failed to build the market sizing pipeline")?;
    let mut engine = SizingEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            println!("Market sizing completed. Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Market sizing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
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

fn print_summary(config: &CliConfig) {
    println!("Configuration Summary:");
    println!("  Regions: {}", config.regions.join(", "));
    println!(
        "  Adoption: Low {}%, Medium {}%, High {}%",
        config.adoption_low, config.adoption_medium, config.adoption_high
    );
    println!("  Revenue per user: {}", config.revenue_per_user);
    match &config.select_regions {
        Some(selected) => println!("  Selected: {}", selected.join(", ")),
        None => println!("  Selected: all regions"),
    }
    println!(
        "  Penetration filter: {}% - {}%",
        config.min_penetration, config.max_penetration
    );
    println!(
        "  Sensitivity sweep: {}% - {}%",
        config.sweep_start, config.sweep_end
    );
    println!("  Output: {}", config.output_path);
    println!();
}
