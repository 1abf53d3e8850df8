use anyhow::Context;
use clap::Parser;
use mlc_aperture::utils::{logger, validation::Validate};
use mlc_aperture::{
    ApertureAssembler, ApertureEngine, CatalogConfig, CliConfig, DeviceCatalog, JsonFileBeamSource,
};
use std::sync::Arc;

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    match run(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            if let Some(err) = e.downcast_ref::<mlc_aperture::ApertureError>() {
                tracing::error!("💡 Suggestion: {}", err.recovery_suggestion());
            }
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every beam was converted.
fn run(config: &CliConfig) -> anyhow::Result<bool> {
    tracing::debug!("CLI config: {:?}", config);
    config.validate()?;

    let catalog = match &config.catalog {
        Some(path) => CatalogConfig::from_file(path)
            .and_then(|c| c.to_catalog())
            .with_context(|| format!("failed to load device catalog {}", path.display()))?,
        None => DeviceCatalog::builtin(),
    };

    let source = JsonFileBeamSource::new(&config.beams);
    let engine = ApertureEngine::new(source, ApertureAssembler::new(Arc::new(catalog)));
    let report = engine
        .run()
        .with_context(|| format!("failed to read beams from {}", config.beams.display()))?;

    for failure in &report.failures {
        tracing::error!("Beam {}: {}", failure.beam_id, failure.error);
        tracing::error!("💡 Suggestion: {}", failure.error.recovery_suggestion());
    }

    let json = if config.pretty {
        serde_json::to_string_pretty(&report.completed)?
    } else {
        serde_json::to_string(&report.completed)?
    };

    match &config.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(report.is_success())
}
