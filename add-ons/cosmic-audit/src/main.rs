//! Cosmic Atlas audit
//!
//! Loads the reference tables (and optionally a profile), builds the entity registry and
//! runs both integrity passes. Prints a JSON report on stdout. Exits 1 when loading fails,
//! or when `strict_references` is set and anything is broken.

use cosmic_core::{
    check_derivations_resolve, check_reference_integrity, AtlasConfig, AtlasResult,
    CosmicProfile, EntityRegistry, ReferenceTables,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[cosmic-audit] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Audit aborted");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when strict mode found broken references.
fn run() -> AtlasResult<bool> {
    let config = AtlasConfig::load()?;
    let tables = Arc::new(ReferenceTables::load_dir(&config.data_dir)?);
    let registry = EntityRegistry::with_config(Arc::clone(&tables), &config);

    if let Some(path) = &config.profile_path {
        let profile = CosmicProfile::from_path(path)?;
        registry.load_profile(&profile);
    }

    let references = check_reference_integrity(&tables);
    let derivations = check_derivations_resolve(&registry);
    let broken = references.broken.len() + derivations.broken.len();

    let report = serde_json::json!({
        "dataDir": config.data_dir,
        "tables": tables.sizes().into_iter().collect::<std::collections::BTreeMap<_, _>>(),
        "registry": registry.stats(),
        "references": references,
        "derivations": derivations,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(out) => println!("{out}"),
        Err(e) => tracing::warn!(error = %e, "Report not serializable"),
    }

    if broken == 0 {
        tracing::info!(data_dir = %config.data_dir.display(), "Audit clean");
        return Ok(true);
    }
    tracing::warn!(broken, strict = config.strict_references, "Broken references found");
    Ok(!config.strict_references)
}
