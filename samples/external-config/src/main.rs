//! Binds a handwritten struct from an operator-supplied Pkl file, with
//! environment overrides layered on top.
//!
//! ```text
//! external-config --config pkl/service.pkl
//! SERVICE_PORT=9100 external-config
//! ```

use std::path::PathBuf;

use clap::Parser;
use figment::{Figment, providers::Env};
use pkl_config::{FigmentPklExt, Pkl, PklSchema};
use serde::Deserialize;

/// Prints the effective service configuration.
#[derive(Debug, Parser)]
#[command(name = "external-config")]
struct Args {
    /// Path of the Pkl module to evaluate.
    #[arg(long, default_value = "pkl/service.pkl")]
    config: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ServiceConfig {
    name: String,
    port: u16,
    upstream: Option<String>,
}

impl PklSchema for ServiceConfig {
    const MODULE_NAME: &'static str = "service";
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config: ServiceConfig = Figment::new()
        .merge(Pkl::file(&args.config))
        .merge(Env::prefixed("SERVICE_"))
        .bind_module()?;
    println!(
        "service {} listening on {} (upstream: {})",
        config.name,
        config.port,
        config.upstream.as_deref().unwrap_or("none")
    );
    Ok(())
}
