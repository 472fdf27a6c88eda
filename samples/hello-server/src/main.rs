//! Evaluates `pkl/AppConfig.pkl`, binds the generated root struct, and
//! prints the populated configuration.
//!
//! Requires the `pkl` executable on `PATH` (or named by `PKL_EXEC`).

use figment::Figment;
use pkl_config::{FigmentPklExt, Pkl};

mod config {
    //! Bindings generated from `pkl/AppConfig.pkl`.
    pkl_config::include_modules!("config_classes");
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let app: config::AppConfig = Figment::new()
        .merge(Pkl::file("pkl/AppConfig.pkl"))
        .bind_module()?;
    println!("{app:?}");
    Ok(())
}
