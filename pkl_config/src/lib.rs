//! Figment bindings for [Pkl](https://pkl-lang.org/) configuration.
//!
//! Pkl modules describe configuration as typed, validated documents. This
//! crate evaluates a module through the external `pkl` executable and
//! exposes the result as a figment [`Provider`](figment::Provider), so Pkl
//! files participate in layered configuration alongside environment
//! variables and other sources. The companion `pkl_config_build` crate turns
//! Pkl schemas into Rust structs at build time; generated roots implement
//! [`PklSchema`] and are extracted with [`FigmentPklExt::bind_module`].
//!
//! ```rust,no_run
//! use figment::Figment;
//! use pkl_config::{FigmentPklExt, Pkl, PklSchema};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct ServerConfig {
//!     name: String,
//!     port: u16,
//! }
//!
//! impl PklSchema for ServerConfig {
//!     const MODULE_NAME: &'static str = "ServerConfig";
//! }
//!
//! fn main() -> Result<(), pkl_config::PklError> {
//!     let config: ServerConfig = Figment::new()
//!         .merge(Pkl::file("config/server.pkl"))
//!         .bind_module()?;
//!     println!("{} listening on {}", config.name, config.port);
//!     Ok(())
//! }
//! ```

mod error;
pub mod evaluator;
mod provider;
pub mod value;

pub use error::{PklError, PklResult};
pub use evaluator::{Evaluator, ModuleSource, PKL_EXEC_ENV};
pub use provider::Pkl;

use serde::de::DeserializeOwned;

/// Implemented by configuration roots bound from Pkl modules.
///
/// Marks a type as a binding target and names the source module it
/// represents. `pkl_config_build` emits an implementation for every
/// generated root when a request has bindings enabled; handwritten structs
/// can implement it directly.
pub trait PklSchema: DeserializeOwned {
    /// Name of the source module this schema represents.
    const MODULE_NAME: &'static str;
}

/// Extension methods for binding Pkl schemas out of a [`figment::Figment`].
pub trait FigmentPklExt {
    /// Extract a populated `T` from the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PklError::Binding`] tagged with `T::MODULE_NAME` when a
    /// required field is missing or a value cannot be deserialised; no
    /// partially populated value is produced.
    fn bind_module<T: PklSchema>(&self) -> PklResult<T>;
}

impl FigmentPklExt for figment::Figment {
    fn bind_module<T: PklSchema>(&self) -> PklResult<T> {
        self.extract()
            .map_err(|err| PklError::binding(T::MODULE_NAME, err))
    }
}

/// Includes the Rust source generated for a named generation request.
///
/// The build script writes each request's output to `$OUT_DIR/<name>.rs`;
/// this macro splices that file into the current module.
///
/// ```rust,ignore
/// pub mod config {
///     pkl_config::include_modules!("config_classes");
/// }
/// ```
#[macro_export]
macro_rules! include_modules {
    ($request:tt) => {
        include!(concat!(env!("OUT_DIR"), "/", $request, ".rs"));
    };
}
