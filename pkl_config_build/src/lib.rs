//! Build-time generation of Rust sources from Pkl schema modules.
//!
//! The heavy lifting belongs to the external `pkl-gen-rust` executable;
//! this crate assembles named generation requests, validates them, and
//! invokes the generator from a build script. Each request produces
//! `$OUT_DIR/<name>.rs`, which application code splices in with
//! `pkl_config::include_modules!`.
//!
//! ```rust,no_run
//! // build.rs
//! use pkl_config_build::GenerateRequest;
//!
//! fn main() -> Result<(), pkl_config_build::CodegenError> {
//!     pkl_config_build::generate(
//!         GenerateRequest::new("config_classes").source_module("pkl/AppConfig.pkl"),
//!     )?;
//!     Ok(())
//! }
//! ```

mod codegen;
mod error;
mod request;

pub use codegen::{Codegen, GeneratedModule, PKL_GEN_RUST_ENV, generate};
pub use error::CodegenError;
pub use pkl_config::ModuleSource;
pub use request::GenerateRequest;
