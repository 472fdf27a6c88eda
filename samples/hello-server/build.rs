//! Generates Rust bindings for `pkl/AppConfig.pkl` before compilation.
//!
//! Requires the `pkl-gen-rust` executable on `PATH` (or named by
//! `PKL_GEN_RUST`).

use pkl_config_build::GenerateRequest;

fn main() -> Result<(), pkl_config_build::CodegenError> {
    pkl_config_build::generate(
        GenerateRequest::new("config_classes").source_module("pkl/AppConfig.pkl"),
    )?;
    Ok(())
}
