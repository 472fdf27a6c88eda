//! Error types for the generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while validating and running generation requests.
///
/// Every variant is a build failure: validation problems are reported
/// before the generator is invoked, and generator problems abort the run.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("duplicate generation request '{0}'")]
    DuplicateRequest(String),

    #[error("generation request '{0}' has no source modules")]
    EmptySourceModules(String),

    #[error("generation request '{name}' references missing module {module}")]
    MissingModule { name: String, module: PathBuf },

    #[error(
        "generation request '{0}' has no output directory; set one or run from a build script with OUT_DIR"
    )]
    MissingOutDir(String),

    #[error(
        "generator '{program}' was not found; install pkl-gen-rust or point PKL_GEN_RUST at it"
    )]
    MissingGenerator { program: String },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("generator failed for request '{name}' (status {status}): {message}")]
    Generator {
        name: String,
        status: i32,
        message: String,
    },

    #[error("generator reported success for '{name}' but wrote no output at {path}")]
    MissingOutput { name: String, path: PathBuf },
}
