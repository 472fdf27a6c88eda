//! Registration and execution of generation requests.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use pkl_config::ModuleSource;

use crate::error::CodegenError;
use crate::request::GenerateRequest;

/// Environment variable naming the generator executable.
pub const PKL_GEN_RUST_ENV: &str = "PKL_GEN_RUST";

const DEFAULT_GENERATOR: &str = "pkl-gen-rust";

/// A generated artefact reported by [`Codegen::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Name of the request that produced the artefact.
    pub request: String,
    /// Path of the generated Rust source file.
    pub path: PathBuf,
}

/// Registry of generation requests, normally driven from a build script.
///
/// Every request is validated before the generator runs at all, so a
/// misconfigured request fails the build without invoking anything.
#[derive(Debug)]
pub struct Codegen {
    requests: Vec<GenerateRequest>,
    generator: Option<PathBuf>,
    emit_rerun_if_changed: bool,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            generator: None,
            emit_rerun_if_changed: true,
        }
    }

    /// Register a generation request.
    #[must_use]
    pub fn register(mut self, request: GenerateRequest) -> Self {
        self.requests.push(request);
        self
    }

    /// Override the generator executable, bypassing the `PKL_GEN_RUST` and
    /// `PATH` lookup.
    #[must_use]
    pub fn generator<P: Into<PathBuf>>(mut self, generator: P) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// Control whether `cargo:rerun-if-changed` directives are printed for
    /// file-backed source modules. Defaults to `true`; disable when running
    /// outside a build script.
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.emit_rerun_if_changed = enabled;
        self
    }

    /// Validate every request, then run the generator once per request.
    ///
    /// # Errors
    ///
    /// Returns a [`CodegenError`] when validation fails (duplicate request
    /// names, an empty source-module set, a missing module file), when the
    /// generator cannot be launched or exits with a failure status, or when
    /// it reports success without producing the output file.
    pub fn run(self) -> Result<Vec<GeneratedModule>, CodegenError> {
        self.validate()?;
        let generator = self.resolve_generator();
        let mut generated = Vec::with_capacity(self.requests.len());
        for request in &self.requests {
            generated.push(self.run_request(&generator, request)?);
        }
        Ok(generated)
    }

    fn validate(&self) -> Result<(), CodegenError> {
        let mut seen = HashSet::new();
        for request in &self.requests {
            if !seen.insert(request.name.as_str()) {
                return Err(CodegenError::DuplicateRequest(request.name.clone()));
            }
            if request.source_modules.is_empty() {
                return Err(CodegenError::EmptySourceModules(request.name.clone()));
            }
            for module in &request.source_modules {
                if let ModuleSource::File(path) = module
                    && !path.is_file()
                {
                    return Err(CodegenError::MissingModule {
                        name: request.name.clone(),
                        module: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn run_request(
        &self,
        generator: &Path,
        request: &GenerateRequest,
    ) -> Result<GeneratedModule, CodegenError> {
        let out_dir = request_out_dir(request)?;
        let output = out_dir.join(format!("{}.rs", request.name));

        if self.emit_rerun_if_changed {
            for module in &request.source_modules {
                if let ModuleSource::File(path) = module {
                    println!("cargo:rerun-if-changed={}", path.display());
                }
            }
        }

        let mut command = Command::new(generator);
        for module in &request.source_modules {
            match module {
                ModuleSource::File(path) => command.arg(path),
                ModuleSource::Uri(uri) => command.arg(uri),
            };
        }
        command.arg("--output").arg(&output);
        if request.generate_accessors {
            command.arg("--accessors");
        }
        if request.bindings {
            command.arg("--bindings");
        }

        let result = command.output().map_err(|io_err| {
            let program = generator.display().to_string();
            if io_err.kind() == std::io::ErrorKind::NotFound {
                CodegenError::MissingGenerator { program }
            } else {
                CodegenError::Launch {
                    program,
                    source: io_err,
                }
            }
        })?;

        if !result.status.success() {
            let status = result.status.code().unwrap_or(-1);
            let message = format!(
                "{}{}",
                String::from_utf8_lossy(&result.stdout),
                String::from_utf8_lossy(&result.stderr)
            );
            return Err(CodegenError::Generator {
                name: request.name.clone(),
                status,
                message,
            });
        }

        if !output.is_file() {
            return Err(CodegenError::MissingOutput {
                name: request.name.clone(),
                path: output,
            });
        }

        Ok(GeneratedModule {
            request: request.name.clone(),
            path: output,
        })
    }

    fn resolve_generator(&self) -> PathBuf {
        if let Some(generator) = &self.generator {
            return generator.clone();
        }
        env::var_os(PKL_GEN_RUST_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_GENERATOR), PathBuf::from)
    }
}

/// Register and run a single request in one call.
///
/// # Errors
///
/// Propagates any [`CodegenError`] from [`Codegen::run`].
pub fn generate(request: GenerateRequest) -> Result<Vec<GeneratedModule>, CodegenError> {
    Codegen::new().register(request).run()
}

fn request_out_dir(request: &GenerateRequest) -> Result<PathBuf, CodegenError> {
    if let Some(dir) = &request.out_dir {
        return Ok(dir.clone());
    }
    env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| CodegenError::MissingOutDir(request.name.clone()))
}
