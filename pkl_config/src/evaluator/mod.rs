//! Invocation of the external `pkl` evaluator.
//!
//! Pkl modules are evaluated out of process: the `pkl` command-line tool
//! renders a module as a JSON document on stdout and this module captures
//! and parses that output. The executable is resolved from the `PKL_EXEC`
//! environment variable, falling back to `pkl` on `PATH`; callers can
//! override it per evaluator with [`Evaluator::exec`].

mod source;

pub use source::ModuleSource;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{PklError, PklResult};

/// Environment variable naming the evaluator executable.
pub const PKL_EXEC_ENV: &str = "PKL_EXEC";

const DEFAULT_EXEC: &str = "pkl";

/// Options controlling how modules are evaluated.
///
/// The default configuration runs `pkl eval --format json <module>` with no
/// external properties and no timeout.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    exec: Option<PathBuf>,
    properties: Vec<(String, String)>,
    timeout: Option<u64>,
}

impl Evaluator {
    /// Construct an evaluator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the evaluator executable, bypassing the `PKL_EXEC` and
    /// `PATH` lookup.
    #[must_use]
    pub fn exec<P: Into<PathBuf>>(mut self, exec: P) -> Self {
        self.exec = Some(exec.into());
        self
    }

    /// Pass an external property to the module (`--property NAME=VALUE`).
    ///
    /// Repeated calls accumulate; properties are forwarded in insertion
    /// order.
    #[must_use]
    pub fn property<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// Abort evaluation after `seconds` seconds (`--timeout`).
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Evaluate `module` and parse the rendered JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`PklError::MissingEvaluator`] when the executable cannot be
    /// found, [`PklError::Launch`] for other spawn failures,
    /// [`PklError::Evaluation`] when the evaluator exits with a failure
    /// status, and [`PklError::Render`] when its output is not valid JSON.
    pub fn evaluate(&self, module: &ModuleSource) -> PklResult<serde_json::Value> {
        let exec = self.resolve_exec();
        let args = self.render_args(module);
        tracing::debug!(exec = %exec.display(), module = %module, "evaluating Pkl module");
        tracing::trace!(args = ?args, "evaluator arguments");

        let output = Command::new(&exec).args(&args).output().map_err(|io_err| {
            let program = exec.display().to_string();
            if io_err.kind() == std::io::ErrorKind::NotFound {
                PklError::MissingEvaluator { program }
            } else {
                PklError::launch(program, io_err)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => format!("exit status {}", output.status.code().unwrap_or(-1)),
                trimmed => trimmed.to_owned(),
            };
            return Err(PklError::evaluation(module.to_string(), detail));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|err| PklError::render(module.to_string(), err))
    }

    /// Resolve the executable: builder override, then `PKL_EXEC`, then
    /// `pkl` on `PATH`.
    fn resolve_exec(&self) -> PathBuf {
        if let Some(exec) = &self.exec {
            return exec.clone();
        }
        std::env::var_os(PKL_EXEC_ENV).map_or_else(|| PathBuf::from(DEFAULT_EXEC), PathBuf::from)
    }

    /// Render the argument list for evaluating `module`.
    fn render_args(&self, module: &ModuleSource) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["eval".into(), "--format".into(), "json".into()];
        for (name, value) in &self.properties {
            args.push("--property".into());
            args.push(format!("{name}={value}").into());
        }
        if let Some(seconds) = self.timeout {
            args.push("--timeout".into());
            args.push(seconds.to_string().into());
        }
        args.push(module.to_argument());
        args
    }
}
