//! Error types for Pkl evaluation and binding flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type PklResult<T> = Result<T, PklError>;

/// Errors that can occur while evaluating Pkl modules or binding their
/// output to typed configuration values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PklError {
    /// The evaluator executable is not installed or not on `PATH`.
    #[error("evaluator '{program}' was not found; install Pkl or point PKL_EXEC at it")]
    MissingEvaluator {
        /// Executable name or path that was searched for.
        program: String,
    },

    /// The evaluator executable could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Executable name or path that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The evaluator ran but reported a failure.
    #[error("evaluation of '{module}' failed: {detail}")]
    Evaluation {
        /// Module that was being evaluated.
        module: String,
        /// Diagnostics captured from the evaluator's standard error.
        detail: String,
    },

    /// The evaluator produced output that is not the expected JSON.
    #[error("evaluator output for '{module}' is not valid JSON: {source}")]
    Render {
        /// Module that was being evaluated.
        module: String,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Extracting a typed value from the merged configuration failed.
    #[error("failed to bind module '{module}': {source}")]
    Binding {
        /// Module name declared by the binding target.
        module: String,
        /// Underlying figment error.
        #[source]
        source: Box<FigmentError>,
    },
}

impl PklError {
    /// Construct a launch error for `program`.
    #[must_use]
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Construct an evaluation error carrying the evaluator's diagnostics.
    #[must_use]
    pub fn evaluation(module: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Evaluation {
            module: module.into(),
            detail: detail.into(),
        }
    }

    /// Construct a render error for unparseable evaluator output.
    #[must_use]
    pub fn render(module: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Render {
            module: module.into(),
            source,
        }
    }

    /// Construct a binding error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pkl_config::PklError;
    /// let fe = figment::Error::from("boom".to_owned());
    /// let e = PklError::binding("example", fe);
    /// assert!(matches!(e, PklError::Binding { .. }));
    /// ```
    #[must_use]
    pub fn binding(module: impl Into<String>, source: FigmentError) -> Self {
        Self::Binding {
            module: module.into(),
            source: Box::new(source),
        }
    }
}
