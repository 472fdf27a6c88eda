//! Generation requests: named sets of source modules plus options.

use std::path::PathBuf;

use pkl_config::ModuleSource;

/// A named request to generate Rust sources from Pkl schema modules.
///
/// The name must be unique within a [`Codegen`](crate::Codegen) run and
/// also names the output file: a request called `config_classes` produces
/// `config_classes.rs` in the output directory.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub(crate) name: String,
    pub(crate) source_modules: Vec<ModuleSource>,
    pub(crate) generate_accessors: bool,
    pub(crate) bindings: bool,
    pub(crate) out_dir: Option<PathBuf>,
}

impl GenerateRequest {
    /// Construct a request named `name` with default options: public
    /// fields, bindings enabled, output under `$OUT_DIR`.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            source_modules: Vec::new(),
            generate_accessors: false,
            bindings: true,
            out_dir: None,
        }
    }

    /// Add one source module. At least one is required.
    #[must_use]
    pub fn source_module<M: Into<ModuleSource>>(mut self, module: M) -> Self {
        self.source_modules.push(module.into());
        self
    }

    /// Add several source modules.
    #[must_use]
    pub fn source_modules<I, M>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ModuleSource>,
    {
        self.source_modules.extend(modules.into_iter().map(Into::into));
        self
    }

    /// Generate private fields with accessor methods instead of public
    /// fields. Defaults to `false`.
    #[must_use]
    pub fn generate_accessors(mut self, enabled: bool) -> Self {
        self.generate_accessors = enabled;
        self
    }

    /// Derive `serde::Deserialize` and implement `PklSchema` on generated
    /// roots so they can be bound from a figment. Defaults to `true`;
    /// disable for plain data types with no binding support.
    #[must_use]
    pub fn bindings(mut self, enabled: bool) -> Self {
        self.bindings = enabled;
        self
    }

    /// Write the generated file under `dir` instead of `$OUT_DIR`.
    #[must_use]
    pub fn out_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// The request's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::GenerateRequest;

    #[rstest]
    fn defaults_favour_bindings_over_accessors() {
        let request = GenerateRequest::new("config_classes");
        assert!(!request.generate_accessors);
        assert!(request.bindings);
        assert!(request.out_dir.is_none());
        assert!(request.source_modules.is_empty());
    }

    #[rstest]
    fn source_modules_accumulate_in_order() {
        let request = GenerateRequest::new("config_classes")
            .source_module("pkl/AppConfig.pkl")
            .source_modules(["pkl/Overrides.pkl", "pkl/Shared.pkl"]);
        assert_eq!(request.source_modules.len(), 3);
    }
}
