//! Figment provider backed by the Pkl evaluator.

use std::path::PathBuf;

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};

use crate::error::PklResult;
use crate::evaluator::{Evaluator, ModuleSource};
use crate::value::tree;

/// Figment provider that evaluates a Pkl module when queried.
///
/// The module is rendered by the external evaluator and its properties are
/// exposed as a nested dictionary, so a `Pkl` layer merges like any other
/// figment provider. Evaluation happens lazily inside
/// [`Provider::data`]; a broken module surfaces as an extraction error.
#[derive(Debug, Clone)]
pub struct Pkl {
    module: ModuleSource,
    evaluator: Evaluator,
    profile: Option<Profile>,
}

impl Pkl {
    /// File extensions recognised as Pkl modules.
    pub const EXTENSIONS: &'static [&'static str] = &["pkl", "pcf"];

    /// Construct a provider that evaluates the module at `path` when queried.
    #[must_use]
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self::from_source(ModuleSource::file(path))
    }

    /// Construct a provider for a module addressed by URI.
    #[must_use]
    pub fn uri<S: Into<String>>(uri: S) -> Self {
        Self::from_source(ModuleSource::uri(uri))
    }

    /// Construct a provider from an explicit module source.
    #[must_use]
    pub fn from_source(module: ModuleSource) -> Self {
        Self {
            module,
            evaluator: Evaluator::new(),
            profile: None,
        }
    }

    /// Override the profile this provider emits values into.
    #[must_use]
    pub fn profile<P: Into<Profile>>(mut self, profile: P) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Pass an external property to the module (`--property NAME=VALUE`).
    #[must_use]
    pub fn property<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.evaluator = self.evaluator.property(name, value);
        self
    }

    /// Replace the evaluator configuration.
    #[must_use]
    pub fn evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Evaluate the module and convert its output into a figment value.
    fn load(&self) -> PklResult<FigmentValue> {
        let document = self.evaluator.evaluate(&self.module)?;
        Ok(tree::value_from_json(document))
    }
}

impl Provider for Pkl {
    fn metadata(&self) -> Metadata {
        match &self.module {
            ModuleSource::File(path) => Metadata::from("Pkl module", path.as_path()),
            ModuleSource::Uri(uri) => Metadata::named(format!("Pkl module {uri}")),
        }
    }

    fn data(&self) -> Result<std::collections::BTreeMap<Profile, Dict>, figment::Error> {
        let value = self
            .load()
            .map_err(|err| figment::Error::from(Kind::Message(err.to_string())))?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        let profile = self.profile.clone().unwrap_or(Profile::Default);
        Ok(profile.collect(dict))
    }
}
