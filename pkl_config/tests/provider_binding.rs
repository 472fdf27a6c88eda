//! End-to-end binding of evaluated modules through the figment provider.
#![cfg(unix)]

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, anyhow, bail, ensure};
use figment::{Figment, Provider};
use pkl_config::{Evaluator, FigmentPklExt, Pkl, PklError, PklSchema};
use rstest::rstest;
use serde::Deserialize;
use test_helpers::{jail, tool};

#[derive(Debug, Deserialize, PartialEq)]
struct ServerConfig {
    name: String,
    port: u16,
}

impl PklSchema for ServerConfig {
    const MODULE_NAME: &'static str = "ServerConfig";
}

#[derive(Debug, Deserialize)]
struct Inventory {
    owner: Option<String>,
    hosts: Vec<String>,
    tags: Vec<String>,
    entries: BTreeMap<String, Option<String>>,
}

impl PklSchema for Inventory {
    const MODULE_NAME: &'static str = "Inventory";
}

/// A provider whose evaluator is a fake tool printing `document`.
fn provider_with_output(dir: &Path, document: &str) -> Result<Pkl> {
    let exec = tool::stdout_tool(dir, "fake-pkl", document)?;
    Ok(Pkl::file("app.pkl").evaluator(Evaluator::new().exec(exec)))
}

#[rstest]
fn binds_a_module_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let provider = provider_with_output(dir.path(), r#"{"name": "srv", "port": 8080}"#)?;
    let config: ServerConfig = Figment::new().merge(provider).bind_module()?;
    ensure!(
        config
            == ServerConfig {
                name: "srv".to_owned(),
                port: 8080,
            },
        "got {config:?}"
    );
    Ok(())
}

#[rstest]
fn missing_required_fields_fail_binding() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let provider = provider_with_output(dir.path(), r#"{"name": "srv"}"#)?;
    let err = match Figment::new().merge(provider).bind_module::<ServerConfig>() {
        Ok(config) => bail!("expected a binding failure, got {config:?}"),
        Err(err) => err,
    };
    ensure!(
        matches!(err, PklError::Binding { .. }),
        "unexpected error: {err}"
    );
    ensure!(
        err.to_string().contains("ServerConfig"),
        "error must name the module: {err}"
    );
    Ok(())
}

#[rstest]
fn null_handling_matches_module_semantics() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let provider = provider_with_output(
        dir.path(),
        r#"{
            "owner": null,
            "hosts": ["one", null, "two"],
            "tags": [],
            "entries": {"first": "one", "second": null}
        }"#,
    )?;
    let inventory: Inventory = Figment::new().merge(provider).bind_module()?;
    ensure!(inventory.owner.is_none(), "null property must bind to None");
    ensure!(
        inventory.hosts == ["one", "two"],
        "null sequence elements must be dropped: {:?}",
        inventory.hosts
    );
    ensure!(inventory.tags.is_empty(), "empty list must stay empty");
    ensure!(
        inventory.entries.get("second") == Some(&None),
        "null map entries must stay observable: {:?}",
        inventory.entries
    );
    Ok(())
}

#[rstest]
fn profile_override_places_values_in_that_profile() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let provider =
        provider_with_output(dir.path(), r#"{"name": "srv", "port": 8080}"#)?.profile("staging");

    let unselected = Figment::new()
        .merge(provider.clone())
        .bind_module::<ServerConfig>();
    ensure!(
        unselected.is_err(),
        "values must not leak into the default profile"
    );

    let selected: ServerConfig = Figment::new()
        .merge(provider)
        .select("staging")
        .bind_module()?;
    ensure!(selected.port == 8080, "expected staging values to be visible");
    Ok(())
}

#[rstest]
fn non_object_documents_are_invalid() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let provider = provider_with_output(dir.path(), "[1, 2, 3]")?;
    let err = match provider.data() {
        Ok(data) => bail!("expected an invalid-type error, got {data:?}"),
        Err(err) => err,
    };
    ensure!(err.to_string().contains("map"), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn properties_flow_through_the_provider() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let record = dir.path().join("args.txt");
    let exec = tool::recording_stdout_tool(dir.path(), "fake-pkl", &record, "{}")?;
    let provider = Pkl::file("app.pkl")
        .evaluator(Evaluator::new().exec(exec))
        .property("mode", "test");
    provider.data().map_err(|err| anyhow!(err.to_string()))?;
    let args = std::fs::read_to_string(&record)?;
    ensure!(
        args.lines().any(|line| line == "mode=test"),
        "property flag missing from: {args}"
    );
    Ok(())
}

#[rstest]
fn relative_module_paths_pass_through_to_the_evaluator() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let record = dir.path().join("args.txt");
    let exec = tool::recording_stdout_tool(
        dir.path(),
        "fake-pkl",
        &record,
        r#"{"name": "srv", "port": 8080}"#,
    )?;

    let config = jail::with_jail(|jail| {
        jail.create_file("server.pkl", "name = \"srv\"\nport = 8080\n")?;
        Figment::new()
            .merge(Pkl::file("server.pkl").evaluator(Evaluator::new().exec(&exec)))
            .bind_module::<ServerConfig>()
            .map_err(|err| figment::Error::from(err.to_string()))
    })?;
    ensure!(config.port == 8080, "got {config:?}");

    let args = std::fs::read_to_string(&record)?;
    ensure!(
        args.lines().last() == Some("server.pkl"),
        "the module path must reach the evaluator unaltered: {args}"
    );
    Ok(())
}

#[rstest]
fn evaluation_failures_surface_at_extraction_time() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let exec = tool::failing_tool(dir.path(), "fake-pkl", "Pkl Error: `port` must be positive", 1)?;
    let provider = Pkl::file("app.pkl").evaluator(Evaluator::new().exec(exec));
    let err = match Figment::new().merge(provider).bind_module::<ServerConfig>() {
        Ok(config) => bail!("expected an evaluation failure, got {config:?}"),
        Err(err) => err,
    };
    ensure!(
        err.to_string().contains("`port` must be positive"),
        "evaluator diagnostics lost: {err}"
    );
    Ok(())
}
