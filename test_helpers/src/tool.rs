//! Fake external-tool scaffolding (Unix only).
//!
//! The pkl-config crates shell out to two external executables: the `pkl`
//! evaluator and the `pkl-gen-rust` code generator. These helpers write
//! small shell scripts that impersonate either tool so the test suites can
//! pin invocation contracts without the real tooling installed.
//!
//! Paths embedded in generated scripts are single-quoted; directories
//! containing single quotes are not supported.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Heredoc delimiter used by the generated scripts.
const FIXTURE_EOF: &str = "PKL_FIXTURE_EOF";

/// Writes `script` to `dir/name` and marks it executable.
///
/// The script body is used verbatim; callers supply the full `#!/bin/sh`
/// program. Returns the path to the executable.
///
/// # Errors
///
/// Returns an error if the file cannot be written or its permissions set.
pub fn fake_tool(dir: &Path, name: &str, script: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, script).with_context(|| format!("write fake tool {}", path.display()))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("mark {} executable", path.display()))?;
    Ok(path)
}

/// A fake tool that prints `stdout` and exits successfully.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn stdout_tool(dir: &Path, name: &str, stdout: &str) -> Result<PathBuf> {
    let script = format!("#!/bin/sh\ncat <<'{FIXTURE_EOF}'\n{stdout}\n{FIXTURE_EOF}\n");
    fake_tool(dir, name, &script)
}

/// A fake tool that prints `stderr` to standard error and exits with `code`.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn failing_tool(dir: &Path, name: &str, stderr: &str, code: u8) -> Result<PathBuf> {
    let script =
        format!("#!/bin/sh\ncat <<'{FIXTURE_EOF}' >&2\n{stderr}\n{FIXTURE_EOF}\nexit {code}\n");
    fake_tool(dir, name, &script)
}

/// A fake tool that records its arguments (one per line) to `record`, then
/// prints `stdout` and exits successfully.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn recording_stdout_tool(
    dir: &Path,
    name: &str,
    record: &Path,
    stdout: &str,
) -> Result<PathBuf> {
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\ncat <<'{FIXTURE_EOF}'\n{stdout}\n{FIXTURE_EOF}\n",
        record.display()
    );
    fake_tool(dir, name, &script)
}

/// A fake code generator: finds the `--output` argument, writes a stub Rust
/// source file there, and optionally records its arguments to `record`.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn generator_tool(dir: &Path, name: &str, record: Option<&Path>) -> Result<PathBuf> {
    let record_line = record.map_or_else(String::new, |path| {
        format!("printf '%s\\n' \"$@\" > '{}'\n", path.display())
    });
    let script = format!(
        concat!(
            "#!/bin/sh\n",
            "{record_line}",
            "out=\n",
            "prev=\n",
            "for arg in \"$@\"; do\n",
            "  if [ \"$prev\" = \"--output\" ]; then\n",
            "    out=$arg\n",
            "  fi\n",
            "  prev=$arg\n",
            "done\n",
            "if [ -z \"$out\" ]; then\n",
            "  echo 'missing --output' >&2\n",
            "  exit 64\n",
            "fi\n",
            "printf 'pub struct Generated;\\n' > \"$out\"\n",
        ),
        record_line = record_line
    );
    fake_tool(dir, name, &script)
}

#[cfg(test)]
mod tests {
    use std::process::Command;

    use anyhow::{Context, Result, ensure};

    #[test]
    fn stdout_tool_prints_fixture() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let tool = super::stdout_tool(dir.path(), "fake-pkl", "{\"ok\": true}")?;
        let output = Command::new(&tool).output().context("run fake tool")?;
        ensure!(output.status.success(), "fake tool failed");
        ensure!(
            String::from_utf8_lossy(&output.stdout).trim() == "{\"ok\": true}",
            "unexpected stdout"
        );
        Ok(())
    }

    #[test]
    fn generator_tool_writes_output_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let record = dir.path().join("args.txt");
        let out = dir.path().join("generated.rs");
        let tool = super::generator_tool(dir.path(), "fake-gen", Some(&record))?;
        let status = Command::new(&tool)
            .arg("module.pkl")
            .arg("--output")
            .arg(&out)
            .status()
            .context("run fake generator")?;
        ensure!(status.success(), "fake generator failed");
        ensure!(out.is_file(), "expected generated file");
        let args = std::fs::read_to_string(&record)?;
        ensure!(
            args.lines().next() == Some("module.pkl"),
            "expected recorded module argument"
        );
        Ok(())
    }
}
