//! Test helpers shared across crates in the pkl-config workspace.
//!
//! Provides environment variable guards, a `figment::Jail` wrapper, and
//! scaffolding for standing in fake `pkl` / `pkl-gen-rust` executables so
//! the test suites never depend on the real external tooling.

pub mod env;
pub mod jail;
#[cfg(unix)]
pub mod tool;
