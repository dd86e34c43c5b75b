//! Provenance records: written as `<stem>.provenance.json` beside each output,
//! or printed by `cli report`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
pub struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub geonum_version: &'static str,
    pub inputs: Vec<String>,
    pub params: Value,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsite: Option<Callsite>,
}

impl Provenance {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: code_rev(),
            geonum_version: geonum::VERSION,
            inputs: Vec::new(),
            params,
            outputs: Vec::new(),
            callsite: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Record `artifact` as the output and write the sidecar next to it.
    #[track_caller]
    pub fn write_beside(mut self, artifact: impl AsRef<Path>) -> Result<PathBuf> {
        let caller = Location::caller();
        let artifact = artifact.as_ref();
        self.callsite = Some(Callsite {
            file: caller.file(),
            line: caller.line(),
        });
        self.outputs.push(artifact.to_string_lossy().into_owned());
        // `cells.json` -> `cells.provenance.json`
        let path = artifact.with_extension("provenance.json");
        std::fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "provenance");
        Ok(path)
    }
}

/// `GIT_COMMIT` at build time, then at run time, then `git rev-parse`.
fn code_rev() -> String {
    [
        option_env!("GIT_COMMIT").map(str::to_owned),
        std::env::var("GIT_COMMIT").ok(),
    ]
    .into_iter()
    .flatten()
    .find(|rev| !rev.is_empty())
    .or_else(|| {
        let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
        out.status
            .success()
            .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
    })
    .unwrap_or_else(|| "unknown".to_owned())
}
