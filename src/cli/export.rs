// src/cli/export.rs — Structured export of a refinement run
//
// Wraps the result in an envelope with run metadata and serializes it to
// JSON or YAML.

use serde::Serialize;
use std::path::Path;

use super::OutputFormat;
use crate::core::types::RefinementResult;
use crate::portfolio::Portfolio;

#[derive(Debug, Serialize)]
pub struct ExportEnvelope<'a> {
    pub run_id: String,
    pub exported_at: String,
    pub version: &'static str,
    pub initial: &'a Portfolio,
    pub result: &'a RefinementResult<Portfolio>,
}

impl<'a> ExportEnvelope<'a> {
    pub fn new(initial: &'a Portfolio, result: &'a RefinementResult<Portfolio>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            initial,
            result,
        }
    }
}

/// Serialize a run in a structured format. `Text` is rendered by the report
/// module, not here.
pub fn render(
    initial: &Portfolio,
    result: &RefinementResult<Portfolio>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let envelope = ExportEnvelope::new(initial, result);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&envelope)?),
        OutputFormat::Yaml => Ok(serde_yml::to_string(&envelope)?),
        OutputFormat::Text => anyhow::bail!("text output is produced by the report renderer"),
    }
}

/// Write to `path` when given, otherwise to stdout.
pub fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, content)?;
        eprintln!("Wrote {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
