#![deny(missing_docs)]

//! # Output Sink
//!
//! Writes generated declarations to disk: one `<Name>.ts` per declaration,
//! plus a JSON manifest of operation artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use typegen_core::OperationArtifact;

use crate::error::CliResult;

/// Manifest file name for `paths` output.
pub const MANIFEST_FILE: &str = "paths.json";

/// Writes each non-empty declaration to `<out_dir>/<name>.ts`.
///
/// Empty entries (failed formatting) and names that cannot form a file name
/// are skipped. Returns the written paths.
pub fn write_declarations<'a>(
    out_dir: &Path,
    declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> CliResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (name, text) in declarations {
        if !is_file_stem(name) {
            tracing::warn!("Skipping declaration with unusable name {:?}", name);
            continue;
        }
        if text.is_empty() {
            tracing::warn!("Skipping empty declaration {}", name);
            continue;
        }
        let path = out_dir.join(format!("{}.ts", name));
        fs::write(&path, text)?;
        tracing::debug!("Wrote {:?}", path);
        written.push(path);
    }
    Ok(written)
}

fn is_file_stem(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

/// Writes the artifact manifest to `<out_dir>/paths.json`.
pub fn write_manifest(
    out_dir: &Path,
    artifacts: &IndexMap<String, Vec<OperationArtifact>>,
) -> CliResult<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(MANIFEST_FILE);
    fs::write(&path, serde_json::to_string_pretty(artifacts)?)?;
    Ok(path)
}
