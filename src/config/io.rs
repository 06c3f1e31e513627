use crate::state::GeneratorState;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

/// Maximum size for a generator state file (1 MiB).
pub const MAX_STATE_FILE_BYTES: u64 = 1024 * 1024;

/// Failure to load a generator state file.
#[derive(Debug, thiserror::Error)]
pub enum StateFileError {
    #[error("state file '{path}' is {size} bytes, exceeds limit of {limit} bytes")]
    TooLarge { path: String, size: u64, limit: u64 },
    #[error("cannot read state file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse state file '{path}' as {format}: {message}")]
    Parse {
        path: String,
        format: &'static str,
        message: String,
    },
}

/// Parse a JSON5 state string. Plain JSON is accepted as well.
pub fn parse_state_json5(content: &str) -> std::result::Result<GeneratorState, json5::Error> {
    json5::from_str(content)
}

/// Load a generator state from disk.
///
/// The format follows the extension: `yaml`/`yml`, `toml`, anything else is
/// read as JSON5.
pub fn read_state_file(path: &Path) -> std::result::Result<GeneratorState, StateFileError> {
    let shown = path.display().to_string();

    let metadata = std::fs::metadata(path).map_err(|source| StateFileError::Read {
        path: shown.clone(),
        source,
    })?;
    if metadata.len() > MAX_STATE_FILE_BYTES {
        return Err(StateFileError::TooLarge {
            path: shown,
            size: metadata.len(),
            limit: MAX_STATE_FILE_BYTES,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| StateFileError::Read {
        path: shown.clone(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    debug!(path = %shown, format = ext, "loading generator state");

    let parse_err = |format: &'static str, message: String| StateFileError::Parse {
        path: shown.clone(),
        format,
        message,
    };

    match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| parse_err("YAML", e.to_string())),
        "toml" => toml::from_str(&content).map_err(|e| parse_err("TOML", e.to_string())),
        _ => parse_state_json5(&content).map_err(|e| parse_err("JSON5", e.to_string())),
    }
}

/// Write a generated document. `json` is written verbatim.
pub fn write_document(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

/// Write the default generator state as a pretty JSON template.
///
/// Refuses to overwrite an existing file.
pub fn write_default_state(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Refusing to overwrite existing file '{}'", path.display());
    }
    let mut content = serde_json::to_string_pretty(&GeneratorState::default())?;
    content.push('\n');
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write state file '{}'", path.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
