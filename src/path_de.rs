use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(anyhow!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Read and deserialize a JSON file, naming the file and JSON path on failure.
pub fn from_file_with_path<T: DeserializeOwned>(file: &Path) -> Result<T> {
    let src = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    from_str_with_path(&src).with_context(|| format!("failed to parse {}", file.display()))
}
