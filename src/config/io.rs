use super::types::{ConfigError, FileConfig};
use std::path::Path;
use tokio::fs;

/// Read the optional configuration file.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but
/// fails to parse is a fatal configuration error, not something to paper over.
pub async fn read_config_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).await?;
    let config: FileConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}
