use super::error::TrackerError;

/// Resolve the tracker token from a directly supplied value or a CLI command
/// (e.g. `gh auth token`). Returns `None` when neither is configured, in which
/// case the tracker runs unauthenticated.
///
/// # Errors
///
/// Returns `TrackerError::AuthenticationFailed` when the token command fails.
pub async fn resolve_token(
    token: Option<String>,
    token_command: Option<String>,
) -> Result<Option<String>, TrackerError> {
    if let Some(token) = token {
        return Ok(Some(token));
    }

    let Some(command) = token_command else {
        return Ok(None);
    };

    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&command)
        .output()
        .await
        .map_err(|e| TrackerError::AuthenticationFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(TrackerError::AuthenticationFailed(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(TrackerError::AuthenticationFailed(format!(
            "token command '{command}' produced no output"
        )));
    }

    Ok(Some(token))
}
