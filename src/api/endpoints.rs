use crate::error::AppError;

pub const MATCHES_PATH: &str = "/players/{player_id}/matches";

/// Trimmed player ID, rejected when empty or when it would not survive
/// being dropped into a URL path.
pub fn validate_player_id(raw: &str) -> Result<&str, AppError> {
    let id = raw.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id)
    } else {
        Err(AppError::InvalidPlayerId(raw.to_string()))
    }
}

pub fn matches_url(base_url: &str, player_id: &str) -> Result<String, AppError> {
    let id = validate_player_id(player_id)?;
    Ok(format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        MATCHES_PATH.replace("{player_id}", id)
    ))
}
