use std::collections::BTreeMap;

/// Build the `Authorization` header value for a wallet token or P2P secret key.
///
/// Format: `Bearer {token}`
pub fn authorization_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Headers merged into every request before dispatch.
pub fn default_headers(token: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), authorization_header(token)),
    ])
}
