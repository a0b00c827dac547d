use serde::{Deserialize, Serialize};

/// Claims carried by the time-limited tokens the chat-bot signs with the
/// shared key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltClaims {
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Any other claims the bot adds.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
