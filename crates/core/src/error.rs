//! Failure values produced by esa operations

use serde_json::Value;

/// Guidance returned when a team-scoped operation runs without a team.
pub const MISSING_TEAM_NAME_MESSAGE: &str = "Missing required parameter 'teamName'. Use esa_get_teams to list available teams, then retry with teamName specified.";

/// Every way an operation can fail.
///
/// The `Display` implementation is the single stringification rule used by
/// all envelopes: plain messages are shown as-is, bare HTTP statuses are
/// reported as `API Response(status: N)` and API error bodies are rendered
/// as 2-space indented JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error("{}", MISSING_TEAM_NAME_MESSAGE)]
    MissingTeamName,

    #[error("{0}")]
    Message(String),

    #[error("API Response(status: {0})")]
    Status(u16),

    #[error("{}", pretty_json(.0))]
    Payload(Value),
}

impl OperationError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Classify a non-2xx response: a body wins over the bare status.
    pub fn from_response(status: u16, body: Value) -> Self {
        if body.is_null() {
            Self::Status(status)
        } else {
            Self::Payload(body)
        }
    }

    /// Text placed in an error envelope.
    pub fn to_text(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Message(err.to_string())
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
