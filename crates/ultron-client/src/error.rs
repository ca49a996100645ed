use thiserror::Error;

/// Errors from talking to the GameQuery endpoint
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("timed out talking to GameQuery at {endpoint}")]
    Timeout { endpoint: String },

    #[error(
        "connection refused by {endpoint} - make sure Minecraft is running with the GameQuery mod loaded and you are in a world"
    )]
    ConnectionRefused { endpoint: String },

    #[error("GameQuery reported an error: {0}")]
    QueryFailed(String),

    #[error("connection closed before a response line arrived")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
