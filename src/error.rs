use thiserror::Error;

/// Failures a playlist mutation can end in. The display text is what the
/// user is shown after the `Error: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("CSRF token is missing.")]
    MissingToken,

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Bad request. Please check the data and try again.")]
    BadRequest,

    #[error("Playlist or episode not found.")]
    NotFound,

    #[error("Server error occurred.")]
    ServerError,

    #[error("Unexpected response: {0}")]
    UnexpectedStatus(u16),

    #[error("Response could not be parsed: {0}")]
    ResponseParse(String),

    #[error("Could not read CSRF token page: {0}")]
    TokenPage(String),
}
