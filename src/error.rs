use thiserror::Error;

/// Local checks that stop a submission before any request is made.
///
/// `Display` is the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a username.")]
    EmptyUsername,
    #[error("CSRF Token not found. Please reload the page.")]
    MissingCsrfToken,
}

/// Anything that goes wrong between sending the request and having a usable
/// server verdict. Only ever logged; the user gets a generic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("no response within {ms} ms")]
    Timeout { ms: u32 },
    #[error("response is not valid JSON: {0}")]
    Decode(String),
    #[error("successful response without a redirect target")]
    MissingRedirect,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(String),
    #[error("max_stars must be between 1 and {max}, got {got}")]
    MaxStarsOutOfRange { got: u8, max: u8 },
    #[error("auth.timeout_ms must be greater than 0")]
    ZeroTimeout,
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },
}
