/// Error types for ForgetMeNot

use thiserror::Error;

/// Errors raised while talking to the browser.
#[derive(Debug, Error)]
pub enum Error {
    /// A chrome.* call rejected or threw.
    #[error("Host error: {0}")]
    Host(String),

    /// A value could not be converted to or from JavaScript.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
