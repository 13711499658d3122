//! Error type shared by the bridges and the browser adapters.

use thiserror::Error;

/// Failures raised by host ports.
///
/// Bridges log these and carry on; only the bootstrap and the JS-facing
/// port hand them back to the caller.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("mount container #{0} not found")]
    MissingContainer(String),

    #[error("no global window object")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("localStorage is unavailable")]
    StorageUnavailable,

    #[error("popup window was blocked")]
    PopupBlocked,

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
}
