//! Messages exchanged between the UI application and the host.
//!
//! The wire form is JSON with a `type` tag:
//!
//! ```text
//! {"type":"ScrollToId","id":"row-3"}
//! {"type":"LocalStorageSet","key":"theme","value":"dark"}
//! {"type":"LocalStorageResponse","key":"missing","value":null}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// A request sent from the application to the host.
///
/// Only [`Request::StorageGet`] produces a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Bring the element with this id into comfortable view.
    ScrollToId { id: String },
    /// Offer `text` as a downloadable file.
    Export { text: String },
    #[serde(rename = "LocalStorageSet")]
    StorageSet { key: String, value: String },
    #[serde(rename = "LocalStorageGet")]
    StorageGet { key: String },
    #[serde(rename = "LocalStorageRemove")]
    StorageRemove { key: String },
}

impl Request {
    pub fn scroll_to(id: impl Into<String>) -> Self {
        Request::ScrollToId { id: id.into() }
    }

    pub fn export(text: impl Into<String>) -> Self {
        Request::Export { text: text.into() }
    }

    pub fn storage_set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Request::StorageSet {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn storage_get(key: impl Into<String>) -> Self {
        Request::StorageGet { key: key.into() }
    }

    pub fn storage_remove(key: impl Into<String>) -> Self {
        Request::StorageRemove { key: key.into() }
    }

    /// Wire name of this request.
    pub fn name(&self) -> &'static str {
        match self {
            Request::ScrollToId { .. } => "ScrollToId",
            Request::Export { .. } => "Export",
            Request::StorageSet { .. } => "LocalStorageSet",
            Request::StorageGet { .. } => "LocalStorageGet",
            Request::StorageRemove { .. } => "LocalStorageRemove",
        }
    }

    /// Whether the host answers this request.
    pub fn expects_response(&self) -> bool {
        matches!(self, Request::StorageGet { .. })
    }

    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A message sent from the host back into the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Answer to a `LocalStorageGet`. `None` means the key is not set,
    /// which is different from a stored empty string.
    #[serde(rename = "LocalStorageResponse")]
    StorageGetResult { key: String, value: Option<String> },
}

impl Response {
    pub fn key(&self) -> &str {
        match self {
            Response::StorageGetResult { key, .. } => key,
        }
    }

    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}
