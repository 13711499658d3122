//! Text export bridge.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::BridgeError;

pub const DEFAULT_EXPORT_FILENAME: &str = "export.txt";
pub const TEXT_PLAIN: &str = "text/plain";

/// A downloadable file built from in-memory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub content: String,
    pub mime: String,
    /// Suggested name for the saved file.
    pub filename: String,
}

/// Presents an artifact to the user, e.g. as a link in a new window.
pub trait ArtifactSink {
    fn present(&self, artifact: &Artifact) -> Result<(), BridgeError>;
}

pub struct ExportBridge {
    sink: Rc<dyn ArtifactSink>,
    filename: String,
}

impl ExportBridge {
    pub fn new(sink: Rc<dyn ArtifactSink>) -> Self {
        Self {
            sink,
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn package(&self, text: &str) -> Artifact {
        Artifact {
            content: text.to_string(),
            mime: TEXT_PLAIN.to_string(),
            filename: self.filename.clone(),
        }
    }

    /// Offer `text` for download. A blocked popup is logged and dropped.
    pub fn export(&self, text: &str) {
        let artifact = self.package(text);
        match self.sink.present(&artifact) {
            Ok(()) => debug!(filename = %artifact.filename, bytes = text.len(), "exported"),
            Err(e) => warn!(error = %e, "export failed"),
        }
    }
}
