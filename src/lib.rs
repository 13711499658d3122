//! # page-host
//!
//! Host-side bridges for a UI application mounted into a web page.
//!
//! The application cannot touch a few browser facilities itself, so it
//! sends typed [`Request`]s to the host instead:
//!
//! - **Scroll**: bring an element into comfortable view, keeping a margin
//!   of 10% of the viewport height above and below it.
//! - **Storage**: set, get and remove string values in a key/value store.
//!   A get is answered with exactly one [`Response`].
//! - **Export**: offer in-memory text as a downloadable `text/plain` file.
//!
//! The browser itself is reached only through the port traits
//! ([`Viewport`], [`Scheduler`], [`KeyValueStore`], [`ArtifactSink`]), so
//! everything here runs and tests without one. The `wasm-host` crate
//! supplies the web-sys implementations.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use page_host::{MemoryStore, Response, ResponsePort, StorageBridge};
//!
//! let responses = ResponsePort::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! responses.subscribe(move |r| sink.borrow_mut().push(r));
//!
//! let storage = StorageBridge::new(Rc::new(MemoryStore::new()), responses);
//! storage.set("theme", "dark");
//! storage.get("theme");
//!
//! assert_eq!(
//!     seen.borrow()[0],
//!     Response::StorageGetResult { key: "theme".into(), value: Some("dark".into()) }
//! );
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod message;
pub mod port;
pub mod scroll;
pub mod storage;

pub use config::HostConfig;
pub use error::BridgeError;
pub use export::{Artifact, ArtifactSink, ExportBridge};
pub use host::{Host, Ports};
pub use message::{Request, Response};
pub use port::ResponsePort;
pub use scroll::{
    COMFORT_MARGIN_RATIO, Geometry, SCROLL_SETTLE_DELAY, Scheduler, ScrollCoordinator, Viewport,
    corrective_scroll,
};
pub use storage::{KeyValueStore, MemoryStore, StorageBridge};
