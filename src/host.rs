//! Request dispatch.
//!
//! `Host` owns one instance of each bridge and routes every [`Request`]
//! to exactly one of them.

use std::rc::Rc;

use tracing::debug;

use crate::config::HostConfig;
use crate::export::{ArtifactSink, ExportBridge};
use crate::message::Request;
use crate::port::ResponsePort;
use crate::scroll::{Scheduler, ScrollCoordinator, Viewport};
use crate::storage::{KeyValueStore, StorageBridge};

/// Environment capabilities the bridges are built on.
pub struct Ports<V: Viewport> {
    pub viewport: Rc<V>,
    pub scheduler: Rc<dyn Scheduler>,
    pub store: Rc<dyn KeyValueStore>,
    pub sink: Rc<dyn ArtifactSink>,
}

pub struct Host<V: Viewport> {
    scroll: ScrollCoordinator<V>,
    storage: StorageBridge,
    export: ExportBridge,
}

impl<V: Viewport + 'static> Host<V> {
    pub fn new(
        scroll: ScrollCoordinator<V>,
        storage: StorageBridge,
        export: ExportBridge,
    ) -> Self {
        Self {
            scroll,
            storage,
            export,
        }
    }

    /// Build all bridges from `config`. Storage answers go to `responses`.
    pub fn build(config: &HostConfig, ports: Ports<V>, responses: ResponsePort) -> Self {
        let scroll = ScrollCoordinator::new(ports.viewport, ports.scheduler)
            .with_delay(config.scroll_delay())
            .with_margin_ratio(config.margin_ratio);
        let storage = StorageBridge::new(ports.store, responses);
        let export = ExportBridge::new(ports.sink).with_filename(config.export_filename.clone());
        Self::new(scroll, storage, export)
    }

    pub fn dispatch(&self, request: Request) {
        debug!(
            request = request.name(),
            reply = request.expects_response(),
            "dispatch"
        );
        match request {
            Request::ScrollToId { id } => self.scroll.handle(&id),
            Request::Export { text } => self.export.export(&text),
            Request::StorageSet { key, value } => self.storage.set(&key, &value),
            Request::StorageGet { key } => self.storage.get(&key),
            Request::StorageRemove { key } => self.storage.remove(&key),
        }
    }
}
