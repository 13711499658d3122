//! web-sys implementations of the host ports.

use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use page_host::{
    Artifact, ArtifactSink, BridgeError, Geometry, KeyValueStore, MemoryStore, Ports, Scheduler,
    Viewport,
};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Storage, Url, Window};

/// Convert a thrown JS value into a `BridgeError`.
pub fn js_error(value: JsValue) -> BridgeError {
    let text = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
    };
    BridgeError::Js(text)
}

/// Convert a `BridgeError` into a JS `Error` for returning to JavaScript.
pub fn to_js(err: BridgeError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

pub fn window() -> Result<Window, BridgeError> {
    web_sys::window().ok_or(BridgeError::NoWindow)
}

/// Ports backed by the live page.
///
/// Falls back to an in-memory store when `localStorage` is refused.
pub fn browser_ports(window: &Window) -> Ports<WindowViewport> {
    let store: Rc<dyn KeyValueStore> = match LocalStore::open(window) {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!(error = %e, "localStorage refused, values will not survive a reload");
            Rc::new(MemoryStore::new())
        }
    };

    Ports {
        viewport: Rc::new(WindowViewport::new(window.clone())),
        scheduler: Rc::new(TimerScheduler),
        store,
        sink: Rc::new(PopupSink::new(window.clone())),
    }
}

pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    type Element = HtmlElement;

    fn find(&self, id: &str) -> Option<HtmlElement> {
        self.window
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn measure(&self, element: &HtmlElement) -> Option<Geometry> {
        if !element.is_connected() {
            return None;
        }
        Some(Geometry {
            view_top: self.window.scroll_y().ok()?,
            view_height: self.window.inner_height().ok()?.as_f64()?,
            element_top: f64::from(element.offset_top()),
            element_height: f64::from(element.offset_height()),
        })
    }

    fn scroll_to(&self, top: f64) {
        self.window.scroll_to_with_x_and_y(0.0, top);
    }
}

/// Deferral on the browser event loop.
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open(window: &Window) -> Result<Self, BridgeError> {
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or(BridgeError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), BridgeError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// Opens a new tab holding a single download link to the artifact.
pub struct PopupSink {
    window: Window,
}

impl PopupSink {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

/// The artifact's text as a `Blob` of its MIME type.
pub fn artifact_blob(artifact: &Artifact) -> Result<Blob, BridgeError> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&artifact.content));
    let options = BlobPropertyBag::new();
    options.set_type(&artifact.mime);
    Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)
}

impl ArtifactSink for PopupSink {
    fn present(&self, artifact: &Artifact) -> Result<(), BridgeError> {
        // Everything that can fail before the tab exists is done first, so
        // a failure never leaves an empty tab behind.
        let blob = artifact_blob(artifact)?;
        // Not revoked once shown: the link has to stay usable for as long
        // as the tab is open.
        let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let popup = match self.window.open_with_url_and_target("", "_blank") {
            Ok(Some(popup)) => popup,
            Ok(None) => {
                let _ = Url::revoke_object_url(&url);
                return Err(BridgeError::PopupBlocked);
            }
            Err(e) => {
                let _ = Url::revoke_object_url(&url);
                return Err(js_error(e));
            }
        };
        let document = popup.document().ok_or(BridgeError::NoDocument)?;
        let body = document.body().ok_or(BridgeError::NoDocument)?;

        // The popup is another realm, so build the link through plain
        // Element methods rather than casting to HtmlAnchorElement.
        let anchor = document.create_element("a").map_err(js_error)?;
        anchor.set_attribute("href", &url).map_err(js_error)?;
        anchor
            .set_attribute("download", &artifact.filename)
            .map_err(js_error)?;
        anchor.set_text_content(Some(&artifact.filename));
        body.append_child(&anchor).map_err(js_error)?;
        Ok(())
    }
}
