//! JavaScript-facing access to the bridges.
//!
//! For a UI that is not written in Rust. Messages use the JSON wire
//! format of `page_host::message`:
//!
//! ```js
//! const port = new JsPort();
//! port.subscribe(({ key, value }) => console.log(key, value));
//! port.send(JSON.stringify({ type: "LocalStorageGet", key: "theme" }));
//! ```

use page_host::{Host, HostConfig, Request, Response, ResponsePort};
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::logging;
use crate::web::{self, WindowViewport, to_js};

#[wasm_bindgen]
pub struct JsPort {
    host: Host<WindowViewport>,
    responses: ResponsePort,
}

#[wasm_bindgen]
impl JsPort {
    /// Build the bridges, optionally from a JSON config string.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<JsPort, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config {
            Some(text) => HostConfig::from_json(&text).map_err(to_js)?,
            None => HostConfig::default(),
        };
        logging::init(&config.log_filter).map_err(to_js)?;

        let window = web::window().map_err(to_js)?;
        let responses = ResponsePort::new();
        let host = Host::build(&config, web::browser_ports(&window), responses.clone());
        Ok(JsPort { host, responses })
    }

    /// Dispatch one JSON-encoded request. Malformed messages throw.
    pub fn send(&self, message: &str) -> Result<(), JsValue> {
        let request = Request::from_json(message).map_err(to_js)?;
        self.host.dispatch(request);
        Ok(())
    }

    /// Register the response handler. It receives plain objects such as
    /// `{ type: "LocalStorageResponse", key: "theme", value: null }`.
    pub fn subscribe(&self, handler: js_sys::Function) {
        self.responses.subscribe(move |response: Response| {
            let message = match response.to_json() {
                Ok(json) => js_sys::JSON::parse(&json),
                Err(e) => {
                    warn!(error = %e, "could not encode response");
                    return;
                }
            };
            let delivered = message.and_then(|message| handler.call1(&JsValue::NULL, &message));
            if let Err(e) = delivered {
                warn!(error = %web::js_error(e), "response handler threw");
            }
        });
    }
}
