//! Browser host for page-host.
//!
//! Supplies the web-sys ports (window geometry, `localStorage`, popup
//! downloads, timers), console logging, and the bootstrap that mounts a
//! Yew application wired to the bridges. With the default `app` feature
//! the wasm start function mounts the bundled notes app.

#[cfg(feature = "app")]
mod app;
pub mod bootstrap;
#[cfg(feature = "app")]
mod components;
pub mod js_port;
pub mod logging;
pub mod web;

pub use bootstrap::{HostLink, mount, page_config};
pub use js_port::JsPort;

#[cfg(feature = "app")]
use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
///
/// A missing mount container or a malformed page config is fatal and is
/// thrown to the page as a JS exception.
#[cfg(feature = "app")]
#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = page_config().map_err(web::to_js)?;
    logging::init(&config.log_filter).map_err(web::to_js)?;

    mount::<app::App>(&config).map_err(web::to_js)?;
    Ok(())
}
