//! Mounting the application and wiring it to the bridges.

use std::rc::Rc;

use page_host::{BridgeError, Host, HostConfig, Request, ResponsePort};
use tracing::info;
use yew::AppHandle;
use yew::html::BaseComponent;
use yew::prelude::*;

use crate::web;

/// Id of the optional `<script type="application/json">` element holding
/// the host configuration.
pub const CONFIG_ELEMENT_ID: &str = "page-host-config";

/// The application's two channels to the host.
#[derive(Clone, PartialEq)]
pub struct HostLink {
    /// Outbound: every request is dispatched to exactly one bridge.
    pub requests: Callback<Request>,
    /// Inbound: storage answers. Subscribe once; earlier answers are queued.
    pub responses: ResponsePort,
}

impl HostLink {
    pub fn send(&self, request: Request) {
        self.requests.emit(request);
    }
}

/// Read the page's host configuration, or the defaults if there is none.
pub fn page_config() -> Result<HostConfig, BridgeError> {
    let document = web::window()?.document().ok_or(BridgeError::NoDocument)?;
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    config_from_text(text.as_deref())
}

fn config_from_text(text: Option<&str>) -> Result<HostConfig, BridgeError> {
    match text {
        Some(text) if !text.trim().is_empty() => HostConfig::from_json(text),
        _ => Ok(HostConfig::default()),
    }
}

/// Mount `C` into the configured container.
///
/// The container is looked up once; if it is missing nothing is mounted
/// and the error is returned to the caller.
pub fn mount<C>(config: &HostConfig) -> Result<AppHandle<C>, BridgeError>
where
    C: BaseComponent,
    C::Properties: From<HostLink>,
{
    let window = web::window()?;
    let document = window.document().ok_or(BridgeError::NoDocument)?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| BridgeError::MissingContainer(config.container_id.clone()))?;

    let responses = ResponsePort::new();
    let host = Rc::new(Host::build(
        config,
        web::browser_ports(&window),
        responses.clone(),
    ));
    let requests = Callback::from(move |request: Request| host.dispatch(request));

    info!(container = %config.container_id, "mounting application");
    let link = HostLink {
        requests,
        responses,
    };
    Ok(yew::Renderer::<C>::with_root_and_props(container, link.into()).render())
}
