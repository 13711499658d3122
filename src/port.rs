//! Inbound channel carrying responses from the host into the application.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::message::Response;

type Subscriber = Rc<dyn Fn(Response)>;

#[derive(Default)]
struct PortState {
    subscriber: Option<Subscriber>,
    pending: VecDeque<Response>,
    /// Set while queued responses are being replayed; new sends queue
    /// behind them.
    flushing: bool,
}

/// Single-subscriber response channel.
///
/// Responses sent before anyone subscribes are queued and delivered,
/// in order, as soon as a subscriber arrives. Clones share the channel.
#[derive(Clone, Default)]
pub struct ResponsePort {
    state: Rc<RefCell<PortState>>,
}

impl ResponsePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the application's response handler, replacing any previous
    /// one, and flush queued responses into it.
    pub fn subscribe(&self, handler: impl Fn(Response) + 'static) {
        {
            let mut state = self.state.borrow_mut();
            state.subscriber = Some(Rc::new(handler));
            if state.flushing {
                // The running flush picks up the new handler.
                return;
            }
            state.flushing = true;
        }
        self.flush();
    }

    fn flush(&self) {
        loop {
            let (handler, response) = {
                let mut state = self.state.borrow_mut();
                let Some(handler) = state.subscriber.clone() else {
                    state.flushing = false;
                    return;
                };
                let Some(response) = state.pending.pop_front() else {
                    state.flushing = false;
                    return;
                };
                (handler, response)
            };
            handler(response);
        }
    }

    pub fn send(&self, response: Response) {
        // The borrow must end before the handler runs; handlers may send.
        let subscriber = {
            let state = self.state.borrow();
            if state.flushing { None } else { state.subscriber.clone() }
        };
        match subscriber {
            Some(handler) => handler(response),
            None => {
                trace!(key = response.key(), "queueing response");
                self.state.borrow_mut().pending.push_back(response);
            }
        }
    }

    /// Number of responses waiting for a subscriber.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.borrow().subscriber.is_some()
    }
}

impl PartialEq for ResponsePort {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ResponsePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsePort")
            .field("subscribed", &self.is_subscribed())
            .field("pending", &self.pending())
            .finish()
    }
}
