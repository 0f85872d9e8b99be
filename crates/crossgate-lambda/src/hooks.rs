//! Per-gateway invocation hooks.
//!
//! Hooks are explicit fields on the [`Gateway`](crate::Gateway)
//! configuration, set once before the invocation loop starts and read-only
//! afterwards. Concurrent invocations may call them simultaneously, so
//! they must be `Send + Sync`.

use crate::event::{ProxyRequest, ProxyResponse};
use crate::recorder::default_should_encode;

type RequestHook = Box<dyn Fn(&ProxyRequest) + Send + Sync>;
type ResponseHook = Box<dyn Fn(&ProxyRequest, &mut ProxyResponse) + Send + Sync>;
type EncodePredicate = Box<dyn Fn(&ProxyResponse, &[u8]) -> bool + Send + Sync>;

/// Pluggable hook points around one invocation.
///
/// Everything defaults to a no-op; the encode predicate defaults to
/// [`default_should_encode`].
#[derive(Default)]
pub struct Hooks {
    request_received: Option<RequestHook>,
    before_send: Option<ResponseHook>,
    should_encode_body: Option<EncodePredicate>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe each inbound event before the standard request is built.
    pub fn on_request_received(
        mut self,
        hook: impl Fn(&ProxyRequest) + Send + Sync + 'static,
    ) -> Self {
        self.request_received = Some(Box::new(hook));
        self
    }

    /// Observe, and optionally mutate in place, each finalized response
    /// just before it is returned to the host.
    pub fn on_before_send(
        mut self,
        hook: impl Fn(&ProxyRequest, &mut ProxyResponse) + Send + Sync + 'static,
    ) -> Self {
        self.before_send = Some(Box::new(hook));
        self
    }

    /// Replace the finalize-time base64 decision. The commit/finalize state
    /// machine is unaffected; only the boolean changes.
    pub fn with_encode_predicate(
        mut self,
        predicate: impl Fn(&ProxyResponse, &[u8]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_encode_body = Some(Box::new(predicate));
        self
    }

    pub(crate) fn notify_request_received(&self, event: &ProxyRequest) {
        if let Some(hook) = &self.request_received {
            hook(event);
        }
    }

    pub(crate) fn notify_before_send(&self, event: &ProxyRequest, response: &mut ProxyResponse) {
        if let Some(hook) = &self.before_send {
            hook(event, response);
        }
    }

    pub(crate) fn should_encode(&self, response: &ProxyResponse, body: &[u8]) -> bool {
        match &self.should_encode_body {
            Some(predicate) => predicate(response, body),
            None => default_should_encode(response, body),
        }
    }
}
