//! Per-invocation adapter entry point.

use crossgate_core::Handler;
use tracing::debug;

use crate::error::GatewayResult;
use crate::event::{ProxyRequest, ProxyResponse};
use crate::hooks::Hooks;
use crate::recorder::ResponseRecorder;
use crate::request::build_request;

/// Bridges proxy events to a [`Handler`].
///
/// Constructed once, before the invocation loop starts. `handle` allocates
/// all per-invocation state fresh (request, recorder, attached event), so
/// one gateway can serve concurrent invocations through `&self`.
pub struct Gateway<H> {
    handler: H,
    hooks: Hooks,
}

impl<H: Handler> Gateway<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            hooks: Hooks::new(),
        }
    }

    pub fn with_hooks(handler: H, hooks: Hooks) -> Self {
        Self { handler, hooks }
    }

    /// Translate one proxy event through the handler into one proxy
    /// response.
    ///
    /// Fails only while the standard request is being built (malformed
    /// path or base64 body); the handler never runs in that case and no
    /// response value is produced. Once the handler has started, a
    /// response is always returned.
    pub fn handle(&self, event: ProxyRequest) -> GatewayResult<ProxyResponse> {
        self.hooks.notify_request_received(&event);

        let request = build_request(&event)?;
        debug!(method = %request.method(), target = %request.uri(), "dispatching proxy event");

        let mut recorder = ResponseRecorder::new();
        self.handler.handle(request, &mut recorder);

        let mut response = recorder.finish(|resp, body| self.hooks.should_encode(resp, body));
        self.hooks.notify_before_send(&event, &mut response);
        Ok(response)
    }
}
