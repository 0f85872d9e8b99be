//! Handler and response-writer traits.

use http::{HeaderMap, Request, StatusCode};

use crate::body::Body;

/// Capability surface a [`Handler`] drives to produce its response.
///
/// The response commits on the first [`write_status`](Self::write_status)
/// call, or on the first [`write_body`](Self::write_body) call if no status
/// was written (which implies status 200). At commit the header collection
/// is frozen: later header mutations and later `write_status` calls are
/// silently ignored.
pub trait ResponseWriter {
    /// Pending response headers. Mutations are observed until the response
    /// commits.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the response status. Only the first call has any effect.
    fn write_status(&mut self, status: StatusCode);

    /// Append raw bytes to the response body. Commits status 200 first if
    /// no status has been written yet.
    fn write_body(&mut self, chunk: &[u8]);
}

/// A synchronous HTTP handler.
///
/// Receives a fully materialized request and drives a [`ResponseWriter`].
/// Any asynchronous work the handler starts must complete before it
/// returns; both surfaces read the captured response only after `handle`
/// comes back.
pub trait Handler {
    fn handle(&self, req: Request<Body>, w: &mut dyn ResponseWriter);
}

impl<F> Handler for F
where
    F: Fn(Request<Body>, &mut dyn ResponseWriter),
{
    fn handle(&self, req: Request<Body>, w: &mut dyn ResponseWriter) {
        self(req, w)
    }
}
