//! In-memory response capture.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use crossgate_core::ResponseWriter;
use http::{HeaderMap, StatusCode};

use crate::event::ProxyResponse;

/// Captures everything the handler writes as if it were a live connection,
/// then finalizes the result into a [`ProxyResponse`].
///
/// State machine: open (headers mutable, nothing recorded) → committed
/// (first status or body write; status fixed and headers snapshotted into
/// the outbound maps) → finalized ([`finish`](Self::finish) derives the
/// body transport encoding). A recorder serves exactly one invocation.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    body: Vec<u8>,
    response: ProxyResponse,
    committed: bool,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the status and snapshot the header collection. Names carrying a
    /// single value land in the single-value map only; names with several
    /// values record their first value there and the full ordered list in
    /// the multi-value map.
    fn commit(&mut self, status: StatusCode) {
        if self.committed {
            return;
        }
        self.committed = true;
        self.response.status_code = status.as_u16();

        for name in self.headers.keys() {
            let values: Vec<String> = self
                .headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            if let Some(first) = values.first() {
                self.response
                    .headers
                    .insert(name.as_str().to_string(), first.clone());
            }
            if values.len() > 1 {
                self.response
                    .multi_value_headers
                    .insert(name.as_str().to_string(), values);
            }
        }
    }

    /// Finalize the captured state, exactly once, after the handler
    /// returns. Commits status 200 first if the handler never wrote
    /// anything. The predicate decides base64 transport over the response
    /// recorded so far and the raw body bytes.
    pub fn finish<F>(mut self, should_encode: F) -> ProxyResponse
    where
        F: FnOnce(&ProxyResponse, &[u8]) -> bool,
    {
        if !self.committed {
            self.commit(StatusCode::OK);
        }
        let mut response = self.response;
        if should_encode(&response, &self.body) {
            response.body = STANDARD.encode(&self.body);
            response.is_base64_encoded = true;
        } else {
            response.body = String::from_utf8_lossy(&self.body).into_owned();
            response.is_base64_encoded = false;
        }
        response
    }

    /// Finalize with [`default_should_encode`].
    pub fn into_response(self) -> ProxyResponse {
        self.finish(default_should_encode)
    }
}

impl ResponseWriter for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        self.commit(status);
    }

    fn write_body(&mut self, chunk: &[u8]) {
        if !self.committed {
            self.commit(StatusCode::OK);
        }
        self.body.extend_from_slice(chunk);
    }
}

/// Default body-transport predicate.
///
/// A `Content-Encoding` other than empty or `identity` marks the body as
/// binary-opaque. Otherwise the body is scanned: any byte outside
/// tab/LF/CR or the printable ASCII range `0x20..=0x7f` forces base64.
/// Multi-byte UTF-8 text therefore rides as base64 under this predicate;
/// deployments that want literal UTF-8 bodies install their own predicate
/// through [`Hooks`](crate::Hooks).
pub fn default_should_encode(response: &ProxyResponse, body: &[u8]) -> bool {
    let encoding = response
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-encoding"))
        .map(|(_, value)| value.as_str())
        .unwrap_or("");
    if !encoding.is_empty() && !encoding.eq_ignore_ascii_case("identity") {
        return true;
    }
    body.iter()
        .any(|&b| !matches!(b, b'\t' | b'\n' | b'\r' | 0x20..=0x7f))
}
