//! Response capture for the listening surface.

use bytes::Bytes;
use crossgate_core::ResponseWriter;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::Full;

/// Buffers one handler response before it goes out over the connection.
///
/// Same commit rule as the serverless recorder: the first status or body
/// write fixes the status and snapshots the headers; later header
/// mutations are ignored. Unlike the serverless side there is no transport
/// encoding step, the raw bytes go straight into the hyper response.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    headers: HeaderMap,
    status: Option<StatusCode>,
    frozen_headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw body bytes accumulated so far.
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Convert the captured state into a hyper response. A handler that
    /// never wrote anything yields an empty 200.
    pub fn into_response(mut self) -> Response<Full<Bytes>> {
        if self.status.is_none() {
            self.write_status(StatusCode::OK);
        }
        let status = self.status.unwrap_or(StatusCode::OK);

        let mut response = Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = status;
        *response.headers_mut() = self.frozen_headers;
        response
    }
}

impl ResponseWriter for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.status.is_some() {
            return;
        }
        self.status = Some(status);
        self.frozen_headers = self.headers.clone();
    }

    fn write_body(&mut self, chunk: &[u8]) {
        if self.status.is_none() {
            self.write_status(StatusCode::OK);
        }
        self.body.extend_from_slice(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_capture_is_an_empty_200() {
        let response = BufferedResponse::new().into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
    }

    #[test]
    fn first_status_wins() {
        let mut capture = BufferedResponse::new();
        capture.write_status(StatusCode::IM_A_TEAPOT);
        capture.write_status(StatusCode::OK);
        assert_eq!(capture.into_response().status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn headers_freeze_on_first_body_write() {
        let mut capture = BufferedResponse::new();
        capture
            .headers_mut()
            .insert("content-type", "text/plain".parse().unwrap());
        capture.write_body(b"x");
        capture
            .headers_mut()
            .insert("x-late", "ignored".parse().unwrap());

        let response = capture.into_response();
        assert_eq!(response.headers().get("content-type").unwrap(), "text/plain");
        assert!(!response.headers().contains_key("x-late"));
    }

    #[test]
    fn body_writes_accumulate() {
        let mut capture = BufferedResponse::new();
        capture.write_body(b"hello ");
        capture.write_body(b"world");
        assert_eq!(capture.body_bytes(), b"hello world");
        assert_eq!(capture.into_response().status(), StatusCode::OK);
    }
}
