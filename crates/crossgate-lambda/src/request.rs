//! Standard request construction from an inbound proxy event.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use crossgate_core::Body;
use http::{HeaderName, HeaderValue, Method, Request, Uri};
use url::form_urlencoded;

use crate::error::{GatewayError, GatewayResult};
use crate::event::ProxyRequest;

/// Build a standard [`http::Request`] from an inbound proxy event.
///
/// The full event is attached to the request extensions and stays
/// retrievable through [`lambda_event`] for the lifetime of the invocation.
/// Fails on a path that is not a valid URL reference or a base64 body that
/// does not decode; in both cases the handler never runs.
pub fn build_request(event: &ProxyRequest) -> GatewayResult<Request<Body>> {
    let uri = build_uri(event)?;
    let method = parse_method(&event.http_method)?;
    let body = build_body(event)?;

    let mut request = Request::new(body);
    *request.method_mut() = method;
    *request.uri_mut() = uri;

    let headers = request.headers_mut();
    for (name, value) in &event.headers {
        // Names and values that are not valid HTTP tokens are skipped,
        // not fatal.
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    for (name, values) in &event.multi_value_headers {
        // Multi-value entries are authoritative for their key.
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            headers.remove(&name);
            for value in values {
                if let Ok(value) = HeaderValue::from_str(value) {
                    headers.append(name.clone(), value);
                }
            }
        }
    }

    request.extensions_mut().insert(Arc::new(event.clone()));
    Ok(request)
}

/// Retrieve the proxy event attached to a request built by
/// [`build_request`], or `None` when the request came in over the
/// listening server surface.
pub fn lambda_event(request: &Request<Body>) -> Option<&ProxyRequest> {
    request
        .extensions()
        .get::<Arc<ProxyRequest>>()
        .map(Arc::as_ref)
}

/// Merge the event's query parameter maps into the path's own query string.
///
/// Single-value parameters replace pairs embedded in the path; multi-value
/// parameters replace again and expand to repeated `key=value` pairs in map
/// order, each value encoded independently.
fn build_uri(event: &ProxyRequest) -> GatewayResult<Uri> {
    let raw_path: &str = if event.path.is_empty() { "/" } else { &event.path };
    let parsed: Uri = raw_path.parse().map_err(|source| GatewayError::InvalidPath {
        path: event.path.clone(),
        source,
    })?;

    let mut pairs: Vec<(String, String)> = match parsed.query() {
        Some(query) => form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        None => Vec::new(),
    };
    for (key, value) in &event.query_string_parameters {
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.clone(), value.clone()));
    }
    for (key, values) in &event.multi_value_query_string_parameters {
        pairs.retain(|(k, _)| k != key);
        for value in values {
            pairs.push((key.clone(), value.clone()));
        }
    }

    let target = if pairs.is_empty() {
        parsed.path().to_string()
    } else {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&pairs)
            .finish();
        format!("{}?{}", parsed.path(), query)
    };
    target.parse().map_err(|source| GatewayError::InvalidPath {
        path: event.path.clone(),
        source,
    })
}

fn parse_method(method: &str) -> GatewayResult<Method> {
    if method.is_empty() {
        // Hosts may omit the method on synthetic events.
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(|_| GatewayError::InvalidMethod {
        method: method.to_string(),
    })
}

fn build_body(event: &ProxyRequest) -> GatewayResult<Body> {
    if event.body.is_empty() {
        return Ok(Body::empty());
    }
    if event.is_base64_encoded {
        let bytes = STANDARD.decode(&event.body)?;
        return Ok(Body::from(bytes));
    }
    // No base64 flag: the literal string bytes, no encoding assumptions.
    Ok(Body::from(event.body.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn event(path: &str) -> ProxyRequest {
        ProxyRequest {
            path: path.to_string(),
            http_method: "GET".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn merges_single_value_query_into_path() {
        let mut event = event("/this/is/the/path");
        event
            .query_string_parameters
            .insert("q".into(), "q1".into());

        let request = build_request(&event).unwrap();
        assert_eq!(request.uri().to_string(), "/this/is/the/path?q=q1");
    }

    #[test]
    fn multi_value_query_expands_to_repeated_pairs() {
        let mut event = event("/search");
        event.query_string_parameters.insert("q".into(), "last".into());
        event
            .multi_value_query_string_parameters
            .insert("q".into(), vec!["a".into(), "b".into(), "c".into()]);

        let request = build_request(&event).unwrap();
        assert_eq!(request.uri().query(), Some("q=a&q=b&q=c"));
    }

    #[test]
    fn single_value_query_overwrites_embedded_pair() {
        let mut event = event("/path?q=embedded&keep=1");
        event.query_string_parameters.insert("q".into(), "q1".into());

        let request = build_request(&event).unwrap();
        let query = request.uri().query().unwrap();
        assert!(query.contains("q=q1"));
        assert!(query.contains("keep=1"));
        assert!(!query.contains("embedded"));
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let mut event = event("/path");
        event
            .query_string_parameters
            .insert("q".into(), "a b&c".into());

        let request = build_request(&event).unwrap();
        assert_eq!(request.uri().query(), Some("q=a+b%26c"));
    }

    #[test]
    fn invalid_path_is_a_hard_failure() {
        let event = event("/bad path with spaces");
        let err = build_request(&event).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidPath { .. }));
    }

    #[test]
    fn empty_path_defaults_to_root() {
        let request = build_request(&event("")).unwrap();
        assert_eq!(request.uri().path(), "/");
    }

    #[test]
    fn empty_method_defaults_to_get() {
        let mut event = event("/x");
        event.http_method.clear();
        let request = build_request(&event).unwrap();
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn empty_body_yields_the_eof_sentinel() {
        let request = build_request(&event("/x")).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(request.into_body().read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn base64_body_is_decoded_for_the_handler() {
        let mut event = event("/x");
        event.http_method = "POST".into();
        event.body = "VGhpcyBpcyB0aGUgYm9keQo=".into();
        event.is_base64_encoded = true;

        let request = build_request(&event).unwrap();
        let mut body = String::new();
        request.into_body().read_to_string(&mut body).unwrap();
        assert_eq!(body, "This is the body\n");
    }

    #[test]
    fn invalid_base64_body_is_a_hard_failure() {
        let mut event = event("/x");
        event.body = "not!!base64".into();
        event.is_base64_encoded = true;

        let err = build_request(&event).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBody(_)));
    }

    #[test]
    fn plain_body_carries_the_literal_bytes() {
        let mut event = event("/x");
        event.body = "plain text".into();

        let request = build_request(&event).unwrap();
        assert_eq!(request.body().bytes(), b"plain text");
    }

    #[test]
    fn single_value_headers_are_set() {
        let mut event = event("/x");
        event
            .headers
            .insert("Content-Type".into(), "text/plain".into());

        let request = build_request(&event).unwrap();
        assert_eq!(request.headers().get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn multi_value_headers_take_precedence_in_order() {
        let mut event = event("/x");
        event.headers.insert("Accept".into(), "collapsed".into());
        event.multi_value_headers.insert(
            "Accept".into(),
            vec!["text/html".into(), "application/json".into()],
        );

        let request = build_request(&event).unwrap();
        let values: Vec<_> = request.headers().get_all("accept").iter().collect();
        assert_eq!(values, vec!["text/html", "application/json"]);
    }

    #[test]
    fn unparseable_header_names_are_skipped() {
        let mut event = event("/x");
        event.headers.insert("bad header\n".into(), "v".into());
        event.headers.insert("good".into(), "v".into());

        let request = build_request(&event).unwrap();
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn event_is_retrievable_during_handling() {
        let mut event = event("/x");
        event.request_context = serde_json::json!({"requestId": "abc-123"});

        let request = build_request(&event).unwrap();
        let attached = lambda_event(&request).unwrap();
        assert_eq!(attached.request_context["requestId"], "abc-123");
    }

    #[test]
    fn server_requests_have_no_attached_event() {
        let request = Request::new(Body::empty());
        assert!(lambda_event(&request).is_none());
    }
}
