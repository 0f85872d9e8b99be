//! crossgate-lambda — run a [`Handler`](crossgate_core::Handler) behind
//! AWS API Gateway proxy events.
//!
//! The serverless host delivers one pre-parsed proxy event per invocation
//! and expects one serialized proxy response back. This crate performs the
//! translation in both directions so the handler never knows it is not
//! writing to a live connection.
//!
//! # Architecture
//!
//! ```text
//! API Gateway proxy event
//!   │
//!   ▼
//! Gateway::handle
//!   ├── request_received hook
//!   ├── build_request: event → http::Request<Body>
//!   ├── Handler::handle, captured by ResponseRecorder
//!   ├── finish: status/headers/body → ProxyResponse (base64 policy)
//!   ├── before_send hook
//!   │
//!   ▼
//! proxy response returned to the invocation loop
//! ```
//!
//! The invocation loop itself (polling the Lambda runtime API, JSON
//! de/serialization of events) belongs to the embedding application;
//! [`Gateway::handle`] is the seam it calls. [`is_lambda`] tells the
//! application which surface to start.

pub mod env;
pub mod error;
pub mod event;
pub mod gateway;
pub mod hooks;
pub mod recorder;
pub mod request;

pub use env::is_lambda;
pub use error::{GatewayError, GatewayResult};
pub use event::{ProxyRequest, ProxyResponse};
pub use gateway::Gateway;
pub use hooks::Hooks;
pub use recorder::{ResponseRecorder, default_should_encode};
pub use request::{build_request, lambda_event};
