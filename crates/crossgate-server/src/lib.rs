//! crossgate-server — the conventional always-listening surface.
//!
//! Serves a [`Handler`](crossgate_core::Handler) over plain HTTP/1.1. The
//! same handler value runs unmodified behind
//! `crossgate_lambda::Gateway`; a process usually picks the surface at
//! startup with `crossgate_lambda::is_lambda()`.

pub mod capture;
pub mod server;

pub use capture::BufferedResponse;
pub use server::HttpServer;
