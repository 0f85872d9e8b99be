//! crossgate-core — the surface-independent HTTP handler contract.
//!
//! Business logic is written once against [`Handler`] and [`ResponseWriter`]
//! and runs unmodified behind either invocation surface: the listening
//! server in `crossgate-server`, or the serverless event adapter in
//! `crossgate-lambda`. This crate only defines the seam; it performs no I/O.

pub mod body;
pub mod handler;

pub use body::Body;
pub use handler::{Handler, ResponseWriter};

// Handlers are written in terms of these types; re-exported so embedding
// applications stay on the same version.
pub use http;
