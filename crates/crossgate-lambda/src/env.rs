//! Lambda environment detection.

use std::env;
use std::ffi::OsString;

/// Set by current Lambda runtimes to the runtime API endpoint.
const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";
/// Set by the legacy runtime interface.
const LEGACY_PORT_VAR: &str = "_LAMBDA_SERVER_PORT";

/// True when the current process is running inside an AWS Lambda
/// container.
///
/// This is the surface selector: a process typically calls it once at
/// startup and either enters the invocation loop around
/// [`Gateway::handle`](crate::Gateway::handle) or binds a listening
/// server. Reading it has no side effects.
pub fn is_lambda() -> bool {
    present(env::var_os(RUNTIME_API_VAR)) || present(env::var_os(LEGACY_PORT_VAR))
}

fn present(value: Option<OsString>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
