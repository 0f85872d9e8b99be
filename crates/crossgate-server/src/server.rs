//! Listening HTTP server.
//!
//! `HttpServer` binds a TCP port and drives the synchronous
//! [`Handler`](crossgate_core::Handler) from a hyper HTTP/1.1 service,
//! one tokio task per connection.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use crossgate_core::{Body, Handler};
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::capture::BufferedResponse;

/// Serves a [`Handler`] as a conventional HTTP/1.1 server.
pub struct HttpServer<H> {
    bind_addr: SocketAddr,
    handler: Arc<H>,
}

impl<H: Handler + Send + Sync + 'static> HttpServer<H> {
    /// Create a new server bound to the given address.
    pub fn new(bind_addr: SocketAddr, handler: H) -> Self {
        Self {
            bind_addr,
            handler: Arc::new(handler),
        }
    }

    /// Start serving.
    ///
    /// Runs until the shutdown signal is received. Spawns a tokio task per
    /// connection using HTTP/1.1.
    pub async fn serve(
        self,
        mut shutdown: tokio::sync::watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .context("failed to bind HTTP server")?;

        info!(addr = %self.bind_addr, "HTTP server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    let (stream, peer_addr) = accept_result.context("accept failed")?;
                    let handler = self.handler.clone();

                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let svc = service_fn(move |req: Request<Incoming>| {
                            let handler = handler.clone();
                            async move {
                                match dispatch(handler, req).await {
                                    Ok(resp) => Ok::<_, hyper::Error>(resp),
                                    Err(e) => {
                                        error!(%peer_addr, error = %e, "request handler failed");
                                        Ok(Response::builder()
                                            .status(500)
                                            .body(Full::new(Bytes::from("Internal Server Error")))
                                            .unwrap())
                                    }
                                }
                            }
                        });

                        if let Err(e) = http1::Builder::new()
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(%peer_addr, error = %e, "connection error");
                        }
                    });
                }
                _ = shutdown.changed() => {
                    info!("HTTP server shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Buffer the incoming body, run the handler on a blocking thread, and
/// convert the captured response.
async fn dispatch<H: Handler + Send + Sync + 'static>(
    handler: Arc<H>,
    req: Request<Incoming>,
) -> anyhow::Result<Response<Full<Bytes>>> {
    let (parts, incoming) = req.into_parts();
    let payload = incoming
        .collect()
        .await
        .context("failed to read request body")?
        .to_bytes();

    let body = if payload.is_empty() {
        Body::empty()
    } else {
        Body::from(payload.to_vec())
    };
    let request = Request::from_parts(parts, body);

    let response = tokio::task::spawn_blocking(move || {
        let mut capture = BufferedResponse::new();
        handler.handle(request, &mut capture);
        capture.into_response()
    })
    .await
    .context("handler task failed")?;

    Ok(response)
}
