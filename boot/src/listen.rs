//! Listen gate: the terminal boot step.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};
use typetempo_core::{BootError, Result};

/// Binds and opens the network listener.
///
/// Invoked at most once per process lifetime, and only after every
/// prior required step has succeeded. No partial "ready" state is ever
/// exposed: until `bind` returns, the process accepts no traffic.
#[derive(Debug)]
pub struct ListenGate {
    router: Router,
}

impl ListenGate {
    /// Create the gate around the application router.
    #[must_use]
    pub const fn new(router: Router) -> Self {
        Self { router }
    }

    /// Bind the listener and begin accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::Listen`] if the port cannot be bound.
    pub async fn bind(self, port: u16) -> Result<ReadyHandle> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BootError::Listen { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| BootError::Listen { port, source })?;

        let router = self.router;
        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                error!(%error, "api server terminated unexpectedly");
            }
        });

        info!(port = local_addr.port(), "api server listening");

        Ok(ReadyHandle { local_addr, server })
    }
}

/// Proof that the service reached the `Ready` state.
///
/// Holds the bound address and the server task. Dropping the handle
/// does not stop the server; `closed` waits for it.
#[derive(Debug)]
pub struct ReadyHandle {
    local_addr: SocketAddr,
    server: JoinHandle<()>,
}

impl ReadyHandle {
    /// Address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Port the listener is bound to.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Wait until the server task exits.
    pub async fn closed(self) {
        let _ = self.server.await;
    }
}
