//! Adapter runtime integration.
//!
//! Lets the sync terminal loop host the async TCP server on a background
//! tokio runtime while both drive the same [`SharedGame`].

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::run_server;
use crate::shared::SharedGame;

/// Running adapter instance. Dropping it stops the server.
pub struct AdapterRuntime {
    rt: Runtime,
    local_addr: SocketAddr,
}

impl AdapterRuntime {
    /// Bind and start serving; returns once the listener is up.
    pub fn start(config: ServerConfig, game: SharedGame) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("create tokio runtime")?;
        let (ready_tx, ready_rx) = oneshot::channel();

        // Bind failures surface here through the join handle.
        let handle = rt.spawn(run_server(config, game, Some(ready_tx)));
        let local_addr = rt.block_on(async {
            match ready_rx.await {
                Ok(addr) => Ok(addr),
                Err(_) => match handle.await {
                    Ok(Err(e)) => Err(e),
                    Ok(Ok(())) => Err(anyhow::anyhow!("adapter stopped before listening")),
                    Err(e) => Err(anyhow::Error::new(e).context("adapter task panicked")),
                },
            }
        })?;

        Ok(Self { rt, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown(self) {
        self.rt.shutdown_timeout(Duration::from_millis(200));
    }
}
