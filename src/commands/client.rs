// ABOUTME: Runtime client handle shared by the lifecycle subcommands.
// ABOUTME: Resolves the endpoint, connects, and carries a cancellation token released on drop.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::GlobalOptions;
use crate::error::{Error, Result};
use crate::runtime::{BollardRuntime, RuntimeError, detect_runtime};

/// Cooperative cancellation shared between a client and its watchers.
#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel()` has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as self, so wait_for only ends by cancellation.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// An open connection to the runtime, scoped to one namespace.
///
/// Dropping the handle cancels its token, which also stops the interrupt
/// watcher started by [`connect`].
pub struct RuntimeClient<R = BollardRuntime> {
    runtime: R,
    namespace: String,
    cancel: CancelToken,
}

impl<R> RuntimeClient<R> {
    pub fn new(runtime: R, namespace: impl Into<String>) -> Self {
        Self {
            runtime,
            namespace: namespace.into(),
            cancel: CancelToken::new(),
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run a delegate call, abandoning it if the client is cancelled first.
    pub async fn run<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            result = fut => result,
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
        }
    }

    /// Cancel this client when the process receives Ctrl-C.
    fn cancel_on_interrupt(&self) {
        let token = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("interrupt received, cancelling runtime call");
                    token.cancel();
                }
                _ = token.cancelled() => {}
            }
        });
    }
}

impl<R> Drop for RuntimeClient<R> {
    fn drop(&mut self) {
        tracing::debug!(namespace = %self.namespace, "releasing runtime client");
        self.cancel.cancel();
    }
}

/// Connect to the container runtime described by the global options.
pub async fn connect(global: &GlobalOptions) -> Result<RuntimeClient> {
    let endpoint = detect_runtime(global.address.as_ref()).map_err(RuntimeError::from)?;

    tracing::debug!(
        runtime = %endpoint.runtime_type,
        address = %endpoint.address,
        namespace = %global.namespace,
        "connecting to runtime"
    );

    let runtime = BollardRuntime::connect(&endpoint).map_err(RuntimeError::from)?;
    let client = RuntimeClient::new(runtime, global.namespace.clone());
    client.cancel_on_interrupt();
    Ok(client)
}
