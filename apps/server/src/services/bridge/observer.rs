//! Operational visibility for bridged transfers.

use tracing::{debug, error};

use crate::error::BridgeError;

/// Receives the outcome of every bridged request.
///
/// Injected into the bridge so tests can record outcomes instead of reading logs.
pub trait BridgeObserver: Send + Sync {
    /// A transfer finished and `bytes` were streamed to the client.
    fn transfer_completed(&self, path: &str, bytes: u64);

    /// The request failed. `committed` is true when the response had already been sent.
    fn request_failed(&self, url: &str, err: &BridgeError, committed: bool);
}

/// Observer that reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BridgeObserver for TracingObserver {
    fn transfer_completed(&self, path: &str, bytes: u64) {
        debug!(path = %path, bytes, "Transfer completed");
    }

    fn request_failed(&self, url: &str, err: &BridgeError, committed: bool) {
        if err.is_not_found() {
            error!(url = %url, "Not Found: {}", err);
        } else if committed {
            error!(url = %url, error = %err, "Request failed after response was committed; body truncated");
        } else {
            error!(url = %url, error = ?err, "Request failed");
        }
    }
}
