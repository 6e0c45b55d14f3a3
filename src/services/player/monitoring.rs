use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::services::connectivity::ConnectivityState;
use crate::services::playback::{PlaybackSource, PlaybackStatus};

use super::controller::PlayerController;

/// Forwards a playback status stream into a controller.
///
/// Holds only a weak reference: the monitor ends on its own once the
/// controller is dropped or the stream closes. Dropping the monitor aborts
/// the forwarding task.
pub struct StatusMonitor {
    handle: JoinHandle<()>,
}

impl StatusMonitor {
    /// Start forwarding status events into the controller.
    pub fn start<S, St>(controller: &Arc<PlayerController<S>>, statuses: St) -> Self
    where
        S: PlaybackSource,
        St: Stream<Item = PlaybackStatus> + Send + 'static,
    {
        let weak = Arc::downgrade(controller);
        let handle = tokio::spawn(async move {
            let mut statuses = std::pin::pin!(statuses);
            while let Some(status) = statuses.next().await {
                let Some(player) = weak.upgrade() else {
                    break;
                };
                player.handle_status(&status);
            }
            debug!("status stream ended");
        });

        Self { handle }
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Forwards connectivity change reports into a controller.
pub struct ConnectivityMonitor {
    handle: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Start forwarding connectivity reports into the controller.
    pub fn start<S, St>(controller: &Arc<PlayerController<S>>, changes: St) -> Self
    where
        S: PlaybackSource,
        St: Stream<Item = ConnectivityState> + Send + 'static,
    {
        let weak = Arc::downgrade(controller);
        let handle = tokio::spawn(async move {
            let mut changes = std::pin::pin!(changes);
            while let Some(reach) = changes.next().await {
                let Some(player) = weak.upgrade() else {
                    break;
                };
                player.set_connectivity(reach);
            }
            debug!("connectivity stream ended");
        });

        Self { handle }
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
