//! Trailing-edge debounce for search submissions

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Coalesces submissions arriving inside one window
///
/// Each call to [`Debouncer::settle`] takes a ticket and waits out the
/// window. Only the holder of the latest ticket proceeds; everyone else gets
/// [`Error::Superseded`].
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait out the window; Ok only if no newer submission arrived meanwhile
    pub async fn settle(&self) -> Result<()> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.window.is_zero() {
            tokio::time::sleep(self.window).await;
        }

        let latest = self.generation.load(Ordering::SeqCst);
        if latest == ticket {
            Ok(())
        } else {
            debug!(ticket, latest, "submission superseded");
            Err(Error::Superseded)
        }
    }
}
