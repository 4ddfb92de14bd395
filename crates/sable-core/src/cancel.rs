//! Cooperative cancellation.
//!
//! Long-running loops poll a [`Checkpoint`] every few items; once the request's
//! token is cancelled the checkpoint yields [`Cancelled`], which callers
//! propagate with `?` up to the request boundary.
//!
//! ```rust,ignore
//! let mut checkpoint = Checkpoint::new(token.clone());
//! for item in work {
//!     checkpoint.tick()?;
//!     // expensive work...
//! }
//! ```

use thiserror::Error;

pub use tokio_util::sync::CancellationToken;

/// Default number of processed items between two cancellation polls.
pub const DEFAULT_CHECKPOINT_INTERVAL: u32 = 50;

/// The request was cancelled before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// Periodic cancellation poll for tight loops.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    token: CancellationToken,
    every: u32,
    ticks: u32,
}

impl Checkpoint {
    pub fn new(token: CancellationToken) -> Self {
        Self::with_interval(token, DEFAULT_CHECKPOINT_INTERVAL)
    }

    /// A zero interval is treated as "poll on every tick".
    pub fn with_interval(token: CancellationToken, every: u32) -> Self {
        Self {
            token,
            every: every.max(1),
            ticks: 0,
        }
    }

    /// Record one processed item, polling the token every `every` items.
    #[inline]
    pub fn tick(&mut self) -> Result<(), Cancelled> {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % self.every == 0 {
            self.check()
        } else {
            Ok(())
        }
    }

    /// Poll the token immediately.
    #[inline]
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.token.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Number of ticks recorded so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
