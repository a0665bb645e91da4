//! Best-effort background refill of the user cache.
//!
//! Lookups that missed the cache hand the record they loaded to a bounded
//! queue. A single task drains it into the cache. When the queue is full or
//! the cache write fails the record is logged and dropped; the read that
//! produced it has already returned.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::entities::user::User;

use super::traits::UserCache;

/// Handle to the repopulation task
///
/// The task exits once every handle is dropped.
#[derive(Clone)]
pub struct CacheRepopulator {
    tx: mpsc::Sender<User>,
}

impl CacheRepopulator {
    /// Spawn the drain task on the current Tokio runtime
    ///
    /// # Panics
    /// When called outside a Tokio runtime.
    pub fn spawn<C>(cache: Arc<C>, capacity: usize) -> Self
    where
        C: UserCache + ?Sized + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<User>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(user) = rx.recv().await {
                match cache.set(&user).await {
                    Ok(()) => debug!(uid = user.id, "User cache repopulated"),
                    Err(e) => warn!(
                        uid = user.id,
                        error = %e,
                        "Failed to repopulate user cache"
                    ),
                }
            }
            debug!("User cache repopulation task stopped");
        });

        Self { tx }
    }

    /// Queue `user` for writing; never waits
    pub fn submit(&self, user: User) {
        match self.tx.try_send(user) {
            Ok(()) => {}
            Err(TrySendError::Full(user)) => warn!(
                uid = user.id,
                "User cache repopulation queue full, dropping refill"
            ),
            Err(TrySendError::Closed(user)) => warn!(
                uid = user.id,
                "User cache repopulation task gone, dropping refill"
            ),
        }
    }
}
