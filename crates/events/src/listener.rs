//! Postgres `LISTEN` bridge for artist table changes.
//!
//! A trigger on `artists` sends `NOTIFY artist_changes` with a JSON payload
//! `{"op": "insert" | "update" | "delete", "id": "<uuid>"}`.
//! [`ArtistChangeListener`] turns each notification into an [`ArtistEvent`]
//! on the [`EventBus`]. When the connection drops, notifications sent in the
//! meantime are lost, so a [`ArtistChangeKind::Resync`] event is published
//! once the listener is back.

use std::sync::Arc;
use std::time::Duration;

use p100_core::types::ArtistId;
use p100_db::DbPool;
use serde::Deserialize;
use sqlx::postgres::PgListener;

use crate::bus::{ArtistChangeKind, ArtistEvent, EventBus};

/// Notification channel the `artists` trigger publishes on.
pub const ARTIST_CHANGES_CHANNEL: &str = "artist_changes";

/// Delay before retrying after a listener error.
const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NotifyOp {
    Insert,
    Update,
    Delete,
}

impl From<NotifyOp> for ArtistChangeKind {
    fn from(op: NotifyOp) -> Self {
        match op {
            NotifyOp::Insert => Self::Created,
            NotifyOp::Update => Self::Updated,
            NotifyOp::Delete => Self::Deleted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChangePayload {
    op: NotifyOp,
    id: ArtistId,
}

/// Parse an `artist_changes` notification payload.
pub fn parse_notification(payload: &str) -> Result<ArtistEvent, serde_json::Error> {
    let change: ChangePayload = serde_json::from_str(payload)?;
    Ok(ArtistEvent::new(change.op.into(), change.id))
}

/// Forwards `artist_changes` notifications to the event bus.
pub struct ArtistChangeListener {
    listener: PgListener,
    bus: Arc<EventBus>,
}

impl ArtistChangeListener {
    /// Open a dedicated connection from the pool's settings and `LISTEN` on
    /// [`ARTIST_CHANGES_CHANNEL`].
    pub async fn connect(pool: &DbPool, bus: Arc<EventBus>) -> Result<Self, sqlx::Error> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(ARTIST_CHANGES_CHANNEL).await?;
        tracing::info!(channel = ARTIST_CHANGES_CHANNEL, "Listening for artist changes");
        Ok(Self { listener, bus })
    }

    /// Run the listen loop until the pool is closed.
    pub async fn run(mut self) {
        loop {
            match self.listener.try_recv().await {
                Ok(Some(notification)) => match parse_notification(notification.payload()) {
                    Ok(event) => {
                        tracing::debug!(
                            kind = event.kind.as_str(),
                            artist_id = ?event.artist_id,
                            "Artist change received"
                        );
                        self.bus.publish(event);
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            payload = notification.payload(),
                            "Malformed artist change notification, forcing resync"
                        );
                        self.bus.publish(ArtistEvent::resync());
                    }
                },
                Ok(None) => {
                    // The next try_recv reconnects and re-subscribes.
                    tracing::warn!("Artist change listener lost its connection, forcing resync");
                    self.bus.publish(ArtistEvent::resync());
                }
                Err(sqlx::Error::PoolClosed) => {
                    tracing::info!("Database pool closed, artist change listener shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Artist change listener failed, retrying");
                    self.bus.publish(ArtistEvent::resync());
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}
