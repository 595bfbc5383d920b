/**
 * Notification Fan-out
 *
 * [`Notifier`] writes one notification record per affected recipient.
 * Delivery is best-effort and at-most-once: a failed write is logged at
 * `warn` and dropped, and the triggering request still succeeds. Fan-out to
 * many recipients is a sequence of independent writes; a failure partway
 * through leaves the earlier writes in place and skips nothing else.
 *
 * Actors are never notified about their own actions.
 */

use crate::backend::store::Store;
use crate::shared::social::{Notification, NotificationKind};

use super::db;

#[derive(Debug, Clone)]
pub struct Notifier {
    store: Store,
}

impl Notifier {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Write a single notification; returns whether it was stored
    pub async fn notify(
        &self,
        recipient: &str,
        kind: NotificationKind,
        actor: &str,
        message: &str,
        related_id: &str,
    ) -> bool {
        if recipient == actor {
            return false;
        }

        let notification = Notification::new(recipient, kind, actor, message, related_id);
        match db::insert_notification(&self.store, &notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    recipient = %recipient,
                    kind = ?kind,
                    "Failed to deliver notification: {:?}",
                    e
                );
                false
            }
        }
    }

    /// Notify every recipient in order; returns how many were stored
    pub async fn fan_out(
        &self,
        recipients: &[String],
        kind: NotificationKind,
        actor: &str,
        message: &str,
        related_id: &str,
    ) -> usize {
        let mut delivered = 0;
        for recipient in recipients {
            if self.notify(recipient, kind, actor, message, related_id).await {
                delivered += 1;
            }
        }
        tracing::debug!(
            "Fan-out of {:?} from {} reached {}/{} recipients",
            kind,
            actor,
            delivered,
            recipients.len()
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn notifier() -> (Notifier, Store) {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();
        (Notifier::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_fan_out_writes_one_record_per_recipient() {
        let (notifier, store) = notifier().await;
        let recipients = vec!["bob".to_string(), "carol".to_string()];

        let delivered = notifier
            .fan_out(&recipients, NotificationKind::Post, "alice", "alice created a new post", "p1")
            .await;
        assert_eq!(delivered, 2);

        let bob = db::list_notifications(&store, "bob").await.unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].kind, NotificationKind::Post);
        assert!(!bob[0].is_read);
    }

    #[tokio::test]
    async fn test_self_notification_is_skipped() {
        let (notifier, store) = notifier().await;
        assert!(!notifier.notify("alice", NotificationKind::Like, "alice", "x", "p").await);
        assert!(db::list_notifications(&store, "alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_swallowed() {
        let (notifier, store) = notifier().await;
        store.pool().close().await;

        let delivered = notifier
            .fan_out(&["bob".to_string()], NotificationKind::Follow, "alice", "alice followed you", "alice")
            .await;
        assert_eq!(delivered, 0);
    }
}
