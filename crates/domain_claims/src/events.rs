//! Submission notifications
//!
//! Events fan out over a `tokio::sync::broadcast` channel. Publishing never
//! waits on subscribers: a receiver that falls more than the channel capacity
//! behind skips the oldest events instead of stalling the publisher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use core_kernel::ClaimId;

use crate::claim::Claim;

/// Default number of events buffered per subscriber
pub const DEFAULT_CAPACITY: usize = 64;

/// Events emitted by the claim lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// A claim has been submitted and persisted
    Submitted {
        claim: Claim,
        timestamp: DateTime<Utc>,
    },
}

impl ClaimEvent {
    pub fn submitted(claim: Claim) -> Self {
        ClaimEvent::Submitted {
            claim,
            timestamp: Utc::now(),
        }
    }

    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::Submitted { claim, .. } => claim.id,
        }
    }
}

/// Publish point for [`ClaimEvent`]s
#[derive(Debug, Clone)]
pub struct ClaimNotifier {
    sender: broadcast::Sender<ClaimEvent>,
    next_subscription: Arc<AtomicU64>,
}

impl ClaimNotifier {
    /// Creates a notifier buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_subscription: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Sends an event to every current subscriber and returns how many were reached
    pub fn publish(&self, event: ClaimEvent) -> usize {
        let claim_id = event.claim_id();
        match self.sender.send(event) {
            Ok(reached) => {
                debug!(claim_id = %claim_id, subscribers = reached, "claim event published");
                reached
            }
            // No receivers: nobody was listening, which is not an error
            Err(_) => 0,
        }
    }

    /// Registers a new subscriber; it only sees events published from now on
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        debug!(subscription = id, "subscriber registered");
        Subscription {
            id,
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ClaimNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Registration handle returned by [`ClaimNotifier::subscribe`]
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: broadcast::Receiver<ClaimEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the next event; `None` once the notifier is gone
    pub async fn recv(&mut self) -> Option<ClaimEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(subscription = self.id, skipped, "subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next buffered event without waiting
    pub fn try_recv(&mut self) -> Option<ClaimEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(subscription = self.id, skipped, "subscriber lagged, events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Removes this subscriber
    pub fn unsubscribe(self) {
        debug!(subscription = self.id, "subscriber removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimPeriod, LecturerId};
    use rust_decimal_macros::dec;

    use crate::status::ClaimStatus;

    fn claim(id: u32) -> Claim {
        Claim {
            id: ClaimId::new(id),
            lecturer_id: LecturerId::new(1),
            period: ClaimPeriod::new(10, 2025).unwrap(),
            submitted_at: Utc::now(),
            total_amount: dec!(7500.00),
            status_id: ClaimStatus::PendingReview.id(),
            is_verified: false,
            verification_notes: None,
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let notifier = ClaimNotifier::default();
        assert_eq!(notifier.publish(ClaimEvent::submitted(claim(1))), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let notifier = ClaimNotifier::new(8);
        let mut early = notifier.subscribe();
        notifier.publish(ClaimEvent::submitted(claim(1)));
        let mut late = notifier.subscribe();
        notifier.publish(ClaimEvent::submitted(claim(2)));

        assert_eq!(early.recv().await.map(|e| e.claim_id()), Some(ClaimId::new(1)));
        assert_eq!(early.recv().await.map(|e| e.claim_id()), Some(ClaimId::new(2)));
        assert_eq!(late.recv().await.map(|e| e.claim_id()), Some(ClaimId::new(2)));
        assert!(late.try_recv().is_none());
    }

    #[test]
    fn test_unsubscribe_drops_receiver() {
        let notifier = ClaimNotifier::default();
        let first = notifier.subscribe();
        let second = notifier.subscribe();
        assert_ne!(first.id(), second.id());
        assert_eq!(notifier.subscriber_count(), 2);

        first.unsubscribe();
        assert_eq!(notifier.subscriber_count(), 1);
    }

    #[test]
    fn test_slow_subscriber_does_not_block_publisher() {
        let notifier = ClaimNotifier::new(2);
        let mut slow = notifier.subscribe();
        for id in 1..=5 {
            notifier.publish(ClaimEvent::submitted(claim(id)));
        }
        // Oldest events were overwritten; the newest ones remain
        assert_eq!(slow.try_recv().map(|e| e.claim_id()), Some(ClaimId::new(4)));
        assert_eq!(slow.try_recv().map(|e| e.claim_id()), Some(ClaimId::new(5)));
        assert!(slow.try_recv().is_none());
    }
}
