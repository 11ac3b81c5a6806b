//! Multiplexer for awaiting the next qualifying gateway event.
//!
//! Any number of menu flows register "wake me for the next event matching
//! this predicate, within this timeout" and the host bot feeds every
//! inbound event through [`EventWaiter::dispatch`]. Each registration
//! resolves exactly once: with the first matching event, or with a timeout
//! marker.
//!
//! The waiter is an explicitly constructed component. Build one per process
//! (or per test) and hand clones to whoever needs it.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, oneshot};
use tracing::{debug, warn};

use crate::event::{EventKind, MenuEvent};

type Predicate = Box<dyn Fn(&MenuEvent) -> bool + Send + Sync>;

struct PendingAwait {
    id: u64,
    predicate: Predicate,
    resolver: oneshot::Sender<MenuEvent>,
}

/// Identifies one pending await so it can be cancelled before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwaitHandle {
    kind: EventKind,
    id: u64,
}

/// Resolution of a registered await.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The first event that satisfied the predicate within the window.
    Event(MenuEvent),
    /// The window elapsed with no qualifying event. Cancelled and
    /// shut-down awaits resolve this way too.
    TimedOut,
}

#[derive(Default)]
struct WaiterInner {
    next_id: AtomicU64,
    buckets: Mutex<HashMap<EventKind, Vec<PendingAwait>>>,
}

/// Shared event multiplexer.
///
/// Cheap to clone; all clones share the same pending-await bookkeeping.
#[derive(Clone, Default)]
pub struct EventWaiter {
    inner: Arc<WaiterInner>,
}

/// A registered await, not yet resolved.
///
/// Await it with [`PendingWait::wait`], or grab its [`AwaitHandle`] first
/// when an enclosing flow may need to abandon it.
pub struct PendingWait {
    waiter: EventWaiter,
    handle: AwaitHandle,
    timeout: Duration,
    receiver: oneshot::Receiver<MenuEvent>,
}

impl PendingWait {
    /// Handle for cancelling this await from elsewhere.
    pub fn handle(&self) -> AwaitHandle {
        self.handle
    }

    /// Suspend until the await resolves.
    ///
    /// A timeout removes the registration from the waiter's bookkeeping
    /// before returning.
    pub async fn wait(self) -> WaitOutcome {
        match tokio::time::timeout(self.timeout, self.receiver).await {
            Ok(Ok(event)) => WaitOutcome::Event(event),
            // Sender dropped: cancelled or waiter shut down.
            Ok(Err(_)) => WaitOutcome::TimedOut,
            Err(_) => {
                self.waiter.cancel(&self.handle).await;
                WaitOutcome::TimedOut
            }
        }
    }
}

impl EventWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an await for the next `kind` event satisfying `predicate`.
    ///
    /// Awaits for the same kind are evaluated in registration order; the
    /// first whose predicate accepts an event consumes it.
    pub async fn register<P>(&self, kind: EventKind, predicate: P, timeout: Duration) -> PendingWait
    where
        P: Fn(&MenuEvent) -> bool + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (resolver, receiver) = oneshot::channel();

        let mut buckets = self.inner.buckets.lock().await;
        buckets.entry(kind).or_default().push(PendingAwait {
            id,
            predicate: Box::new(predicate),
            resolver,
        });

        PendingWait {
            waiter: self.clone(),
            handle: AwaitHandle { kind, id },
            timeout,
            receiver,
        }
    }

    /// Remove a pending await before it resolves.
    ///
    /// No-op if the await already resolved or was never registered.
    pub async fn cancel(&self, handle: &AwaitHandle) {
        let mut buckets = self.inner.buckets.lock().await;
        if let Some(bucket) = buckets.get_mut(&handle.kind) {
            bucket.retain(|pending| pending.id != handle.id);
        }
    }

    /// Offer an inbound event to pending awaits of its kind.
    ///
    /// Returns whether an await consumed it. A panicking predicate is
    /// logged and treated as non-matching; it cannot stall other awaits.
    pub async fn dispatch(&self, event: MenuEvent) -> bool {
        let kind = event.kind();
        let mut buckets = self.inner.buckets.lock().await;
        let Some(bucket) = buckets.get_mut(&kind) else {
            return false;
        };

        let mut event = event;
        let mut index = 0;
        while index < bucket.len() {
            let pending = &bucket[index];
            let matched = catch_unwind(AssertUnwindSafe(|| (pending.predicate)(&event)))
                .unwrap_or_else(|_| {
                    warn!(
                        await_id = pending.id,
                        ?kind,
                        "await predicate panicked, treating as non-matching"
                    );
                    false
                });

            if !matched {
                index += 1;
                continue;
            }

            let pending = bucket.remove(index);
            match pending.resolver.send(event) {
                Ok(()) => return true,
                // Receiver already gave up (timed out or dropped); the
                // event is still up for grabs by later awaits.
                Err(returned) => {
                    debug!(await_id = pending.id, "await receiver gone, skipping");
                    event = returned;
                }
            }
        }

        false
    }

    /// Number of pending awaits for an event kind.
    pub async fn pending_count(&self, kind: EventKind) -> usize {
        let buckets = self.inner.buckets.lock().await;
        buckets.get(&kind).map_or(0, Vec::len)
    }

    /// Drop every pending await.
    ///
    /// Outstanding `wait()` calls resolve as [`WaitOutcome::TimedOut`], so
    /// menus run their terminal actions and stop. Call on process shutdown
    /// before closing the platform connection.
    pub async fn shutdown(&self) {
        let mut buckets = self.inner.buckets.lock().await;
        buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use twilight_model::id::Id;

    use super::*;
    use crate::event::{Actor, ReactionEvent};

    fn reaction(user: u64, message: u64, emoji: &str) -> MenuEvent {
        MenuEvent::Reaction(ReactionEvent {
            actor: Actor::user(Id::new(user)),
            channel_id: Id::new(10),
            message_id: Id::new(message),
            emoji: emoji.to_owned(),
        })
    }

    #[tokio::test]
    async fn first_registered_matching_await_consumes_the_event() {
        let waiter = EventWaiter::new();
        let first = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;
        let second = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_millis(100))
            .await;

        assert!(waiter.dispatch(reaction(1, 2, "▶")).await);

        assert_eq!(
            first.wait().await,
            WaitOutcome::Event(reaction(1, 2, "▶"))
        );
        // The same event must not resolve the second await.
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 1);
        assert_eq!(second.wait().await, WaitOutcome::TimedOut);
    }

    #[tokio::test]
    async fn non_matching_event_is_not_consumed() {
        let waiter = EventWaiter::new();
        let pending = waiter
            .register(
                EventKind::ReactionAdd,
                |event| event.message_id() == Id::new(42),
                Duration::from_secs(5),
            )
            .await;

        assert!(!waiter.dispatch(reaction(1, 7, "▶")).await);
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 1);

        assert!(waiter.dispatch(reaction(1, 42, "▶")).await);
        assert!(matches!(pending.wait().await, WaitOutcome::Event(_)));
    }

    #[tokio::test]
    async fn timeout_resolves_after_the_configured_window() {
        let waiter = EventWaiter::new();
        let window = Duration::from_millis(50);
        let pending = waiter
            .register(EventKind::ReactionAdd, |_| true, window)
            .await;

        let started = Instant::now();
        assert_eq!(pending.wait().await, WaitOutcome::TimedOut);
        let elapsed = started.elapsed();

        assert!(elapsed >= window, "resolved early: {elapsed:?}");
        assert!(elapsed < window + Duration::from_millis(200));
        // Timed-out awaits are removed from the bookkeeping.
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 0);
    }

    #[tokio::test]
    async fn cancelled_await_resolves_as_timed_out() {
        let waiter = EventWaiter::new();
        let pending = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;
        let handle = pending.handle();

        waiter.cancel(&handle).await;
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 0);
        assert_eq!(pending.wait().await, WaitOutcome::TimedOut);
    }

    #[tokio::test]
    async fn panicking_predicate_does_not_stall_other_awaits() {
        let waiter = EventWaiter::new();
        let broken = waiter
            .register(
                EventKind::ReactionAdd,
                |_| -> bool { panic!("bad predicate") },
                Duration::from_millis(50),
            )
            .await;
        let healthy = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;

        assert!(waiter.dispatch(reaction(1, 2, "▶")).await);
        assert!(matches!(healthy.wait().await, WaitOutcome::Event(_)));
        assert_eq!(broken.wait().await, WaitOutcome::TimedOut);
    }

    #[tokio::test]
    async fn dispatch_skips_awaits_whose_receiver_gave_up() {
        let waiter = EventWaiter::new();
        let abandoned = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;
        let alive = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;

        // Simulate a dropped future without cancelling the registration.
        drop(abandoned.receiver);

        assert!(waiter.dispatch(reaction(1, 2, "▶")).await);
        assert!(matches!(alive.wait().await, WaitOutcome::Event(_)));
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 0);
    }

    #[tokio::test]
    async fn shutdown_resolves_everything_as_timed_out() {
        let waiter = EventWaiter::new();
        let first = waiter
            .register(EventKind::ReactionAdd, |_| true, Duration::from_secs(5))
            .await;
        let second = waiter
            .register(EventKind::MessageCreate, |_| true, Duration::from_secs(5))
            .await;

        waiter.shutdown().await;

        assert_eq!(first.wait().await, WaitOutcome::TimedOut);
        assert_eq!(second.wait().await, WaitOutcome::TimedOut);
        assert_eq!(waiter.pending_count(EventKind::ReactionAdd).await, 0);
        assert_eq!(waiter.pending_count(EventKind::MessageCreate).await, 0);
    }
}
