//! Output callbacks.
//!
//! The tab container reports to its host through signals: the selection
//! changed, a transition started or settled, an interactive swipe began or
//! finished. Slots are plain closures, called synchronously on the emitting
//! thread in the order they were connected.
//!
//! ```
//! use swipetab_core::Signal;
//!
//! let current_changed = Signal::<usize>::new();
//! let id = current_changed.connect(|index| println!("now on tab {index}"));
//!
//! current_changed.emit(2);
//! assert!(current_changed.disconnect(id));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{CoreError, CoreResult};
use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, for [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Connection<Args> {
    /// Connection order; slot keys are reused and do not reflect it.
    seq: u64,
    slot: Slot<Args>,
}

struct Connections<Args> {
    slots: SlotMap<ConnectionId, Connection<Args>>,
    next_seq: u64,
}

/// A typed notification with any number of connected slots.
///
/// Use `Signal<()>` for notifications without a payload.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.connections.lock().slots.len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                next_seq: 0,
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect `slot`; it runs after every slot connected before it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let seq = connections.next_seq;
        connections.next_seq += 1;
        connections.slots.insert(Connection {
            seq,
            slot: Arc::new(slot),
        })
    }

    /// Returns `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().slots.remove(id).is_some()
    }

    /// Like [`disconnect`](Self::disconnect), with unknown ids as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> CoreResult<()> {
        self.disconnect(id)
            .then_some(())
            .ok_or(CoreError::InvalidConnection)
    }

    pub fn disconnect_all(&self) {
        self.connections.lock().slots.clear();
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// While blocked, [`emit`](Self::emit) drops its argument.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Block until the returned guard is dropped, then restore the previous
    /// blocked state.
    pub fn block(&self) -> SignalBlocker<'_, Args> {
        let was_blocked = self.blocked.swap(true, Ordering::SeqCst);
        SignalBlocker {
            signal: self,
            was_blocked,
        }
    }

    /// Call every connected slot with `args`.
    ///
    /// The connection table is not locked while slots run, so a slot may
    /// connect or disconnect slots of the same signal. Such changes apply
    /// from the next emission.
    #[tracing::instrument(skip_all, target = "swipetab_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "blocked, dropping emission");
            return;
        }

        let mut pending: Vec<(u64, Slot<Args>)> = self
            .connections
            .lock()
            .slots
            .values()
            .map(|connection| (connection.seq, connection.slot.clone()))
            .collect();
        pending.sort_unstable_by_key(|(seq, _)| *seq);
        tracing::trace!(target: targets::SIGNAL, slots = pending.len(), "emit");

        for (_, slot) in pending {
            slot(&args);
        }
    }
}

/// Scoped block returned by [`Signal::block`].
#[must_use = "the signal is unblocked as soon as the blocker is dropped"]
pub struct SignalBlocker<'a, Args> {
    signal: &'a Signal<Args>,
    was_blocked: bool,
}

impl<Args> Drop for SignalBlocker<'_, Args> {
    fn drop(&mut self) {
        self.signal.blocked.store(self.was_blocked, Ordering::SeqCst);
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);
