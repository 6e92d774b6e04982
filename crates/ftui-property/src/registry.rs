#![forbid(unsafe_code)]

//! Ordered observer registry with explicit and RAII removal.
//!
//! # Design
//!
//! Observers are stored in registration order. Each registration receives a
//! fresh [`ObserverId`]; ids are never reused within one registry.
//!
//! Two registration flavors share the same list:
//!
//! - **Held**: the registry owns the callback. It stays registered until
//!   [`ObserverRegistry::remove`] is called with its id.
//! - **Guarded**: the registry keeps a `Weak` reference and the caller keeps
//!   the strong one inside a [`Subscription`]. Dropping the guard stops
//!   delivery immediately; the dead entry is pruned on the next mutation.
//!
//! # Failure Modes
//!
//! - **Panicking observer**: the panic unwinds out of the fan-out. Observers
//!   registered after the failing one are not invoked for that pass.
//! - **Registry mutation during fan-out**: a pass runs over a
//!   [`snapshot`](ObserverRegistry::snapshot) taken before the first callback,
//!   so observers registered mid-pass are first called on the next pass.
//!   Observers removed mid-pass still receive the value already in flight.

use std::rc::{Rc, Weak};

use tracing::trace;

pub(crate) type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Identifies one observer registration on a property.
///
/// Returned by `observe`; pass it back to `unobserve` to remove the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Raw registration sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

enum Slot<T> {
    Held(CallbackRc<T>),
    Guarded(CallbackWeak<T>),
}

struct Entry<T> {
    id: ObserverId,
    slot: Slot<T>,
}

impl<T> Entry<T> {
    fn is_live(&self) -> bool {
        match &self.slot {
            Slot::Held(_) => true,
            Slot::Guarded(weak) => weak.strong_count() > 0,
        }
    }
}

/// Append-ordered list of observer callbacks.
pub(crate) struct ObserverRegistry<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: 'static> ObserverRegistry<T> {
    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a callback owned by the registry.
    pub(crate) fn insert(&mut self, callback: impl Fn(&T) + 'static) -> ObserverId {
        self.prune();
        let id = self.next_id();
        self.entries.push(Entry {
            id,
            slot: Slot::Held(Rc::new(callback)),
        });
        trace!(observer = id.0, live = self.entries.len(), "observer registered");
        id
    }

    /// Register a callback kept alive by the returned guard.
    pub(crate) fn insert_guarded(&mut self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.prune();
        let id = self.next_id();
        let strong: CallbackRc<T> = Rc::new(callback);
        self.entries.push(Entry {
            id,
            slot: Slot::Guarded(Rc::downgrade(&strong)),
        });
        trace!(observer = id.0, live = self.entries.len(), "guarded observer registered");
        Subscription {
            id,
            _guard: Box::new(strong),
        }
    }

    /// Remove the registration with `id`. Returns `false` if it is unknown.
    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        trace!(observer = id.0, removed, "observer removed");
        self.prune();
        removed
    }

    pub(crate) fn clear(&mut self) {
        trace!(dropped = self.entries.len(), "observers cleared");
        self.entries.clear();
    }
}

impl<T> ObserverRegistry<T> {
    /// Drop guarded entries whose `Subscription` is gone.
    fn prune(&mut self) {
        self.entries.retain(Entry::is_live);
    }

    /// Number of registrations that would receive the next fan-out.
    pub(crate) fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_live()).count()
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.entries.iter().any(Entry::is_live)
    }

    /// Strong handles to every live observer, in registration order.
    ///
    /// Callers invoke the snapshot after releasing any borrow of the registry,
    /// so callbacks are free to re-enter the owning property.
    pub(crate) fn snapshot(&self) -> Vec<CallbackRc<T>> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.slot {
                Slot::Held(callback) => Some(Rc::clone(callback)),
                Slot::Guarded(weak) => weak.upgrade(),
            })
            .collect()
    }
}

/// RAII guard for an observer registered with `subscribe`.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// callback, so it is skipped by every later notification.
#[must_use = "dropping a Subscription unregisters its observer"]
pub struct Subscription {
    id: ObserverId,
    /// Type-erased `Rc<dyn Fn(&T)>` keeping the callback alive.
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Id of the underlying registration.
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Stop receiving notifications. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
