#![forbid(unsafe_code)]

//! Property with pluggable accessors and change notification.
//!
//! # Design
//!
//! [`ObservableProperty<T>`] owns a backing value, a [`Getter`], a [`Setter`]
//! and an ordered observer registry. Reads return `getter(storage)`. Writes
//! hand the new value, a mutable reference to storage and a [`Notifier`] to
//! the setter, which decides whether storage changes and whether observers
//! hear about it.
//!
//! Notification is never derived from a diff of old and new storage. It fires
//! when one of these runs:
//!
//! - the default setter, after every write (no equality short-circuit),
//! - a custom setter that calls its notifier,
//! - [`notify_observers`](ObservableProperty::notify_observers), called by
//!   whoever owns the property.
//!
//! # Invariants
//!
//! 1. Accessors are fixed at construction. Swapping them means building a new
//!    property and assigning it over the old one.
//! 2. A read-only property rejects every `set` with [`ReadOnlySetError`]
//!    before storage or observers are touched.
//! 3. Every live observer registered when a pass begins runs exactly once per
//!    pass, synchronously, in registration order.
//! 4. The default setter and `notify_observers` deliver `getter(storage)`.
//!
//! # Failure Modes
//!
//! - **Panicking getter, setter or observer**: unwinds to the caller of
//!   `get`/`set`/`notify_observers`. Observers after a panicking one are
//!   skipped for that pass.
//! - **Bound owner already borrowed**: bound accessors borrow the owner's
//!   `RefCell` and panic on conflict.
//! - **Re-entrant `set` from a custom setter**: storage is mutably borrowed
//!   while the setter runs, so calling back into the same property panics.
//!
//! Observers run after every internal borrow is released. An observer may
//! call `get`, `set` or `observe` on the property that is notifying it;
//! a nested `set` starts its own pass before the outer one continues, and an
//! observer added mid-pass is first called on the next pass. Values queued by
//! a custom setter's [`Notifier`] are delivered once the setter returns.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::accessor::{Getter, Notifier, NotifyPolicy, Setter};
use crate::error::ReadOnlySetError;
use crate::registry::{ObserverId, ObserverRegistry, Subscription};

/// A value cell with pluggable read/write strategy and observer fan-out.
///
/// The cell is single-threaded (`!Send`). Every operation takes `&self`, so it
/// can be shared through a plain `Rc` and read back from its own observers.
pub struct ObservableProperty<T> {
    value: RefCell<T>,
    getter: Getter<T>,
    setter: Setter<T>,
    observers: RefCell<ObserverRegistry<T>>,
}

impl<T: Default + Clone + 'static> Default for ObservableProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> From<T> for ObservableProperty<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T: Clone + std::fmt::Debug + 'static> std::fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("value", &self.get())
            .field("read_only", &self.is_read_only())
            .field("observer_count", &self.observer_count())
            .finish()
    }
}

impl<T: Clone + 'static> ObservableProperty<T> {
    /// Identity getter and overwrite setter over default-initialized storage.
    #[must_use]
    pub fn new() -> Self
    where
        T: Default,
    {
        Self::with_value(T::default())
    }

    /// Identity getter and overwrite setter over `value`.
    #[must_use]
    pub fn with_value(value: T) -> Self {
        Self::assemble(value, Getter::Identity, Setter::Overwrite)
    }

    /// Property from explicit strategies over default-initialized storage.
    #[must_use]
    pub fn from_parts(getter: Getter<T>, setter: Setter<T>) -> Self
    where
        T: Default,
    {
        Self::assemble(T::default(), getter, setter)
    }

    /// Fully custom getter and setter.
    ///
    /// The setter receives a [`Notifier`]; observers run only if it is used.
    pub fn of(
        getter: impl Fn(&T) -> T + 'static,
        setter: impl Fn(T, &mut T, &Notifier<'_, T>) + 'static,
    ) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::new(getter), Setter::new(setter))
    }

    /// Proxy over an owner's accessor methods. Own storage is never used.
    ///
    /// `policy` decides whether a `set` notifies by itself
    /// ([`NotifyPolicy::OnSet`]) or leaves it to the owner
    /// ([`NotifyPolicy::Owner`]).
    pub fn bound<C: 'static>(
        owner: &Rc<RefCell<C>>,
        read: impl Fn(&C) -> T + 'static,
        write: impl Fn(&mut C, T) + 'static,
        policy: NotifyPolicy,
    ) -> Self
    where
        T: Default,
    {
        Self::from_parts(
            Getter::bound(owner, read),
            Setter::bound(owner, write, policy),
        )
    }

    /// Read-only property with a custom getter.
    pub fn read_only(getter: impl Fn(&T) -> T + 'static) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::new(getter), Setter::ReadOnly)
    }

    /// Read-only proxy over an owner's getter method.
    pub fn read_only_bound<C: 'static>(
        owner: &Rc<RefCell<C>>,
        read: impl Fn(&C) -> T + 'static,
    ) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::bound(owner, read), Setter::ReadOnly)
    }

    /// Read-only property that always yields `value`.
    #[must_use]
    pub fn read_only_constant(value: T) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::constant(value), Setter::ReadOnly)
    }

    /// Read-only property backed by a zero-argument function, evaluated on
    /// every read.
    pub fn read_only_fn(f: impl Fn() -> T + 'static) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::from_fn(f), Setter::ReadOnly)
    }

    fn assemble(value: T, getter: Getter<T>, setter: Setter<T>) -> Self {
        Self {
            value: RefCell::new(value),
            getter,
            setter,
            observers: RefCell::new(ObserverRegistry::default()),
        }
    }

    /// The externally visible value, `getter(storage)`.
    #[must_use]
    pub fn get(&self) -> T {
        self.getter.read(&self.value.borrow())
    }

    /// Route `value` through the setter.
    ///
    /// # Errors
    ///
    /// Returns [`ReadOnlySetError`] if the property is read-only. Storage and
    /// observers are untouched in that case.
    pub fn set(&self, value: T) -> Result<(), ReadOnlySetError> {
        match &self.setter {
            Setter::ReadOnly => return Err(ReadOnlySetError),
            Setter::Overwrite => {
                *self.value.borrow_mut() = value;
                self.notify_observers();
            }
            Setter::Custom(setter) => {
                let notifier = Notifier::new(&self.getter, &self.observers);
                setter(value, &mut *self.value.borrow_mut(), &notifier);
                for queued in notifier.into_pending() {
                    self.fan_out(&queued);
                }
            }
        }
        Ok(())
    }

    /// Whether every `set` fails.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.setter.is_read_only()
    }

    /// Append an observer. It stays registered until [`unobserve`](Self::unobserve).
    pub fn observe(&self, observer: impl Fn(&T) + 'static) -> ObserverId {
        self.observers.borrow_mut().insert(observer)
    }

    /// Append an observer that lives as long as the returned guard.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.observers.borrow_mut().insert_guarded(observer)
    }

    /// Remove one registration. Returns `false` if `id` is not registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        self.observers.borrow_mut().remove(id)
    }

    /// Drop every registration.
    pub fn clear_observers(&self) {
        self.observers.borrow_mut().clear();
    }

    /// Number of live registrations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Compute `get()` once and hand it to every observer.
    ///
    /// Works on read-only properties too, so derived values can broadcast
    /// upstream changes. With no observers the getter is not evaluated.
    pub fn notify_observers(&self) {
        if self.observers.borrow().is_empty() {
            return;
        }
        let value = self.get();
        self.fan_out(&value);
    }

    /// Deliver `value` to a snapshot of the live observers.
    fn fan_out(&self, value: &T) {
        let callbacks = self.observers.borrow().snapshot();
        trace!(observers = callbacks.len(), "notifying observers");
        for callback in callbacks {
            callback(value);
        }
    }
}
