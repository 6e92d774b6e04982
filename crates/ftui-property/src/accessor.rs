#![forbid(unsafe_code)]

//! Read and write strategies shared by every property flavor.
//!
//! A property never reads or writes its storage directly. Reads go through a
//! [`Getter`], writes through a [`Setter`]. The stock strategies are plain
//! enum variants (no shared mutable state); everything else is a closure.
//!
//! # Bound accessors
//!
//! A *bound* accessor delegates to an owner object instead of the property's
//! own storage. The owner lives in an `Rc<RefCell<C>>`; the accessor keeps a
//! clone of that `Rc` and borrows it only for the duration of the call. The
//! property's storage is never touched by a bound accessor.
//!
//! Bound setters need to know who announces the change. [`NotifyPolicy`]
//! makes that an explicit choice per property:
//!
//! | Policy   | Who notifies                                          |
//! |----------|-------------------------------------------------------|
//! | `OnSet`  | the setter, once the owner's write has returned       |
//! | `Owner`  | the owner, by calling `notify_observers()` itself     |

use std::cell::RefCell;
use std::rc::Rc;

use crate::registry::ObserverRegistry;

type GetFn<T> = Rc<dyn Fn(&T) -> T>;
type SetFn<T> = Rc<dyn Fn(T, &mut T, &Notifier<'_, T>)>;

/// Computes the externally visible value from backing storage.
pub enum Getter<T> {
    /// Return a clone of the stored value.
    Identity,
    /// Call the function with the stored value.
    Custom(GetFn<T>),
}

impl<T> Clone for Getter<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Custom(f) => Self::Custom(Rc::clone(f)),
        }
    }
}

impl<T> Default for Getter<T> {
    fn default() -> Self {
        Self::Identity
    }
}

impl<T> std::fmt::Debug for Getter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => f.write_str("Getter::Identity"),
            Self::Custom(_) => f.write_str("Getter::Custom(..)"),
        }
    }
}

impl<T: 'static> Getter<T> {
    /// The identity getter.
    #[must_use]
    pub const fn identity() -> Self {
        Self::Identity
    }

    /// Getter from a function of the stored value.
    pub fn new(f: impl Fn(&T) -> T + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    /// Getter that always yields a clone of `value`, whatever storage holds.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |_| value.clone())
    }

    /// Getter backed by a zero-argument function, re-evaluated on every read.
    pub fn from_fn(f: impl Fn() -> T + 'static) -> Self {
        Self::new(move |_| f())
    }

    /// Getter that reads through `owner`. Storage is ignored.
    ///
    /// # Panics
    ///
    /// Reading panics if `owner` is mutably borrowed at the time.
    pub fn bound<C: 'static>(owner: &Rc<RefCell<C>>, read: impl Fn(&C) -> T + 'static) -> Self {
        let owner = Rc::clone(owner);
        Self::new(move |_| read(&*owner.borrow()))
    }
}

impl<T: Clone> Getter<T> {
    /// Evaluate against `storage`.
    pub(crate) fn read(&self, storage: &T) -> T {
        match self {
            Self::Identity => storage.clone(),
            Self::Custom(f) => f(storage),
        }
    }
}

/// Who triggers notification after a bound setter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotifyPolicy {
    /// The setter notifies with the getter's view after every write,
    /// changed or not.
    #[default]
    OnSet,
    /// The setter stays silent. The owner calls `notify_observers()` from its
    /// own change signal, which lets it skip unchanged writes.
    Owner,
}

/// Decides whether and how a write reaches storage.
pub enum Setter<T> {
    /// Overwrite storage, then notify with the getter's view.
    Overwrite,
    /// Reject every write with [`ReadOnlySetError`](crate::ReadOnlySetError).
    ReadOnly,
    /// Call the function with the new value, storage, and a [`Notifier`].
    /// Notification happens only if the function asks for it.
    Custom(SetFn<T>),
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Overwrite => Self::Overwrite,
            Self::ReadOnly => Self::ReadOnly,
            Self::Custom(f) => Self::Custom(Rc::clone(f)),
        }
    }
}

impl<T> Default for Setter<T> {
    fn default() -> Self {
        Self::Overwrite
    }
}

impl<T> std::fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => f.write_str("Setter::Overwrite"),
            Self::ReadOnly => f.write_str("Setter::ReadOnly"),
            Self::Custom(_) => f.write_str("Setter::Custom(..)"),
        }
    }
}

impl<T: 'static> Setter<T> {
    /// The overwrite-then-notify setter.
    #[must_use]
    pub const fn overwrite() -> Self {
        Self::Overwrite
    }

    /// The always-failing setter.
    #[must_use]
    pub const fn read_only() -> Self {
        Self::ReadOnly
    }

    /// Setter from a function that receives the notifier.
    pub fn new(f: impl Fn(T, &mut T, &Notifier<'_, T>) + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    /// Setter from a function that never notifies.
    pub fn plain(f: impl Fn(T, &mut T) + 'static) -> Self {
        Self::new(move |value, storage, _| f(value, storage))
    }

    /// Setter that writes through `owner`. Storage is ignored.
    ///
    /// With [`NotifyPolicy::OnSet`] observers receive the property's getter
    /// view once the owner has been released.
    ///
    /// # Panics
    ///
    /// Writing panics if `owner` is borrowed at the time.
    pub fn bound<C: 'static>(
        owner: &Rc<RefCell<C>>,
        write: impl Fn(&mut C, T) + 'static,
        policy: NotifyPolicy,
    ) -> Self
    where
        T: Clone,
    {
        let owner = Rc::clone(owner);
        Self::new(move |value, storage, notifier| {
            write(&mut *owner.borrow_mut(), value);
            if policy == NotifyPolicy::OnSet {
                notifier.notify_current(storage);
            }
        })
    }

    pub(crate) fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

/// Fan-out handle handed to custom setters.
///
/// Borrowed from the property for the duration of one `set` call. Calling
/// [`notify`](Self::notify) queues a notification with the given value.
/// Nothing forces it to match what the getter returns; setters that want that
/// guarantee use [`notify_current`](Self::notify_current).
///
/// Queued values are delivered in call order once the setter returns and the
/// property has released its storage, so observers may read the property
/// back.
pub struct Notifier<'a, T> {
    getter: &'a Getter<T>,
    observers: &'a RefCell<ObserverRegistry<T>>,
    pending: RefCell<Vec<T>>,
}

impl<'a, T> Notifier<'a, T> {
    pub(crate) fn new(getter: &'a Getter<T>, observers: &'a RefCell<ObserverRegistry<T>>) -> Self {
        Self {
            getter,
            observers,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Number of observers a notification would reach.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Values queued so far, in call order.
    pub(crate) fn into_pending(self) -> Vec<T> {
        self.pending.into_inner()
    }
}

impl<T: Clone> Notifier<'_, T> {
    /// Queue a notification of every observer with `value`.
    pub fn notify(&self, value: &T) {
        self.pending.borrow_mut().push(value.clone());
    }

    /// Queue a notification with the getter's view of `storage`.
    ///
    /// The getter is not evaluated when nobody is listening.
    pub fn notify_current(&self, storage: &T) {
        if self.observers.borrow().is_empty() {
            return;
        }
        let value = self.getter.read(storage);
        self.notify(&value);
    }
}

impl<T> std::fmt::Debug for Notifier<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("getter", self.getter)
            .field("observer_count", &self.observer_count())
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}
