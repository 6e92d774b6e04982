#![forbid(unsafe_code)]

//! Property with pluggable accessors and no notification.
//!
//! [`Property<T>`] is an [`ObservableProperty<T>`] whose observer set is
//! never exposed and stays empty, so writes never fan out and the getter is
//! only evaluated by `get`. Use [`Property::into_observable`] to lift one into
//! the observable flavor without rebuilding its accessors.

use std::cell::RefCell;
use std::rc::Rc;

use crate::accessor::{Getter, NotifyPolicy, Setter};
use crate::error::ReadOnlySetError;
use crate::observable::ObservableProperty;

/// A value cell with pluggable read/write strategy.
pub struct Property<T> {
    inner: ObservableProperty<T>,
}

impl<T: Default + Clone + 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T> From<Property<T>> for ObservableProperty<T> {
    fn from(property: Property<T>) -> Self {
        property.inner
    }
}

impl<T: Clone + std::fmt::Debug + 'static> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

impl<T: Clone + 'static> Property<T> {
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
        Self {
            inner: ObservableProperty::with_value(value),
        }
    }

    /// Property from explicit strategies over default-initialized storage.
    ///
    /// A custom setter still receives a notifier; it reaches nobody.
    #[must_use]
    pub fn from_parts(getter: Getter<T>, setter: Setter<T>) -> Self
    where
        T: Default,
    {
        Self {
            inner: ObservableProperty::from_parts(getter, setter),
        }
    }

    /// Fully custom getter and setter.
    pub fn of(getter: impl Fn(&T) -> T + 'static, setter: impl Fn(T, &mut T) + 'static) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::new(getter), Setter::plain(setter))
    }

    /// Proxy over an owner's accessor methods. Own storage is never used.
    pub fn bound<C: 'static>(
        owner: &Rc<RefCell<C>>,
        read: impl Fn(&C) -> T + 'static,
        write: impl Fn(&mut C, T) + 'static,
    ) -> Self
    where
        T: Default,
    {
        Self::from_parts(
            Getter::bound(owner, read),
            Setter::bound(owner, write, NotifyPolicy::Owner),
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

    /// Read-only property backed by a zero-argument function.
    pub fn read_only_fn(f: impl Fn() -> T + 'static) -> Self
    where
        T: Default,
    {
        Self::from_parts(Getter::from_fn(f), Setter::ReadOnly)
    }

    /// The externally visible value, `getter(storage)`.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Route `value` through the setter.
    ///
    /// # Errors
    ///
    /// Returns [`ReadOnlySetError`] if the property is read-only.
    pub fn set(&self, value: T) -> Result<(), ReadOnlySetError> {
        self.inner.set(value)
    }

    /// Whether every `set` fails.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    /// Keep accessors and storage, gain an observer registry.
    #[must_use]
    pub fn into_observable(self) -> ObservableProperty<T> {
        self.inner
    }
}
