#![forbid(unsafe_code)]

//! Property cells for FrankenTUI widgets and models.
//!
//! # Role in FrankenTUI
//! `ftui-property` is a field-level primitive. A widget or model stores a
//! property per attribute and decides, at construction time, where the value
//! lives and who hears about changes. It has no scheduler, no dependency
//! graph and no batching; the runtime's reactive layer builds on other types.
//!
//! # Primary types
//! - [`Property`]: value cell with a pluggable [`Getter`] and [`Setter`].
//! - [`ObservableProperty`]: the same plus an ordered observer registry and a
//!   [`Notifier`] threaded through custom setters.
//! - [`ReadOnlySetError`]: the only error, returned by `set` on read-only
//!   properties.
//!
//! # Construction
//!
//! | Constructor           | Getter                    | Setter                 |
//! |-----------------------|---------------------------|------------------------|
//! | `new` / `default`     | identity over storage     | overwrite (+ notify)   |
//! | `of`                  | custom                    | custom                 |
//! | `bound`               | owner method              | owner method           |
//! | `read_only`           | custom                    | rejected               |
//! | `read_only_bound`     | owner method              | rejected               |
//! | `read_only_constant`  | fixed value               | rejected               |
//! | `read_only_fn`        | zero-argument function    | rejected               |
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ftui_property::{NotifyPolicy, ObservableProperty};
//!
//! struct Counter { value: i32 }
//!
//! let counter = Rc::new(RefCell::new(Counter { value: 0 }));
//! let prop = ObservableProperty::bound(
//!     &counter,
//!     |c: &Counter| c.value,
//!     |c: &mut Counter, v| c.value = v,
//!     NotifyPolicy::OnSet,
//! );
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! prop.observe(move |v| sink.borrow_mut().push(*v));
//!
//! prop.set(1).unwrap();
//! prop.set(1).unwrap();
//! prop.set(2).unwrap();
//! assert_eq!(*log.borrow(), vec![1, 1, 2]);
//! assert_eq!(counter.borrow().value, 2);
//! ```
//!
//! # Threading
//! Everything here is single-threaded and synchronous. Accessors and
//! observers are `Rc`-backed, so properties are neither `Send` nor `Sync`.
//! Every property operation takes `&self`, so a property can be shared
//! through a plain `Rc` and read back from its own observers.

pub mod accessor;
pub mod error;
pub mod observable;
pub mod property;
pub mod registry;

pub use accessor::{Getter, Notifier, NotifyPolicy, Setter};
pub use error::ReadOnlySetError;
pub use observable::ObservableProperty;
pub use property::Property;
pub use registry::{ObserverId, Subscription};
