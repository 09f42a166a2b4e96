//! Push-to-pull adapter.
//!
//! An [`Observable`] exposes a synchronously readable value and a change
//! notification. [`bridge`] turns that into a stream of derived values handed
//! to a `publish` callback, which is how UI state gets driven from an
//! external notification source.

use std::rc::Rc;

use crate::listeners::{Listener, Subscription};

pub trait Observable {
    type State;

    /// Read the current value.
    fn current(&self) -> Self::State;

    /// Register a callback fired after the value changes.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Publish `derive(source.current())` now and after every notification.
///
/// The listener is registered before the first value is computed, and that
/// first value is published before this function returns. Only a weak
/// reference to `source` is kept; once it is gone notifications stop.
/// Dropping the returned subscription stops publication.
pub fn bridge<O, T, D, P>(source: &Rc<O>, derive: D, publish: P) -> Subscription
where
    O: Observable + 'static,
    D: Fn(&O::State) -> T + 'static,
    P: Fn(T) + 'static,
{
    let weak = Rc::downgrade(source);
    let update: Listener = Rc::new(move || {
        if let Some(source) = weak.upgrade() {
            publish(derive(&source.current()));
        }
    });

    let subscription = source.subscribe(update.clone());
    update();
    subscription
}
