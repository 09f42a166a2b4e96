//! Single-threaded listener registry.
//!
//! A [`ListenerSet`] owns zero-argument callbacks and hands out a
//! [`Subscription`] for each registration. Dropping the subscription removes
//! the callback, so a registration is released on every exit path of the
//! scope that owns it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Zero-argument notification callback.
pub type Listener = Rc<dyn Fn()>;

type ListenerId = u64;

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    entries: Vec<(ListenerId, Listener)>,
}

impl Registry {
    fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Detach the entries matching `matches` and hand them back.
    ///
    /// The result must outlive the registry borrow: dropping a listener can
    /// drop subscriptions to this same set.
    fn take_where(&mut self, matches: impl Fn(ListenerId, &Listener) -> bool) -> Vec<Listener> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(id, listener)| matches(*id, listener));
        self.entries = kept;
        removed.into_iter().map(|(_, listener)| listener).collect()
    }
}

/// Set of listeners notified together by [`ListenerSet::emit`].
///
/// Cloning yields another handle to the same set.
#[derive(Clone, Default)]
pub struct ListenerSet {
    registry: Rc<RefCell<Registry>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return the handle that removes it again.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, listener));
        tracing::trace!(id, listeners = registry.entries.len(), "listener added");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Remove every registration of this exact callback.
    ///
    /// Returns `false` when the callback was not registered. Removing twice
    /// is not an error.
    pub fn remove(&self, listener: &Listener) -> bool {
        let removed = self
            .registry
            .borrow_mut()
            .take_where(|_, entry| Rc::ptr_eq(entry, listener));
        !removed.is_empty()
    }

    /// Invoke every registered listener.
    ///
    /// Listeners run against a snapshot taken before the first call, so they
    /// may subscribe or unsubscribe while the emission is in progress. A
    /// listener removed by an earlier one is skipped.
    pub fn emit(&self) {
        let snapshot: Vec<(ListenerId, Listener)> = self.registry.borrow().entries.clone();

        for (id, listener) in snapshot {
            if self.registry.borrow().contains(id) {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ownership of one registration in a [`ListenerSet`].
///
/// The registration is removed by [`Subscription::unsubscribe`] or on drop,
/// whichever comes first. A subscription that outlives its set does nothing.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the registration now. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        let registry = std::mem::take(&mut self.registry);
        if let Some(registry) = registry.upgrade() {
            let id = self.id;
            let removed = registry.borrow_mut().take_where(|entry_id, _| entry_id == id);
            if !removed.is_empty() {
                tracing::trace!(id, "listener removed");
            }
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map_or(false, |registry| registry.borrow().contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
