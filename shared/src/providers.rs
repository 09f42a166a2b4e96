//! Registry of the process-wide provider.
//!
//! The app creates one [`Providers`] at startup and hands it to the UI by
//! context. Listeners registered with [`Providers::on_provider_updated`] fire
//! when the global provider is replaced and whenever the current one changes
//! state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::listeners::{Listener, ListenerSet, Subscription};
use crate::observable::Observable;
use crate::provider::Provider;

#[derive(Default)]
pub struct Providers {
    global: RefCell<Option<Rc<dyn Provider>>>,
    forwarding: RefCell<Option<Subscription>>,
    updated: ListenerSet,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global_provider(&self) -> Option<Rc<dyn Provider>> {
        self.global.borrow().clone()
    }

    /// Replace the global provider and notify listeners.
    ///
    /// State changes of the previous provider are no longer forwarded.
    pub fn set_global_provider(&self, provider: Option<Rc<dyn Provider>>) {
        let forwarding = provider.as_ref().map(|provider| {
            let updated = self.updated.clone();
            provider.on_state_changed(Rc::new(move || updated.emit()))
        });

        match &provider {
            Some(provider) => tracing::debug!(
                provider = provider.name(),
                state = %provider.state(),
                "global provider set"
            ),
            None => tracing::debug!("global provider cleared"),
        }

        let previous = self.global.replace(provider);
        let previous_forwarding = self.forwarding.replace(forwarding);
        drop(previous_forwarding);
        drop(previous);

        self.updated.emit();
    }

    pub fn on_provider_updated(&self, listener: Listener) -> Subscription {
        self.updated.subscribe(listener)
    }

    /// Remove a listener by identity. Removing an unknown listener is a no-op.
    pub fn remove_provider_updated_listener(&self, listener: &Listener) -> bool {
        self.updated.remove(listener)
    }

    /// Fire the updated notification without changing anything.
    pub fn notify_updated(&self) {
        self.updated.emit();
    }

    pub fn listener_count(&self) -> usize {
        self.updated.len()
    }
}

impl Observable for Providers {
    type State = Option<Rc<dyn Provider>>;

    fn current(&self) -> Self::State {
        self.global_provider()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.on_provider_updated(listener)
    }
}
