use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::listeners::{Listener, ListenerSet, Subscription};

/// Authentication lifecycle of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Loading,
    SignedOut,
    SignedIn,
}

impl ProviderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::SignedOut => "signed_out",
            Self::SignedIn => "signed_in",
        }
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session owner that the UI observes.
///
/// Implementations own token acquisition; the rest of the app only reads
/// `state()`, listens for changes and asks for a bearer token.
pub trait Provider {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn state(&self) -> ProviderState;

    /// Register a callback fired after `state()` changes.
    fn on_state_changed(&self, listener: Listener) -> Subscription;

    fn login(&self);

    fn logout(&self);

    /// Current bearer token for Graph, if signed in.
    fn access_token(&self) -> Option<String>;

    /// Mock providers serve canned data instead of calling Graph.
    fn is_mock(&self) -> bool {
        false
    }
}

/// State holder for provider implementations.
///
/// Notifies its listeners only when the stored state actually changes.
pub struct ProviderStateCell {
    state: Cell<ProviderState>,
    changed: ListenerSet,
}

impl ProviderStateCell {
    pub fn new(initial: ProviderState) -> Self {
        Self {
            state: Cell::new(initial),
            changed: ListenerSet::new(),
        }
    }

    pub fn get(&self) -> ProviderState {
        self.state.get()
    }

    /// Store `state`, returning whether it differed from the previous value.
    pub fn set(&self, state: ProviderState) -> bool {
        let previous = self.state.replace(state);
        if previous == state {
            return false;
        }

        tracing::debug!(from = %previous, to = %state, "provider state changed");
        self.changed.emit();
        true
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.changed.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.changed.len()
    }
}

impl Default for ProviderStateCell {
    fn default() -> Self {
        Self::new(ProviderState::Loading)
    }
}
