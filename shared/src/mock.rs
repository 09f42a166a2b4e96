use crate::listeners::{Listener, Subscription};
use crate::provider::{Provider, ProviderState, ProviderStateCell};

const MOCK_TOKEN: &str = "mock-access-token";

/// Provider that signs in locally without contacting an identity service.
///
/// Used for demos (`AGENDA_PROVIDER=mock`) and tests. The agenda renders
/// canned events when the global provider is a mock.
pub struct MockProvider {
    state: ProviderStateCell,
}

impl MockProvider {
    /// A mock in the `Loading` state.
    pub fn new() -> Self {
        Self {
            state: ProviderStateCell::new(ProviderState::Loading),
        }
    }

    /// A mock that is already signed in.
    pub fn signed_in() -> Self {
        Self {
            state: ProviderStateCell::new(ProviderState::SignedIn),
        }
    }

    pub fn set_state(&self, state: ProviderState) {
        self.state.set(state);
    }

    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn state(&self) -> ProviderState {
        self.state.get()
    }

    fn on_state_changed(&self, listener: Listener) -> Subscription {
        self.state.subscribe(listener)
    }

    fn login(&self) {
        self.state.set(ProviderState::SignedIn);
    }

    fn logout(&self) {
        self.state.set(ProviderState::SignedOut);
    }

    fn access_token(&self) -> Option<String> {
        (self.state.get() == ProviderState::SignedIn).then(|| MOCK_TOKEN.to_string())
    }

    fn is_mock(&self) -> bool {
        true
    }
}
