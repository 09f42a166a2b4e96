//! Signed-in flag derived from the provider registry.

use std::rc::Rc;

use crate::listeners::Subscription;
use crate::observable::bridge;
use crate::provider::{Provider, ProviderState};
use crate::providers::Providers;

/// `true` iff a provider is present and signed in.
pub fn is_signed_in(provider: Option<&dyn Provider>) -> bool {
    provider.map_or(false, |provider| provider.state() == ProviderState::SignedIn)
}

/// Lifecycle state of the provider, `None` when there is none.
pub fn provider_state(provider: Option<&dyn Provider>) -> Option<ProviderState> {
    provider.map(|provider| provider.state())
}

/// Active subscription that republishes the signed-in flag.
///
/// [`SignInStateBridge::activate`] publishes the current flag before it
/// returns and again after every registry notification. Deactivating, or
/// dropping the bridge, removes the one listener it registered.
#[must_use = "dropping the bridge deactivates it"]
pub struct SignInStateBridge {
    subscription: Subscription,
}

impl SignInStateBridge {
    pub fn activate<P>(providers: &Rc<Providers>, publish: P) -> Self
    where
        P: Fn(bool) + 'static,
    {
        let subscription = bridge(
            providers,
            |provider: &Option<Rc<dyn Provider>>| is_signed_in(provider.as_deref()),
            publish,
        );
        Self { subscription }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_active()
    }

    pub fn deactivate(mut self) {
        self.subscription.unsubscribe();
    }
}

/// Publish the provider's lifecycle state now and on every registry update.
pub fn watch_provider_state<P>(providers: &Rc<Providers>, publish: P) -> Subscription
where
    P: Fn(Option<ProviderState>) + 'static,
{
    bridge(
        providers,
        |provider: &Option<Rc<dyn Provider>>| provider_state(provider.as_deref()),
        publish,
    )
}
