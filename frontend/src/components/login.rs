use shared::ProviderState;
use yew::prelude::*;

use crate::hooks::{use_providers, use_provider_state};

/// Sign-in / sign-out button for the global provider.
#[function_component(Login)]
pub fn login() -> Html {
    let context = use_providers();
    let state = use_provider_state();

    let onclick = Callback::from(move |_: MouseEvent| {
        let Some(provider) = context
            .as_ref()
            .and_then(|context| context.providers.global_provider())
        else {
            return;
        };

        match provider.state() {
            ProviderState::SignedIn => provider.logout(),
            ProviderState::SignedOut => provider.login(),
            ProviderState::Loading => {}
        }
    });

    let (label, disabled) = match state {
        None => ("Sign in", true),
        Some(ProviderState::Loading) => ("Signing in...", true),
        Some(ProviderState::SignedOut) => ("Sign in", false),
        Some(ProviderState::SignedIn) => ("Sign out", false),
    };

    html! {
        <button class="btn btn-primary login-button" {onclick} {disabled}>
            { label }
        </button>
    }
}
