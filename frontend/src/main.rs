mod auth;
mod components;
mod context;
mod hooks;
mod services;

use std::rc::Rc;

use shared::{AuthConfig, Providers};
use yew::prelude::*;

use crate::components::agenda::Agenda;
use crate::components::header::Header;
use crate::context::ProvidersContext;
use crate::hooks::{use_is_signed_in, use_providers};

#[derive(Properties, PartialEq)]
struct AppProps {
    context: ProvidersContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<ProvidersContext> context={props.context.clone()}>
            <div id="app" class="App">
                <Header />
                <Main />
            </div>
        </ContextProvider<ProvidersContext>>
    }
}

#[function_component(Main)]
fn main_view() -> Html {
    let signed_in = use_is_signed_in();
    let days = use_providers()
        .map(|context| context.config.agenda_days)
        .unwrap_or(shared::config::DEFAULT_AGENDA_DAYS);

    html! {
        <main class="container">
            if signed_in {
                <Agenda {days} />
            } else {
                <div class="empty-state">
                    <p>{ "Sign in to see your upcoming events." }</p>
                </div>
            }
        </main>
    }
}

/// Build-time configuration from `AGENDA_*` environment variables.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "AGENDA_CLIENT_ID" => option_env!("AGENDA_CLIENT_ID"),
        "AGENDA_SCOPES" => option_env!("AGENDA_SCOPES"),
        "AGENDA_AUTHORITY" => option_env!("AGENDA_AUTHORITY"),
        "AGENDA_REDIRECT_URI" => option_env!("AGENDA_REDIRECT_URI"),
        "AGENDA_PROVIDER" => option_env!("AGENDA_PROVIDER"),
        "AGENDA_DAYS" => option_env!("AGENDA_DAYS"),
        _ => None,
    };
    value.map(str::to_string)
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    let providers = Rc::new(Providers::new());

    let config = match AuthConfig::from_lookup(build_env) {
        Ok(config) => {
            auth::install_provider(&providers, &config);
            config
        }
        Err(e) => {
            tracing::error!("Invalid configuration, starting without a provider: {}", e);
            AuthConfig::default()
        }
    };

    let context = ProvidersContext::new(providers, config);
    yew::Renderer::<App>::with_props(AppProps { context }).render();
}
