//! Redirect sign-in against the Microsoft identity platform.
//!
//! `login` sends the browser to the authorize endpoint; the token comes back
//! in the URL fragment and is picked up by `initialize` on the next page load.
//! Tokens live in session storage so a reload keeps the session.

use std::cell::RefCell;

use chrono::Utc;
use gloo::storage::{SessionStorage, Storage};
use shared::token::{parse_redirect, AccessToken};
use shared::{AuthConfig, Listener, Provider, ProviderState, ProviderStateCell, Subscription, TokenError};
use uuid::Uuid;
use wasm_bindgen::JsValue;

const TOKEN_KEY: &str = "graph-agenda.token";
const STATE_KEY: &str = "graph-agenda.state";

pub struct RedirectProvider {
    config: AuthConfig,
    state: ProviderStateCell,
    token: RefCell<Option<AccessToken>>,
}

impl RedirectProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            state: ProviderStateCell::new(ProviderState::Loading),
            token: RefCell::new(None),
        }
    }

    /// Resolve the `Loading` state from the redirect fragment or a stored
    /// token.
    pub fn initialize(&self) {
        let now = Utc::now();

        let token = match self.take_redirect_token() {
            Ok(Some(token)) => {
                if let Err(e) = SessionStorage::set(TOKEN_KEY, &token) {
                    tracing::warn!("Failed to persist access token: {:?}", e);
                }
                Some(token)
            }
            Ok(None) => SessionStorage::get::<AccessToken>(TOKEN_KEY)
                .ok()
                .filter(|token| !token.is_expired(now)),
            Err(e) => {
                tracing::error!("Sign-in redirect failed: {}", e);
                None
            }
        };

        let signed_in = token.is_some();
        *self.token.borrow_mut() = token;
        self.state.set(if signed_in {
            ProviderState::SignedIn
        } else {
            ProviderState::SignedOut
        });
    }

    fn take_redirect_token(&self) -> Result<Option<AccessToken>, TokenError> {
        let Some(fragment) = current_fragment() else {
            return Ok(None);
        };
        if fragment.trim_start_matches('#').is_empty() {
            return Ok(None);
        }

        let expected_state = SessionStorage::get::<String>(STATE_KEY).ok();
        let result = parse_redirect(&fragment, expected_state.as_deref(), Utc::now());

        if !matches!(result, Ok(None)) {
            SessionStorage::delete(STATE_KEY);
            clear_fragment();
        }

        result
    }

    fn redirect_uri(&self) -> String {
        if let Some(uri) = &self.config.redirect_uri {
            return uri.clone();
        }

        gloo::utils::window()
            .location()
            .href()
            .map(|href| href.split('#').next().unwrap_or_default().to_string())
            .unwrap_or_default()
    }
}

impl Provider for RedirectProvider {
    fn name(&self) -> &str {
        "redirect"
    }

    fn state(&self) -> ProviderState {
        self.state.get()
    }

    fn on_state_changed(&self, listener: Listener) -> Subscription {
        self.state.subscribe(listener)
    }

    fn login(&self) {
        let nonce = Uuid::new_v4().to_string();
        if let Err(e) = SessionStorage::set(STATE_KEY, &nonce) {
            tracing::error!("Failed to store sign-in state: {:?}", e);
            return;
        }

        let url = self.config.authorize_url(&self.redirect_uri(), &nonce);
        self.state.set(ProviderState::Loading);

        if let Err(e) = gloo::utils::window().location().set_href(&url) {
            tracing::error!("Failed to navigate to sign-in: {:?}", e);
            self.state.set(ProviderState::SignedOut);
        }
    }

    fn logout(&self) {
        self.token.borrow_mut().take();
        SessionStorage::delete(TOKEN_KEY);
        self.state.set(ProviderState::SignedOut);
    }

    fn access_token(&self) -> Option<String> {
        self.token
            .borrow()
            .as_ref()
            .filter(|token| !token.is_expired(Utc::now()))
            .map(|token| token.token.clone())
    }
}

fn current_fragment() -> Option<String> {
    web_sys::window()?.location().hash().ok()
}

fn clear_fragment() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let url = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );

    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            tracing::warn!("Failed to clear sign-in fragment: {:?}", e);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use chrono::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn store_token(expires_in: Duration) {
        let token = AccessToken {
            token: "stored-token".to_string(),
            expires_at: Utc::now() + expires_in,
            scopes: vec!["calendars.read".to_string()],
        };
        SessionStorage::set(TOKEN_KEY, &token).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_stored_token_restores_session() {
        store_token(Duration::hours(1));
        let provider = RedirectProvider::new(AuthConfig::default());
        assert_eq!(provider.state(), ProviderState::Loading);

        provider.initialize();

        assert_eq!(provider.state(), ProviderState::SignedIn);
        assert_eq!(provider.access_token().as_deref(), Some("stored-token"));
    }

    #[wasm_bindgen_test]
    fn test_expired_token_signs_out() {
        store_token(Duration::seconds(10));
        let provider = RedirectProvider::new(AuthConfig::default());

        provider.initialize();

        assert_eq!(provider.state(), ProviderState::SignedOut);
        assert!(provider.access_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_logout_clears_storage() {
        store_token(Duration::hours(1));
        let provider = RedirectProvider::new(AuthConfig::default());
        provider.initialize();

        provider.logout();

        assert_eq!(provider.state(), ProviderState::SignedOut);
        assert!(SessionStorage::get::<AccessToken>(TOKEN_KEY).is_err());
    }
}
