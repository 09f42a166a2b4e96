pub mod redirect;

use std::rc::Rc;

use shared::mock::MockProvider;
use shared::{AuthConfig, ProviderKind, Providers};

use self::redirect::RedirectProvider;

/// Install the configured provider as the global provider.
pub fn install_provider(providers: &Providers, config: &AuthConfig) {
    match config.provider {
        ProviderKind::Redirect => {
            let provider = Rc::new(RedirectProvider::new(config.clone()));
            providers.set_global_provider(Some(provider.clone()));
            provider.initialize();
        }
        ProviderKind::Mock => {
            providers.set_global_provider(Some(Rc::new(MockProvider::signed_in())));
        }
    }
}
