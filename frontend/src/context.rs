use std::rc::Rc;

use shared::{AuthConfig, Providers};

/// App-wide handles passed down through a Yew context.
#[derive(Clone)]
pub struct ProvidersContext {
    pub providers: Rc<Providers>,
    pub config: Rc<AuthConfig>,
}

impl ProvidersContext {
    pub fn new(providers: Rc<Providers>, config: AuthConfig) -> Self {
        Self {
            providers,
            config: Rc::new(config),
        }
    }
}

impl PartialEq for ProvidersContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.providers, &other.providers) && Rc::ptr_eq(&self.config, &other.config)
    }
}
