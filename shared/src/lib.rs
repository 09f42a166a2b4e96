//! Core of the Graph agenda front end.
//!
//! Everything here is framework independent and single threaded: listener
//! bookkeeping, the provider abstraction and its process-wide registry, the
//! sign-in bridge, configuration, and the calendar models used by the agenda.

pub mod agenda;
pub mod api;
pub mod bridge;
pub mod config;
pub mod error;
pub mod listeners;
pub mod mock;
pub mod models;
pub mod observable;
pub mod provider;
pub mod providers;
pub mod token;

pub use bridge::{is_signed_in, SignInStateBridge};
pub use config::{AuthConfig, ProviderKind};
pub use error::{ConfigError, GraphError, TokenError};
pub use listeners::{Listener, ListenerSet, Subscription};
pub use observable::{bridge, Observable};
pub use provider::{Provider, ProviderState, ProviderStateCell};
pub use providers::Providers;
