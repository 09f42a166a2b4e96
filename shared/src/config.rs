use uuid::Uuid;

use crate::error::ConfigError;

pub const DEFAULT_CLIENT_ID: &str = "e0b7bcfa-5676-4491-a00b-6b567892cd97";
pub const DEFAULT_SCOPES: &[&str] = &[
    "calendars.read",
    "user.read",
    "openid",
    "profile",
    "people.read",
    "user.readbasic.all",
];
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";
pub const DEFAULT_AGENDA_DAYS: u32 = 3;
pub const MAX_AGENDA_DAYS: u32 = 31;

/// Which provider the app installs at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Microsoft identity platform redirect sign-in.
    Redirect,
    /// Local mock with canned agenda data.
    Mock,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redirect" | "msal" => Ok(Self::Redirect),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::InvalidProvider(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub client_id: String,
    pub scopes: Vec<String>,
    pub authority: String,
    /// Falls back to the page origin when unset.
    pub redirect_uri: Option<String>,
    pub provider: ProviderKind,
    pub agenda_days: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            authority: DEFAULT_AUTHORITY.to_string(),
            redirect_uri: None,
            provider: ProviderKind::Redirect,
            agenda_days: DEFAULT_AGENDA_DAYS,
        }
    }
}

impl AuthConfig {
    /// Build a config from `AGENDA_*` keys resolved by `lookup`.
    ///
    /// Missing or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(client_id) = get("AGENDA_CLIENT_ID") {
            config.client_id = client_id.trim().to_string();
        }
        if let Some(scopes) = get("AGENDA_SCOPES") {
            config.scopes = parse_scopes(&scopes);
        }
        if let Some(authority) = get("AGENDA_AUTHORITY") {
            config.authority = authority.trim().trim_end_matches('/').to_string();
        }
        if let Some(redirect_uri) = get("AGENDA_REDIRECT_URI") {
            config.redirect_uri = Some(redirect_uri.trim().to_string());
        }
        if let Some(provider) = get("AGENDA_PROVIDER") {
            config.provider = ProviderKind::parse(&provider)?;
        }
        if let Some(days) = get("AGENDA_DAYS") {
            config.agenda_days = days
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDays(days.clone()))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Uuid::parse_str(&self.client_id)
            .map_err(|_| ConfigError::InvalidClientId(self.client_id.clone()))?;

        if self.scopes.is_empty() {
            return Err(ConfigError::NoScopes);
        }

        if !(1..=MAX_AGENDA_DAYS).contains(&self.agenda_days) {
            return Err(ConfigError::InvalidDays(self.agenda_days.to_string()));
        }

        Ok(())
    }

    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// Authorize endpoint URL for a token-in-fragment sign-in.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let scope = self.scope_string();
        let params = [
            ("client_id", self.client_id.as_str()),
            ("response_type", "token"),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("response_mode", "fragment"),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/oauth2/v2.0/authorize?{}", self.authority, query_string)
    }
}

fn parse_scopes(value: &str) -> Vec<String> {
    let mut scopes: Vec<String> = Vec::new();
    for scope in value.split(|c: char| c == ',' || c.is_whitespace()) {
        let scope = scope.trim();
        if !scope.is_empty() && !scopes.iter().any(|s| s == scope) {
            scopes.push(scope.to_string());
        }
    }
    scopes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AuthConfig::default());
        assert_eq!(config.client_id, DEFAULT_CLIENT_ID);
        assert_eq!(config.scopes.len(), 6);
        assert_eq!(config.agenda_days, 3);
        assert_eq!(config.provider, ProviderKind::Redirect);
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("AGENDA_SCOPES", "calendars.read, user.read user.read"),
            ("AGENDA_AUTHORITY", "https://login.microsoftonline.com/contoso/"),
            ("AGENDA_PROVIDER", "Mock"),
            ("AGENDA_DAYS", "7"),
            ("AGENDA_REDIRECT_URI", "  "),
        ]))
        .unwrap();

        assert_eq!(config.scopes, vec!["calendars.read", "user.read"]);
        assert_eq!(config.authority, "https://login.microsoftonline.com/contoso");
        assert_eq!(config.provider, ProviderKind::Mock);
        assert_eq!(config.agenda_days, 7);
        assert_eq!(config.redirect_uri, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("AGENDA_CLIENT_ID", "not-a-guid")])),
            Err(ConfigError::InvalidClientId(_))
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("AGENDA_SCOPES", " , ")])),
            Err(ConfigError::NoScopes)
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("AGENDA_PROVIDER", "popup")])),
            Err(ConfigError::InvalidProvider(_))
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("AGENDA_DAYS", "0")])),
            Err(ConfigError::InvalidDays(_))
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("AGENDA_DAYS", "three")])),
            Err(ConfigError::InvalidDays(_))
        ));
    }

    #[test]
    fn test_authorize_url() {
        let config = AuthConfig::default();
        let url = config.authorize_url("http://localhost:8080/", "abc");

        assert!(url.starts_with(
            "https://login.microsoftonline.com/common/oauth2/v2.0/authorize?client_id=e0b7bcfa-"
        ));
        assert!(url.contains("response_type=token"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2F"));
        assert!(url.contains("scope=calendars.read%20user.read%20openid"));
        assert!(url.ends_with("state=abc"));
    }
}
