//! Bearer tokens returned in the sign-in redirect fragment.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Tokens this close to expiry are treated as expired.
const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub scopes: Vec<String>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECONDS) >= self.expires_at
    }
}

/// Split `#a=1&b=2` into decoded key/value pairs.
pub fn parse_fragment(fragment: &str) -> HashMap<String, String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    let decoded = urlencoding::decode(&value).map(|decoded| decoded.into_owned());
    decoded.unwrap_or(value)
}

/// Read the access token out of a redirect fragment.
///
/// Returns `Ok(None)` when the fragment carries no sign-in response at all.
/// `expected_state` is the nonce stored when sign-in started; a response
/// without a matching nonce is rejected.
pub fn parse_redirect(
    fragment: &str,
    expected_state: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<AccessToken>, TokenError> {
    let params = parse_fragment(fragment);

    if let Some(error) = params.get("error") {
        return Err(TokenError::Denied {
            error: error.clone(),
            description: params.get("error_description").cloned().unwrap_or_default(),
        });
    }

    let Some(token) = params.get("access_token") else {
        return Ok(None);
    };

    match (expected_state, params.get("state")) {
        (Some(expected), Some(actual)) if expected == actual => {}
        _ => return Err(TokenError::StateMismatch),
    }

    let expires_in = params
        .get("expires_in")
        .ok_or(TokenError::MissingField("expires_in"))?;
    let seconds: i64 = expires_in
        .parse()
        .map_err(|_| TokenError::InvalidExpiry(expires_in.clone()))?;
    let expires_at = Some(seconds)
        .filter(|seconds| *seconds > 0)
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| TokenError::InvalidExpiry(expires_in.clone()))?;

    let scopes = params
        .get("scope")
        .map(|scope| scope.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    Ok(Some(AccessToken {
        token: token.clone(),
        expires_at,
        scopes,
    }))
}
