//! Session-related types.
//!
//! The bearer token issued by the API is the only authentication state the
//! front-end keeps. It lives server-side in the session, never in the browser.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Bearer token issued by the BizSphere API at login or registration.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Raw token for the `Authorization` header or the session store.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// Session keys.
pub mod session_keys {
    /// Key for the API bearer token.
    pub const TOKEN: &str = "bizsphere_token";
}
