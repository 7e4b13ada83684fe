use base64::{engine::general_purpose, Engine};
use serde::Deserialize;

use crate::{fetch::Fetch, headers::{add_headers, AddHeaders, AddHeadersConfig}};

pub const AUTHORIZATION: &str = "Authorization";

/// Base64 alphabet used for Basic credentials.
///
/// `UrlSafe` (no padding) is the default even though RFC 7617 asks for the
/// standard alphabet; use `Standard` for servers that reject `-`/`_`.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Base64Alphabet {
    #[default]
    UrlSafe,
    Standard,
}

impl Base64Alphabet {
    fn encode(self, raw: &str) -> String {
        match self {
            Self::UrlSafe => general_purpose::URL_SAFE_NO_PAD.encode(raw),
            Self::Standard => general_purpose::STANDARD.encode(raw),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub alphabet: Base64Alphabet,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            alphabet: Base64Alphabet::default(),
        }
    }

    pub const fn with_alphabet(mut self, alphabet: Base64Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken {
    pub token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationOptions {
    Basic(BasicCredentials),
    Bearer(BearerToken),
}

impl AuthorizationOptions {
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(credentials) => make_basic_auth_header(
                credentials.username.as_deref().unwrap_or_default(),
                credentials.password.as_deref().unwrap_or_default(),
                credentials.alphabet,
            ),
            Self::Bearer(bearer) => make_bearer_auth_header(&bearer.token),
        }
    }
}

/// Authorization settings as they appear in config files and `--auth` JSON,
/// where the mode is picked by which keys are present.
///
/// A key set to `null` counts as absent, so `{"username": null, "bearer": "t"}`
/// selects Bearer.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawAuthorizationOptions {
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer: Option<String>,
    #[serde(default)]
    pub encoding: Base64Alphabet,
}

impl From<RawAuthorizationOptions> for AuthorizationOptions {
    // Basic is checked first, so it wins when both shapes are present. An
    // empty table also lands in Basic.
    fn from(raw: RawAuthorizationOptions) -> Self {
        match raw {
            RawAuthorizationOptions { username: None, password: None, bearer: Some(token), .. } => {
                Self::Bearer(BearerToken { token })
            }
            RawAuthorizationOptions { username, password, encoding, .. } => {
                Self::Basic(BasicCredentials { username, password, alphabet: encoding })
            }
        }
    }
}

pub fn make_basic_auth_header(username: &str, password: &str, alphabet: Base64Alphabet) -> String {
    let raw = format!("{username}:{password}");
    let encoded = alphabet.encode(&raw);
    format!("Basic {encoded}")
}

pub fn make_bearer_auth_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Wraps `previous_fetch` so every request carries an `Authorization` header
/// built from `options`. Nothing is sent until the result is invoked.
pub fn authorization<F: Fetch>(previous_fetch: F, options: AuthorizationOptions) -> AddHeaders<F> {
    let mode = match options {
        AuthorizationOptions::Basic(_) => "basic",
        AuthorizationOptions::Bearer(_) => "bearer",
    };
    log::debug!("Decorating fetch with {mode} authorization");

    add_headers(
        previous_fetch,
        AddHeadersConfig::new().header(AUTHORIZATION, Some(options.header_value())),
    )
}
