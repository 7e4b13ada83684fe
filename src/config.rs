use std::{collections::BTreeMap, fs, time::Duration};

use serde::Deserialize;

use crate::{
    auth::RawAuthorizationOptions,
    error::Error,
    fetch::{Method, Request},
    transport::{UreqFetch, DEFAULT_USER_AGENT},
};

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    pub request: RequestConfig,
    pub authorization: Option<RawAuthorizationOptions>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct RequestConfig {
    pub url: String,
    #[serde(default)]
    pub method: Method,
    pub body: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl Config {
    pub fn read_from_toml_file(filename: &str) -> Result<Config, Error> {
        log::info!("Reading config from {filename}");
        let contents = fs::read_to_string(filename)?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(source: &str) -> Result<Config, Error> {
        let config: Self = toml::from_str(source)?;
        Ok(config)
    }
}

impl RequestConfig {
    pub fn to_request(&self) -> Result<Request, Error> {
        let mut request = Request::new(self.method, &self.url)?;
        for (name, value) in &self.headers {
            request = request.with_header(name, value);
        }
        if let Some(body) = &self.body {
            request = request.with_body(body.as_str());
        }

        Ok(request)
    }

    pub fn transport(&self) -> UreqFetch {
        UreqFetch::new(Duration::from_secs(self.timeout_secs), &self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::{AuthorizationOptions, Base64Alphabet, BasicCredentials};

    use super::*;

    #[test]
    fn test_parse_config_toml() {
        let toml_source =
r#"
[request]
url = "https://api.example.com/v1/items"
method = "POST"
body = "{}"
timeout_secs = 5

[request.headers]
Accept = "application/json"
Content-Type = "application/json"

[authorization]
username = "<YOUR USERNAME>"
password = "<YOUR PASSWORD>"
encoding = "standard"
"#;

        let parsed = Config::from_toml(toml_source);
        assert!(parsed.is_ok());
        let parsed: Config = parsed.unwrap();

        assert_eq!(parsed.request, RequestConfig {
            url: "https://api.example.com/v1/items".to_owned(),
            method: Method::Post,
            body: Some("{}".to_owned()),
            headers: BTreeMap::from([
                ("Accept".to_owned(), "application/json".to_owned()),
                ("Content-Type".to_owned(), "application/json".to_owned()),
            ]),
            timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        });

        let options = AuthorizationOptions::from(parsed.authorization.unwrap());
        assert_eq!(options, AuthorizationOptions::Basic(
            BasicCredentials::new("<YOUR USERNAME>", "<YOUR PASSWORD>")
                .with_alphabet(Base64Alphabet::Standard)
        ));
    }

    #[test]
    fn test_parse_minimal_config() {
        let parsed = Config::from_toml(
r#"
[request]
url = "https://api.example.com/"
"#).unwrap();

        assert_eq!(parsed.request.method, Method::Get);
        assert_eq!(parsed.request.timeout_secs, 30);
        assert!(parsed.request.headers.is_empty());
        assert_eq!(parsed.authorization, None);
    }

    #[test]
    fn test_parse_bearer_config() {
        let parsed = Config::from_toml(
r#"
[request]
url = "https://api.example.com/"

[authorization]
bearer = "<YOUR TOKEN>"
"#).unwrap();

        let options = AuthorizationOptions::from(parsed.authorization.unwrap());
        assert_eq!(options.header_value(), "Bearer <YOUR TOKEN>");
    }

    #[test]
    fn test_missing_request_table() {
        let parsed = Config::from_toml("[authorization]\nbearer = \"t\"\n");
        assert!(matches!(parsed, Err(Error::Toml(_))));
    }

    #[test]
    fn test_to_request() {
        let parsed = Config::from_toml(
r#"
[request]
url = "https://api.example.com/v1/items"
method = "PUT"
body = "payload"

[request.headers]
Accept = "text/plain"
"#).unwrap();

        let request = parsed.request.to_request().unwrap();

        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/items");
        assert_eq!(request.header("accept"), Some("text/plain"));
        assert_eq!(request.body.as_deref(), Some("payload"));
    }
}
