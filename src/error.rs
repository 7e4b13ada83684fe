use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("request error: {0}")]
    Ureq(#[from] Box<ureq::Error>),
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Missing config: {0}")]
    MissingConfig(String),
    #[error("Other error: {0}")]
    Other(String),
}
