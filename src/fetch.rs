use std::{fmt::{self, Display}, future::Future, sync::Arc};

use serde::Deserialize;
use url::Url;

use crate::error::Error;

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing HTTP request. Header names compare ASCII case-insensitively.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Result<Self, Error> {
        Ok(Self {
            method,
            url: Url::parse(url)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn get(url: &str) -> Result<Self, Error> {
        Self::new(Method::Get, url)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replaces every header called `name` with a single `name: value`.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.remove_header(name);
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    headers: Vec<(String, String)>,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_status_text(mut self, status_text: &str) -> Self {
        self.status_text = status_text.to_owned();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every header line in received order; repeated names appear once per value.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Anything that can send a [`Request`] and eventually yield a [`Response`].
///
/// Non-2xx statuses are responses, not errors. `Err` is reserved for failures
/// where no response was received at all.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, request: Request) -> Result<Response, Error>;
}

/// Adapter turning an async closure into a [`Fetch`].
#[derive(Clone)]
pub struct FetchFn<F> {
    f: F,
}

pub const fn fetch_fn<F, Fut>(f: F) -> FetchFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Result<Response, Error>>,
{
    FetchFn { f }
}

impl<F, Fut> Fetch for FetchFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Result<Response, Error>>,
{
    async fn fetch(&self, request: Request) -> Result<Response, Error> {
        (self.f)(request).await
    }
}

impl<T: Fetch> Fetch for Arc<T> {
    async fn fetch(&self, request: Request) -> Result<Response, Error> {
        self.as_ref().fetch(request).await
    }
}

impl<T: Fetch> Fetch for &T {
    async fn fetch(&self, request: Request) -> Result<Response, Error> {
        (**self).fetch(request).await
    }
}
