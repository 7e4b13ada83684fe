use std::collections::BTreeMap;

use crate::{error::Error, fetch::{Fetch, Request, Response}};

/// Headers to overlay onto every request. A `None` value is the unset
/// sentinel: the header is stripped from the request instead of being sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddHeadersConfig {
    pub headers: BTreeMap<String, Option<String>>,
}

impl AddHeadersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: &str, value: Option<String>) -> Self {
        self.headers.insert(name.to_owned(), value);
        self
    }
}

/// A [`Fetch`] that merges a fixed set of headers into each request before
/// handing it to the wrapped fetch.
#[derive(Clone, Debug)]
pub struct AddHeaders<F> {
    inner: F,
    config: AddHeadersConfig,
}

pub fn add_headers<F: Fetch>(previous_fetch: F, config: AddHeadersConfig) -> AddHeaders<F> {
    AddHeaders {
        inner: previous_fetch,
        config,
    }
}

impl<F> AddHeaders<F> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.config
            .headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.as_deref())
    }

    fn merge(&self, request: &mut Request) {
        for (name, value) in &self.config.headers {
            match value {
                Some(value) => request.set_header(name, value),
                None => {
                    log::debug!("Dropping unset header {name}");
                    request.remove_header(name);
                }
            }
        }
    }
}

impl<F: Fetch> Fetch for AddHeaders<F> {
    async fn fetch(&self, mut request: Request) -> Result<Response, Error> {
        self.merge(&mut request);
        self.inner.fetch(request).await
    }
}
