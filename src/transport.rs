use std::time::Duration;

use crate::{error::Error, fetch::{Fetch, Request, Response}};

pub const DEFAULT_USER_AGENT: &str = concat!("fetch_auth/", env!("CARGO_PKG_VERSION"));

/// [`Fetch`] backed by a blocking `ureq` agent, run on tokio's blocking pool.
#[derive(Clone)]
pub struct UreqFetch {
    agent: ureq::Agent,
}

impl UreqFetch {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();

        Self { agent }
    }
}

impl Default for UreqFetch {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), DEFAULT_USER_AGENT)
    }
}

impl Fetch for UreqFetch {
    async fn fetch(&self, request: Request) -> Result<Response, Error> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send(&agent, &request)).await?
    }
}

fn send(agent: &ureq::Agent, request: &Request) -> Result<Response, Error> {
    log::info!("{} {}", request.method, request.url);

    let mut req = agent.request_url(request.method.as_str(), &request.url);
    for (name, values) in group_headers(request) {
        req = req.set(name, &values.join(", "));
    }

    let result = match &request.body {
        Some(body) => req.send_string(body),
        None => req.call(),
    };

    let resp = match result {
        Ok(resp) => resp,
        Err(ureq::Error::Status(status, resp)) => {
            log::warn!("{} {} returned {status}", request.method, request.url);
            resp
        }
        Err(err) => return Err(Error::Ureq(Box::new(err))),
    };

    into_response(resp)
}

// `ureq::Request::set` replaces earlier values, so repeated names are folded
// into one comma-separated line, in first-seen order.
fn group_headers(request: &Request) -> Vec<(&str, Vec<&str>)> {
    let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
    for (name, value) in request.headers() {
        match grouped.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(name)) {
            Some((_, values)) => values.push(value),
            None => grouped.push((name, vec![value])),
        }
    }
    grouped
}

fn into_response(resp: ureq::Response) -> Result<Response, Error> {
    let mut response = Response::new(resp.status(), String::new())
        .with_status_text(resp.status_text());

    let mut names: Vec<String> = Vec::new();
    for name in resp.headers_names() {
        if !names.iter().any(|seen| seen.eq_ignore_ascii_case(&name)) {
            names.push(name);
        }
    }
    for name in &names {
        for value in resp.all(name) {
            response = response.with_header(name, value);
        }
    }
    response.body = resp.into_string()?;

    Ok(response)
}
