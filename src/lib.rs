//! Decorate a fetch with an `Authorization` header, Basic or Bearer.
//!
//! ```no_run
//! use fetch_auth::{
//!     authorization, AuthorizationOptions, BasicCredentials, Fetch, Request, UreqFetch,
//! };
//!
//! # async fn run() -> Result<(), fetch_auth::Error> {
//! let fetch = authorization(
//!     UreqFetch::default(),
//!     AuthorizationOptions::Basic(BasicCredentials::new("user", "pass")),
//! );
//! let response = fetch.fetch(Request::get("https://api.example.com/")?).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod headers;
pub mod transport;

pub use auth::{
    authorization, AuthorizationOptions, Base64Alphabet, BasicCredentials, BearerToken,
    RawAuthorizationOptions,
};
pub use error::Error;
pub use fetch::{fetch_fn, Fetch, FetchFn, Method, Request, Response};
pub use headers::{add_headers, AddHeaders, AddHeadersConfig};
pub use transport::UreqFetch;
