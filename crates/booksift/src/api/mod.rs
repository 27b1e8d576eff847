//! The Fetcher: a single search request against the book search API.

use std::time::Duration;

use serde::de::DeserializeOwned;

pub(crate) mod open_library;

pub use open_library::fetch_records;

use crate::{Error, ErrorKind};

/// A blocking HTTP client able to perform a GET request and decode the JSON body.
///
/// Implementations must fail with [`ErrorKind::Fetch`] on transport errors, timeouts,
/// non-success status codes and bodies that cannot be decoded as `T`.
pub trait Client
where
    Self: Sized,
{
    /// Build a client where every request is bounded by `timeout`.
    ///
    /// # Errors
    /// When the underlying client cannot be constructed.
    fn with_timeout(timeout: Duration) -> Result<Self, Error>;

    /// Send a GET request to `url` with the `query` pairs appended and decode the JSON body.
    ///
    /// # Errors
    /// See the trait docs.
    fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::wrap_with(ErrorKind::Fetch, "Cannot build the HTTP client", e))
    }

    fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .query(query)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::Fetch, e))
            .and_then(|r| {
                r.json().map_err(|e| {
                    Error::wrap_with(ErrorKind::Fetch, "Response body is not valid search JSON", e)
                })
            })
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_request, impl_text_producer, MockClient, NetworkErrorProducer, Producer, REQUEST_SINK,
};
