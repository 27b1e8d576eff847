use log::{debug, info, trace};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{book::RawRecord, Config, Error};

use super::Client;

/// Fetch a single page of search results using the default HTTP client.
///
/// The request is `GET <search_url>?q=<query>&limit=<page_limit>`, bounded by the configured
/// timeout. A response without a `docs` array yields no records.
///
/// # Errors
///
/// An `Err` of kind [`ErrorKind::Fetch`](crate::ErrorKind::Fetch) is returned when the request
/// fails, times out, returns a non-success status or the body is not a JSON search response.
#[inline]
pub fn fetch_records(config: &Config) -> Result<Vec<RawRecord>, Error> {
    get_records::<reqwest::blocking::Client>(config)
}

pub(crate) fn get_records<C: Client>(config: &Config) -> Result<Vec<RawRecord>, Error> {
    info!(
        "Searching '{}' for '{}' (limit {})",
        config.search_url, config.query, config.page_limit
    );

    // The client lives only for this request; dropping it releases the connection.
    let client = C::with_timeout(config.timeout)?;
    let SearchResponse { docs } = client.get_json(
        &config.search_url,
        &[
            ("q", config.query.clone()),
            ("limit", config.page_limit.to_string()),
        ],
    )?;

    trace!("Request was successful - {} records returned", docs.len());
    Ok(docs)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchResponse {
    #[serde(default, deserialize_with = "objects_only")]
    docs: Vec<RawRecord>,
}

/// Keep the `docs` entries that are JSON objects, anything else in the array is dropped. A `docs`
/// value that is not an array at all counts as no records.
fn objects_only<'de, D>(deserializer: D) -> Result<Vec<RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(docs) = Value::deserialize(deserializer)? else {
        debug!("Search response 'docs' is not an array - treating it as empty");
        return Ok(Vec::new());
    };

    let total = docs.len();
    let records: Vec<RawRecord> = docs
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|doc| serde_json::from_value(doc).ok())
        .collect();

    if records.len() < total {
        debug!("Dropped {} 'docs' entries that are not objects", total - records.len());
    }
    Ok(records)
}
