//! Request descriptor built once per bridged request.

use actix_web::HttpRequest;
use actix_web::http::Uri;
use actix_web::web::Query;

use crate::error::{BridgeError, BridgeResult};

/// Query parameters in the order they first appeared.
///
/// Keys are unique. A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    entries: Vec<(String, String)>,
}

impl QueryParameters {
    /// Parse a raw (still percent-encoded) query string.
    pub fn parse(query: &str) -> BridgeResult<Self> {
        let pairs = Query::<Vec<(String, String)>>::from_query(query)
            .map_err(|e| BridgeError::InvalidRequest(format!("Invalid query string: {}", e)))?
            .into_inner();

        let mut params = Self::default();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        Ok(params)
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a parameter value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The resolved form of an inbound request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    url: String,
    path: String,
    query: QueryParameters,
}

impl RequestDescriptor {
    /// Resolve a full URL (absolute or origin-form, with optional query string).
    pub fn parse(url: &str) -> BridgeResult<Self> {
        let uri: Uri = url
            .parse()
            .map_err(|e| BridgeError::InvalidRequest(format!("Invalid request URL: {}", e)))?;
        Self::resolve(url.to_string(), &uri)
    }

    /// Build the descriptor from the request actix received.
    ///
    /// Path and query come from the request target only. Scheme and host are taken from
    /// connection info, which clients control through `Host` and forwarding headers, so
    /// they only decorate the URL used for reporting.
    pub fn from_request(req: &HttpRequest) -> BridgeResult<Self> {
        let conn = req.connection_info();
        let url = format!("{}://{}{}", conn.scheme(), conn.host(), req.uri());
        Self::resolve(url, req.uri())
    }

    fn resolve(url: String, uri: &Uri) -> BridgeResult<Self> {
        let path = urlencoding::decode(uri.path())
            .map_err(|e| BridgeError::InvalidRequest(format!("Invalid request path: {}", e)))?
            .into_owned();

        let query = match uri.query() {
            Some(q) => QueryParameters::parse(q)?,
            None => QueryParameters::default(),
        };

        Ok(Self { url, path, query })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Percent-decoded request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParameters {
        &self.query
    }
}
