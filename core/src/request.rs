use std::mem;

use http::header::HeaderName;
use http::uri::Authority;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::{Error, Result};

/// Signing context for request.
///
/// Headers are moved out of the request while signing and moved back by
/// [`SigningRequest::apply`]; the URI is never rewritten.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, as it appears on the wire.
    pub path: String,
    /// HTTP query parameters, percent decoded, in request order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;

        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        let query = parts
            .uri
            .query()
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority,
            path,
            query,

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) {
        mem::swap(&mut parts.headers, &mut self.headers);
    }

    /// Get header value by name.
    ///
    /// Returns `None` if header not found.
    pub fn header_get(&self, key: &HeaderName) -> Result<Option<&str>> {
        match self.headers.get(key) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }

    /// Insert header if the request doesn't carry it yet.
    pub fn header_insert_if_absent(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers.entry(key).or_insert(value);
    }

    /// Get the headers accepted by `filter` as lowercase `(name, value)`
    /// pairs in request order.
    ///
    /// Only accepted values must be visible ASCII.
    pub fn header_to_vec_by(&self, filter: impl Fn(&str) -> bool) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .filter(|(k, _)| filter(k.as_str()))
            .map(|(k, v)| Ok((k.as_str().to_string(), v.to_str()?.to_string())))
            .collect()
    }
}
