// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The pure Volcengine signature function.
//!
//! Everything here is computed from a [`SigningInput`] and a [`Credential`]:
//! no clock reads, no caching, no IO.

use crate::constants::*;
use crate::Credential;
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::collections::BTreeMap;
use volcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use volcsign_core::time::{format_date, format_iso8601, parse_iso8601, DateTime};
use volcsign_core::{Error, Result};

/// Value of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// `key=value`
    Single(String),
    /// `key=v1&key=v2...`, or `key=` when empty.
    Multi(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Single(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Single(v)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(v: Vec<String>) -> Self {
        QueryValue::Multi(v)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(v: Vec<&str>) -> Self {
        QueryValue::Multi(v.into_iter().map(String::from).collect())
    }
}

/// Everything about a request that takes part in its signature.
///
/// `headers` must carry `Host` and `X-Date` (`YYYYMMDDTHHmmssZ`).
#[derive(Debug, Clone, Default)]
pub struct SigningInput {
    /// HTTP method, upper-cased while signing.
    pub method: String,
    /// URL path, used verbatim. Empty means `/`.
    pub path: String,
    /// Query parameters, not encoded.
    pub query: Vec<(String, QueryValue)>,
    /// Header names and values, in any case and order.
    pub headers: Vec<(String, String)>,
    /// Header names to sign besides `host` and `x-date`.
    pub signed_headers: Vec<String>,
    /// Raw request body.
    pub body: Vec<u8>,
    /// Region, e.g. `cn-beijing`.
    pub region: String,
    /// Service, e.g. `iam`.
    pub service: String,
}

impl SigningInput {
    /// Create a new signing input without query, headers or body.
    pub fn new(method: &str, path: &str, region: &str, service: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            region: region.to_string(),
            service: service.to_string(),
            ..Default::default()
        }
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Request a header to be signed.
    pub fn with_signed_header(mut self, key: &str) -> Self {
        self.signed_headers.push(key.to_string());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set `X-Date` from the given time, replacing any existing value.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(X_DATE));
        self.headers
            .push(("X-Date".to_string(), format_iso8601(time)));
        self
    }
}

/// Hex encoded SHA256 of a request body.
///
/// Stamp it as `X-Content-Sha256` when signing through
/// [`RequestSigner`](crate::RequestSigner).
pub fn payload_hash(body: &[u8]) -> String {
    hex_sha256(body)
}

/// Build the canonical request.
///
/// ```text
/// METHOD
/// PATH
/// SORTED_QUERY
/// CANONICAL_HEADERS
///
/// SIGNED_HEADERS
/// HEX(SHA256(body))
/// ```
pub fn canonical_request(input: &SigningInput) -> Result<String> {
    Ok(canonicalize(input, &payload_hash(&input.body))?.request)
}

/// Build the string to sign.
///
/// ```text
/// HMAC-SHA256
/// 20240101T000000Z
/// 20240101/cn-beijing/iam/request
/// HEX(SHA256(canonical_request))
/// ```
pub fn string_to_sign(input: &SigningInput) -> Result<String> {
    let canonical = canonicalize(input, &payload_hash(&input.body))?;
    let scope = canonical.scope(&input.region, &input.service);
    Ok(canonical.string_to_sign(&scope))
}

/// Sign the input and return the `Authorization` header value.
pub fn sign(input: &SigningInput, cred: &Credential) -> Result<String> {
    sign_with_payload_hash(input, &payload_hash(&input.body), cred)
}

/// Derive the signing key.
///
/// `kSigning = HMAC(HMAC(HMAC(HMAC(secret, date), region), service), "request")`
pub fn generate_signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>> {
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
    // Sign region
    let sign_region = hmac_sha256(&sign_date, region.as_bytes())?;
    // Sign service
    let sign_service = hmac_sha256(&sign_region, service.as_bytes())?;
    // Sign request
    hmac_sha256(&sign_service, SCOPE_TERMINATOR.as_bytes())
}

/// Sign with a payload hash computed by the caller.
pub(crate) fn sign_with_payload_hash(
    input: &SigningInput,
    payload_hash: &str,
    cred: &Credential,
) -> Result<String> {
    let canonical = canonicalize(input, payload_hash)?;
    let scope = canonical.scope(&input.region, &input.service);
    let string_to_sign = canonical.string_to_sign(&scope);

    let signing_key = generate_signing_key(
        &cred.secret_access_key,
        &canonical.date,
        &input.region,
        &input.service,
    )?;
    let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())?;

    Ok(format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
        cred.access_key_id, canonical.signed_headers,
    ))
}

struct Canonical {
    timestamp: String,
    date: String,
    signed_headers: String,
    request: String,
}

impl Canonical {
    fn scope(&self, region: &str, service: &str) -> String {
        let scope = format!("{}/{region}/{service}/{SCOPE_TERMINATOR}", self.date);
        debug!("calculated scope: {scope}");
        scope
    }

    fn string_to_sign(&self, scope: &str) -> String {
        let string_to_sign = format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            self.timestamp,
            hex_sha256(self.request.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");
        string_to_sign
    }
}

fn canonicalize(input: &SigningInput, payload_hash: &str) -> Result<Canonical> {
    let headers = canonicalize_headers(&input.headers);

    let timestamp = headers
        .get(X_DATE)
        .ok_or_else(|| Error::config_invalid("x-date header is required for signing"))?;
    let date = format_date(parse_iso8601(timestamp)?);

    if !headers.contains_key(HOST) {
        return Err(Error::request_invalid("host header is required for signing"));
    }

    let mut wanted: Vec<String> = input
        .signed_headers
        .iter()
        .map(|v| v.trim().to_lowercase())
        .chain([X_DATE.to_string(), HOST.to_string()])
        .filter(|v| !HEADERS_TO_IGNORE.contains(&v.as_str()))
        .filter(|v| headers.contains_key(v))
        .collect();
    wanted.sort();
    wanted.dedup();

    let canonical_headers = wanted
        .iter()
        .map(|k| format!("{k}:{}", headers[k]))
        .collect::<Vec<_>>()
        .join("\n");
    let signed_headers = wanted.join(";");

    let method = input.method.to_uppercase();
    let path = if input.path.is_empty() {
        "/"
    } else {
        input.path.as_str()
    };
    let query = canonicalize_query(&input.query);

    let request = format!(
        "{method}\n{path}\n{query}\n{canonical_headers}\n\n{signed_headers}\n{payload_hash}"
    );
    debug!("calculated canonical request: {request}");

    Ok(Canonical {
        timestamp: timestamp.clone(),
        date,
        signed_headers,
        request,
    })
}

/// Lower-case names, collapse whitespace in values, join repeated names with `,`.
fn canonicalize_headers(headers: &[(String, String)]) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (k, v) in headers {
        let value = v.split_whitespace().collect::<Vec<_>>().join(" ");
        map.entry(k.trim().to_lowercase())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

/// Sort by raw key, encode, and sort the encoded values of each key.
///
/// Empty keys are dropped.
fn canonicalize_query(query: &[(String, QueryValue)]) -> String {
    let encode = |v: &str| utf8_percent_encode(v, &VOLC_QUERY_ENCODE_SET).to_string();

    let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (k, v) in query {
        if k.is_empty() {
            continue;
        }
        let values = grouped.entry(k.as_str()).or_default();
        match v {
            QueryValue::Single(v) => values.push(encode(v)),
            QueryValue::Multi(vs) => values.extend(vs.iter().map(|v| encode(v))),
        }
    }

    grouped
        .into_iter()
        .map(|(k, mut values)| {
            let key = encode(k);
            if values.is_empty() {
                return format!("{key}=");
            }
            values.sort();
            values
                .iter()
                .map(|v| format!("{key}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        })
        .collect::<Vec<_>>()
        .join("&")
}
