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

use crate::canonical::{sign_with_payload_hash, QueryValue, SigningInput};
use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use http::header::{HeaderName, AUTHORIZATION};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use std::time::Duration;
use volcsign_core::time::{format_iso8601, now, DateTime};
use volcsign_core::{Context, Error, Result, SignRequest, SigningRequest};

/// RequestSigner that implements the Volcengine HMAC-SHA256 signature.
///
/// - [Volcengine signature](https://www.volcengine.com/docs/6369/67269)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,
    signed_headers: Option<Vec<String>>,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            signed_headers: None,

            time: None,
        }
    }

    /// Only sign the given headers besides `host`, `x-date` and
    /// `x-security-token`.
    ///
    /// Every header the request carries is signed by default.
    pub fn with_signed_headers(mut self, headers: &[&str]) -> Self {
        self.signed_headers = Some(headers.iter().map(|v| v.to_lowercase()).collect());
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing or reproducible signatures.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn sign(&self, req: &mut SigningRequest, cred: &Credential) -> Result<()> {
        let now = self.time.unwrap_or_else(now);

        req.header_insert_if_absent(
            HeaderName::from_static(HOST),
            HeaderValue::from_str(req.authority.as_str())?,
        );
        req.header_insert_if_absent(
            HeaderName::from_static(X_DATE),
            HeaderValue::try_from(format_iso8601(now))?,
        );
        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to avoid leaking.
            value.set_sensitive(true);
            req.headers
                .insert(HeaderName::from_static(X_SECURITY_TOKEN), value);
        }

        let payload_hash = req
            .header_get(&HeaderName::from_static(X_CONTENT_SHA256))?
            .unwrap_or(EMPTY_PAYLOAD_SHA256)
            .to_string();

        let signed_headers = match &self.signed_headers {
            Some(names) => {
                let mut names = names.clone();
                names.extend([HOST.to_string(), X_DATE.to_string()]);
                if cred.session_token.is_some() {
                    names.push(X_SECURITY_TOKEN.to_string());
                }
                Some(names)
            }
            None => None,
        };
        // Headers that will never be signed may carry any bytes.
        let headers = req.header_to_vec_by(|name| {
            !HEADERS_TO_IGNORE.contains(&name)
                && signed_headers
                    .as_ref()
                    .map_or(true, |names| names.iter().any(|v| v == name))
        })?;
        let signed_headers =
            signed_headers.unwrap_or_else(|| headers.iter().map(|(k, _)| k.clone()).collect());

        let input = SigningInput {
            method: req.method.as_str().to_string(),
            path: req.path.clone(),
            query: group_query(&req.query),
            headers,
            signed_headers,
            body: Vec::new(),
            region: self.region.clone(),
            service: self.service.clone(),
        };
        let authorization = sign_with_payload_hash(&input, &payload_hash, cred)?;
        debug!("signed request for service {} in {}", self.service, self.region);

        let mut authorization = HeaderValue::from_str(&authorization)?;
        authorization.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, authorization);

        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "volcengine doesn't support presigned requests",
            ));
        }
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "no valid credential found for volcengine",
            ));
        };

        let mut signed_req = SigningRequest::build(req)?;
        let result = self.sign(&mut signed_req, cred);

        // Apply to the request, even if signing failed.
        signed_req.apply(req);
        result
    }
}

/// Group repeated query keys into array values, keeping first-seen order.
fn group_query(query: &[(String, String)]) -> Vec<(String, QueryValue)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::with_capacity(query.len());
    for (k, v) in query {
        match grouped.iter_mut().find(|(key, _)| key == k) {
            Some((_, values)) => values.push(v.clone()),
            None => grouped.push((k.clone(), vec![v.clone()])),
        }
    }

    grouped
        .into_iter()
        .map(|(k, mut values)| {
            let value = if values.len() == 1 {
                QueryValue::Single(values.remove(0))
            } else {
                QueryValue::Multi(values)
            };
            (k, value)
        })
        .collect()
}
