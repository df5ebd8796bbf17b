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

use crate::constants::*;
use crate::Credential;
use log::debug;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use volcsign_core::hash::{base64_encode, base64_hmac_sha1};
use volcsign_core::time::{format_iso8601_millis, now, DateTime};
use volcsign_core::utils::Redact;
use volcsign_core::{Error, Result};

/// A condition an upload must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `["content-length-range", min, max]`
    ContentLengthRange(u64, u64),
    /// `["eq", "$field", "value"]`
    Eq(String, String),
    /// `["starts-with", "$field", "prefix"]`
    StartsWith(String, String),
}

impl Condition {
    /// The form field `field` must equal `value`.
    pub fn eq(field: &str, value: &str) -> Self {
        Condition::Eq(field.trim_start_matches('$').to_string(), value.to_string())
    }

    /// The form field `field` must start with `prefix`.
    pub fn starts_with(field: &str, prefix: &str) -> Self {
        Condition::StartsWith(field.trim_start_matches('$').to_string(), prefix.to_string())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        match self {
            Condition::ContentLengthRange(min, max) => {
                seq.serialize_element("content-length-range")?;
                seq.serialize_element(min)?;
                seq.serialize_element(max)?;
            }
            Condition::Eq(field, value) => {
                seq.serialize_element("eq")?;
                seq.serialize_element(&format!("${field}"))?;
                seq.serialize_element(value)?;
            }
            Condition::StartsWith(field, prefix) => {
                seq.serialize_element("starts-with")?;
                seq.serialize_element(&format!("${field}"))?;
                seq.serialize_element(prefix)?;
            }
        }
        seq.end()
    }
}

/// The policy document of an OSS browser upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPolicy {
    /// Uploads after this time are rejected.
    #[serde(serialize_with = "serialize_expiration")]
    pub expiration: DateTime,
    /// Conditions every upload must satisfy.
    pub conditions: Vec<Condition>,
}

fn serialize_expiration<S: Serializer>(
    t: &DateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601_millis(*t))
}

impl PostPolicy {
    /// Create a policy without conditions.
    pub fn new(expiration: DateTime) -> Self {
        Self {
            expiration,
            conditions: Vec::new(),
        }
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Compact JSON of this policy.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            Error::unexpected("failed to serialize post policy").with_source(e)
        })
    }
}

/// PostPolicySigner signs OSS browser upload policies.
///
/// - [PostObject](https://help.aliyun.com/zh/oss/developer-reference/postobject)
#[derive(Debug)]
pub struct PostPolicySigner {
    expires_in: Duration,
    max_content_length: u64,

    time: Option<DateTime>,
}

impl Default for PostPolicySigner {
    fn default() -> Self {
        Self::new()
    }
}

impl PostPolicySigner {
    /// Create a signer with a 5 minutes expiry and a 10 MiB upload limit.
    pub fn new() -> Self {
        Self {
            expires_in: Duration::from_secs(DEFAULT_EXPIRES_IN_SECS),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,

            time: None,
        }
    }

    /// How long the policy stays valid after signing.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// The largest object an upload may carry, in bytes.
    pub fn with_max_content_length(mut self, max: u64) -> Self {
        self.max_content_length = max;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign policies.
    /// Only use this function for testing or reproducible signatures.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build the default policy: expires `expires_in` after now and limits
    /// the content length to `0..=max_content_length`.
    pub fn policy(&self) -> Result<PostPolicy> {
        let now = self.time.unwrap_or_else(now);
        let expires_in = chrono::TimeDelta::from_std(self.expires_in).map_err(|e| {
            Error::config_invalid("post policy expiry is out of range").with_source(e)
        })?;

        Ok(PostPolicy::new(now + expires_in).with_condition(Condition::ContentLengthRange(
            0,
            self.max_content_length,
        )))
    }

    /// Sign a policy.
    ///
    /// `policy = base64(json)` and `signature = base64(hmac_sha1(secret, policy))`.
    pub fn sign(&self, policy: &PostPolicy, cred: &Credential) -> Result<SignedPostPolicy> {
        if cred.access_key_id.is_empty() || cred.access_key_secret.is_empty() {
            return Err(Error::credential_invalid(
                "access key id and secret are required to sign post policy",
            ));
        }

        let json = policy.to_json()?;
        debug!("calculated post policy: {json}");

        let policy = base64_encode(json.as_bytes());
        let signature = base64_hmac_sha1(cred.access_key_secret.as_bytes(), policy.as_bytes())?;

        Ok(SignedPostPolicy {
            access_key_id: cred.access_key_id.clone(),
            policy,
            signature,
            security_token: cred.security_token.clone(),
        })
    }
}

/// A signed policy, ready to be posted along with the file.
#[derive(Clone)]
pub struct SignedPostPolicy {
    /// Access key id that signed the policy.
    pub access_key_id: String,
    /// Base64 encoded policy document.
    pub policy: String,
    /// Base64 encoded HMAC-SHA1 signature of `policy`.
    pub signature: String,
    /// Security token of a temporary credential.
    pub security_token: Option<String>,
}

impl Debug for SignedPostPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedPostPolicy")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("policy", &self.policy)
            .field("signature", &self.signature)
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}

impl SignedPostPolicy {
    /// Multipart form fields to send before the `file` field.
    pub fn form_fields(&self, object_key: &str) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (FORM_KEY, object_key.to_string()),
            (FORM_ACCESS_KEY_ID, self.access_key_id.clone()),
            (FORM_POLICY, self.policy.clone()),
            (FORM_SIGNATURE, self.signature.clone()),
            (FORM_SUCCESS_ACTION_STATUS, "200".to_string()),
        ];
        if let Some(token) = &self.security_token {
            fields.push((FORM_SECURITY_TOKEN, token.clone()));
        }
        fields
    }
}

/// Build a unique object key: `{prefix}{unix_millis}_{file_name}`.
pub fn object_key(prefix: &str, file_name: &str, time: DateTime) -> String {
    format!("{prefix}{}_{file_name}", time.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use volcsign_core::ErrorKind;

    fn signing_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_default_policy_json() {
        let policy = PostPolicySigner::new()
            .with_time(signing_time())
            .policy()
            .unwrap();

        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"expiration":"2024-01-01T00:05:00.000Z","conditions":[["content-length-range",0,10485760]]}"#
        );
    }

    #[test]
    fn test_condition_json() {
        let policy = PostPolicy::new(signing_time())
            .with_condition(Condition::eq("$bucket", "gift-bucket"))
            .with_condition(Condition::starts_with("key", "upload/"));

        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"expiration":"2024-01-01T00:00:00.000Z","conditions":[["eq","$bucket","gift-bucket"],["starts-with","$key","upload/"]]}"#
        );
    }

    #[test]
    fn test_sign_default_policy() {
        let signer = PostPolicySigner::new().with_time(signing_time());
        let policy = signer.policy().unwrap();

        let signed = signer
            .sign(&policy, &Credential::new("testAK", "testSecret"))
            .unwrap();

        assert_eq!(
            signed.policy,
            "eyJleHBpcmF0aW9uIjoiMjAyNC0wMS0wMVQwMDowNTowMC4wMDBaIiwiY29uZGl0aW9ucyI6W1siY29udGVudC1sZW5ndGgtcmFuZ2UiLDAsMTA0ODU3NjBdXX0="
        );
        assert_eq!(signed.signature, "hYo2rfiFL4tYjo2vIrOQw0s12NE=");
    }

    #[test]
    fn test_sign_with_max_content_length() {
        let policy = PostPolicySigner::new()
            .with_time(signing_time())
            .with_expires_in(Duration::from_secs(60))
            .with_max_content_length(1024)
            .policy()
            .unwrap();

        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"expiration":"2024-01-01T00:01:00.000Z","conditions":[["content-length-range",0,1024]]}"#
        );
    }

    #[test]
    fn test_sign_without_secret() {
        let signer = PostPolicySigner::new().with_time(signing_time());
        let policy = signer.policy().unwrap();

        let err = signer
            .sign(&policy, &Credential::new("testAK", ""))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_form_fields() {
        let signed = SignedPostPolicy {
            access_key_id: "testAK".to_string(),
            policy: "cG9saWN5".to_string(),
            signature: "c2lnbmF0dXJl".to_string(),
            security_token: None,
        };

        assert_eq!(
            signed.form_fields("upload/a.png"),
            vec![
                ("key", "upload/a.png".to_string()),
                ("OSSAccessKeyId", "testAK".to_string()),
                ("policy", "cG9saWN5".to_string()),
                ("Signature", "c2lnbmF0dXJl".to_string()),
                ("success_action_status", "200".to_string()),
            ]
        );

        let signed = SignedPostPolicy {
            security_token: Some("STS.token".to_string()),
            ..signed
        };
        assert_eq!(
            signed.form_fields("upload/a.png").last(),
            Some(&("x-oss-security-token", "STS.token".to_string()))
        );
    }

    #[test]
    fn test_object_key() {
        assert_eq!(
            object_key("upload/", "cat.png", signing_time()),
            "upload/1704067200000_cat.png"
        );
    }
}
