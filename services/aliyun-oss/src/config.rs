use super::constants::*;
use std::fmt::{Debug, Formatter};
use volcsign_core::utils::Redact;
use volcsign_core::{Context, Error, Result};

/// Config carries all the configuration for Aliyun OSS uploads.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_ACCESS_KEY_ID`
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_ACCESS_KEY_SECRET`
    pub access_key_secret: Option<String>,
    /// `security_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_SECURITY_TOKEN`
    pub security_token: Option<String>,
    /// `bucket` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_OSS_BUCKET`
    pub bucket: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `ALIBABA_CLOUD_OSS_ENDPOINT`
    ///
    /// For example `https://oss-cn-beijing.aliyuncs.com`. Browser uploads
    /// are posted here.
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("security_token", &Redact::from(&self.security_token))
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_SECRET) {
            self.access_key_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_SECURITY_TOKEN) {
            self.security_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_OSS_BUCKET) {
            self.bucket.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_OSS_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }

    /// Public URL of an uploaded object.
    ///
    /// `https://oss-cn-beijing.aliyuncs.com` with bucket `gift` and key
    /// `upload/a.png` gives `https://gift.oss-cn-beijing.aliyuncs.com/upload/a.png`.
    pub fn object_url(&self, key: &str) -> Result<String> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| Error::config_invalid("bucket is required to build object url"))?;
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::config_invalid("endpoint is required to build object url"))?;

        let (scheme, host) = endpoint.split_once("://").unwrap_or(("https", endpoint));
        let host = host.trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint:?} has no host"
            )));
        }

        Ok(format!(
            "{scheme}://{bucket}.{host}/{}",
            key.trim_start_matches('/')
        ))
    }
}
