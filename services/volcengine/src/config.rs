use crate::constants::*;
use std::fmt::{Debug, Formatter};
use volcsign_core::utils::Redact;
use volcsign_core::Context;

/// Config carries all the configuration for Volcengine services.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `VOLCENGINE_ACCESS_KEY`, then `VOLC_ACCESSKEY`
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `VOLCENGINE_SECRET_KEY`, then `VOLC_SECRETKEY`
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `VOLCENGINE_SESSION_TOKEN`, then `VOLC_SESSIONTOKEN`
    pub session_token: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `VOLCENGINE_REGION`, then `VOLC_REGION`
    pub region: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var_any(&[VOLCENGINE_ACCESS_KEY, VOLC_ACCESSKEY]) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var_any(&[VOLCENGINE_SECRET_KEY, VOLC_SECRETKEY]) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var_any(&[VOLCENGINE_SESSION_TOKEN, VOLC_SESSIONTOKEN]) {
            self.session_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var_any(&[VOLCENGINE_REGION, VOLC_REGION]) {
            self.region.get_or_insert(v);
        }

        self
    }

    /// The configured region, or [`DEFAULT_REGION`].
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}
