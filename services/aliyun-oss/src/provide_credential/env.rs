use crate::{constants::*, Credential};
use async_trait::async_trait;
use volcsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads Aliyun credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `ALIBABA_CLOUD_ACCESS_KEY_ID`: the access key ID
/// - `ALIBABA_CLOUD_ACCESS_KEY_SECRET`: the access key secret
/// - `ALIBABA_CLOUD_SECURITY_TOKEN`: the security token (optional)
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let access_key_id = envs.get(ALIBABA_CLOUD_ACCESS_KEY_ID);
        let access_key_secret = envs.get(ALIBABA_CLOUD_ACCESS_KEY_SECRET);

        match (access_key_id, access_key_secret) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak.clone(),
                access_key_secret: sk.clone(),
                security_token: envs.get(ALIBABA_CLOUD_SECURITY_TOKEN).cloned(),
                expires_in: None,
            })),
            _ => Ok(None),
        }
    }
}
