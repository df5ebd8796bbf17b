use crate::{Config, Credential};
use async_trait::async_trait;
use std::sync::Arc;
use volcsign_core::{Context, ProvideCredential, Result};

/// ConfigCredentialProvider loads credential from a [`Config`].
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { config: cfg }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (&self.config.access_key_id, &self.config.secret_access_key)
        else {
            return Ok(None);
        };

        Ok(Some(Credential {
            access_key_id: ak.clone(),
            secret_access_key: sk.clone(),
            session_token: self.config.session_token.clone(),
            expires_in: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let cfg = Config {
            access_key_id: Some("ak".to_string()),
            secret_access_key: Some("sk".to_string()),
            session_token: Some("token".to_string()),
            ..Default::default()
        };

        let cred = ConfigCredentialProvider::new(Arc::new(cfg))
            .provide_credential(&Context::new())
            .await?
            .unwrap();
        assert_eq!(cred.access_key_id, "ak");
        assert_eq!(cred.secret_access_key, "sk");
        assert_eq!(cred.session_token.as_deref(), Some("token"));

        let cred = ConfigCredentialProvider::new(Arc::new(Config::default()))
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());

        Ok(())
    }
}
