use crate::Credential;
use async_trait::async_trait;
use volcsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static Volcengine credentials.
///
/// This provider is used when you have the access key and secret key
/// directly and want to use them without any dynamic loading.
///
/// ```no_run
/// use volcsign_core::{Context, Signer};
/// use volcsign_volcengine::{RequestSigner, StaticCredentialProvider};
///
/// let signer = Signer::new(
///     Context::new(),
///     StaticCredentialProvider::new("AKLT...", "secret").with_session_token("STS..."),
///     RequestSigner::new("cv", "cn-north-1"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with access key and secret key.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
        }
    }

    /// Set the session token.
    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: self.session_token.clone(),
            expires_in: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestSigner;
    use volcsign_core::time::parse_iso8601;
    use volcsign_core::Signer;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new();

        let provider = StaticCredentialProvider::new("AKLTtest", "testSK");
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.access_key_id, "AKLTtest");
        assert_eq!(cred.secret_access_key, "testSK");
        assert!(cred.session_token.is_none());
        assert!(cred.expires_in.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_static_session_token_is_signed() -> anyhow::Result<()> {
        let signer = Signer::new(
            Context::new(),
            StaticCredentialProvider::new("AKLTtest", "testSK").with_session_token("STSToken"),
            RequestSigner::new("iam", "cn-beijing")
                .with_time(parse_iso8601("20240101T000000Z")?),
        );

        let (mut parts, _) =
            http::Request::get("https://iam.volcengineapi.com/?Action=ListUsers&Version=2018-01-01")
                .body(())?
                .into_parts();
        signer.sign(&mut parts, None).await?;

        assert_eq!(parts.headers["x-security-token"], "STSToken");
        assert_eq!(
            parts.headers[http::header::AUTHORIZATION],
            "HMAC-SHA256 Credential=AKLTtest/20240101/cn-beijing/iam/request, SignedHeaders=host;x-date;x-security-token, Signature=9d501e2c2b554fc95da2586335d132ab8a2d02cb0c97efabe33b7f8f63a71142"
        );

        Ok(())
    }
}
