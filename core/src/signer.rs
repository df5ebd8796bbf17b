use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Signer is the main struct used to sign the request.
///
/// It loads a credential through its provider on first use, caches it, and
/// reloads it once [`SigningCredential::is_valid`] turns false.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Signing request.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let credential = self.lock_credential()?.clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.lock_credential()? = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, credential.as_ref(), expires_in)
            .await
    }

    fn lock_credential(&self) -> Result<MutexGuard<'_, Option<K>>> {
        self.credential
            .lock()
            .map_err(|_| Error::unexpected("credential cache lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use http::request::Parts;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(bool);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            self.0
        }
    }

    #[derive(Debug)]
    struct CountingProvider {
        valid: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProvideCredential for CountingProvider {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential(self.valid)))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut Parts,
            credential: Option<&Self::Credential>,
            _: Option<Duration>,
        ) -> Result<()> {
            if credential.is_none() {
                return Err(Error::credential_invalid("missing credential"));
            }
            req.headers
                .insert("x-signed", http::HeaderValue::from_static("yes"));
            Ok(())
        }
    }

    fn parts() -> Parts {
        http::Request::get("https://open.volcengineapi.com/")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_signer_caches_valid_credential() {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                valid: true,
                calls: calls.clone(),
            },
            HeaderSigner,
        );

        let mut req = parts();
        signer.sign(&mut req, None).await.unwrap();
        signer.sign(&mut parts(), None).await.unwrap();

        assert_eq!(req.headers["x-signed"], "yes");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signer_poisoned_cache_is_unexpected() {
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                valid: true,
                calls: Arc::new(AtomicUsize::new(0)),
            },
            HeaderSigner,
        );

        let cache = signer.credential.clone();
        let _ = std::thread::spawn(move || {
            let _guard = cache.lock().unwrap();
            panic!("poison the credential cache");
        })
        .join();

        let err = signer.sign(&mut parts(), None).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Unexpected);
    }

    #[tokio::test]
    async fn test_signer_reloads_invalid_credential() {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            CountingProvider {
                valid: false,
                calls: calls.clone(),
            },
            HeaderSigner,
        );

        signer.sign(&mut parts(), None).await.unwrap();
        signer.sign(&mut parts(), None).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
