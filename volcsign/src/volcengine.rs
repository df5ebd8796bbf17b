//! Volcengine service support with convenience APIs

// Re-export all Volcengine signing types
pub use volcsign_volcengine::*;

use crate::{default_context, Signer};
use std::sync::Arc;

/// Default Volcengine Signer type with commonly used components
pub type DefaultSigner = Signer<Credential>;

/// Create a default Volcengine signer for `service`.
///
/// This function creates a signer with:
/// - Default context (OS environment)
/// - Default credential provider (env vars, then [`Config`] loaded from env)
/// - Request signer for `service` in the region named by `VOLCENGINE_REGION`
///   or `VOLC_REGION`, falling back to [`DEFAULT_REGION`]
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> volcsign::Result<()> {
/// let signer = volcsign::volcengine::default_signer("cv");
///
/// let mut req = http::Request::post(
///     "https://visual.volcengineapi.com/?Action=CVSync2AsyncGetResult&Version=2022-08-31",
/// )
/// .body(())?
/// .into_parts()
/// .0;
/// signer.sign(&mut req, None).await?;
/// # Ok(())
/// # }
/// ```
pub fn default_signer(service: &str) -> DefaultSigner {
    let ctx = default_context();
    let config = Config::default().from_env(&ctx);
    let signer = RequestSigner::new(service, config.region());
    let provider = DefaultCredentialProvider::new().with_config(Arc::new(config));
    Signer::new(ctx, provider, signer)
}
