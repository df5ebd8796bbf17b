//! Sign an IAM `ListUsers` request with credentials from the environment.
//!
//! ```shell
//! VOLCENGINE_ACCESS_KEY=... VOLCENGINE_SECRET_KEY=... cargo run --example sign_iam_request
//! ```

use std::sync::Arc;

use anyhow::Result;
use volcsign_core::{Context, OsEnv, Signer};
use volcsign_volcengine::{Config, DefaultCredentialProvider, RequestSigner};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new().with_config(Arc::new(config.clone())),
        RequestSigner::new("iam", config.region()),
    );

    let (mut parts, _) =
        http::Request::get("https://iam.volcengineapi.com/?Action=ListUsers&Version=2018-01-01")
            .body(())?
            .into_parts();
    signer.sign(&mut parts, None).await?;

    for (name, value) in parts.headers.iter() {
        if value.is_sensitive() {
            println!("{name}: <redacted>");
        } else {
            println!("{name}: {}", value.to_str()?);
        }
    }

    Ok(())
}
