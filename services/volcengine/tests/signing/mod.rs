mod known_answers;
mod live;

use anyhow::Result;
use http::{Request, StatusCode};
use log::debug;
use reqwest::Client;
use std::env;
use volcsign_core::{Context, OsEnv, SignRequest};
use volcsign_volcengine::{Credential, RequestSigner};

/// Load static credential from environment variables
pub fn load_static_credential() -> Result<Credential> {
    let access_key = env::var("VOLCSIGN_VOLCENGINE_ACCESS_KEY")
        .expect("VOLCSIGN_VOLCENGINE_ACCESS_KEY must be set");
    let secret_key = env::var("VOLCSIGN_VOLCENGINE_SECRET_KEY")
        .expect("VOLCSIGN_VOLCENGINE_SECRET_KEY must be set");
    let session_token = env::var("VOLCSIGN_VOLCENGINE_SESSION_TOKEN").ok();

    Ok(Credential {
        access_key_id: access_key,
        secret_access_key: secret_key,
        session_token,
        expires_in: None,
    })
}

/// Initialize live test environment
pub fn init_signing_test() -> Option<(Context, RequestSigner, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VOLCSIGN_VOLCENGINE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let region = env::var("VOLCSIGN_VOLCENGINE_REGION").unwrap_or_else(|_| "cn-beijing".into());
    let url = env::var("VOLCSIGN_VOLCENGINE_URL")
        .unwrap_or_else(|_| "https://iam.volcengineapi.com".into());

    let context = Context::new().with_env(OsEnv);
    let signer = RequestSigner::new("iam", &region);

    Some((context, signer, url))
}

/// Send signed request and return response
pub async fn send_signed_request(
    ctx: &Context,
    signer: &RequestSigner,
    req: Request<String>,
    cred: &Credential,
) -> Result<(StatusCode, String)> {
    let (mut parts, body) = req.into_parts();
    signer
        .sign_request(ctx, &mut parts, Some(cred), None)
        .await
        .expect("sign request must succeed");
    let req = Request::from_parts(parts, body);

    debug!("signed request: {req:?}");

    let resp = Client::new().execute(req.try_into()?).await?;
    let status = resp.status();
    let text = resp.text().await?;
    debug!("got response: {status} {text}");

    Ok((status, text))
}
