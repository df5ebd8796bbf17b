use super::{init_signing_test, load_static_credential, send_signed_request};
use anyhow::Result;
use http::{Method, Request, StatusCode};
use log::warn;
use std::str::FromStr;

#[tokio::test]
async fn test_list_users() -> Result<()> {
    let Some((ctx, signer, url)) = init_signing_test() else {
        warn!("VOLCSIGN_VOLCENGINE_TEST is not set, skipped");
        return Ok(());
    };

    let cred = load_static_credential()?;

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!(
        "{url}/?Action=ListUsers&Version=2018-01-01&Limit=1"
    ))?;

    let (status, body) = send_signed_request(&ctx, &signer, req, &cred).await?;
    assert_eq!(StatusCode::OK, status, "{body}");
    Ok(())
}

#[tokio::test]
async fn test_list_users_with_wrong_secret() -> Result<()> {
    let Some((ctx, signer, url)) = init_signing_test() else {
        warn!("VOLCSIGN_VOLCENGINE_TEST is not set, skipped");
        return Ok(());
    };

    let mut cred = load_static_credential()?;
    cred.secret_access_key = "definitely-not-the-secret".to_string();

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = http::Uri::from_str(&format!(
        "{url}/?Action=ListUsers&Version=2018-01-01&Limit=1"
    ))?;

    let (status, _) = send_signed_request(&ctx, &signer, req, &cred).await?;
    assert_ne!(StatusCode::OK, status);
    Ok(())
}
