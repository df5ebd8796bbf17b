use anyhow::Result;
use http::header::AUTHORIZATION;
use http::{Method, Request};
use pretty_assertions::assert_eq;
use test_case::test_case;
use volcsign_core::time::parse_iso8601;
use volcsign_core::{Context, SignRequest};
use volcsign_volcengine::{payload_hash, Credential, RequestSigner};

async fn sign(
    signer: RequestSigner,
    req: Request<String>,
    cred: &Credential,
) -> Result<String> {
    let (mut parts, _) = req.into_parts();
    signer
        .sign_request(&Context::new(), &mut parts, Some(cred), None)
        .await?;
    Ok(parts.headers[AUTHORIZATION].to_str()?.to_string())
}

#[tokio::test]
async fn test_post_with_json_body() -> Result<()> {
    let body = r#"{"req_key":"jimeng_vgfm_i2v_l20","task_id":"7392616336519610409"}"#;
    let req = Request::builder()
        .method(Method::POST)
        .uri("https://visual.volcengineapi.com/?Action=CVSync2AsyncGetResult&Version=2022-08-31")
        .header("Content-Type", "application/json")
        .header("X-Content-Sha256", payload_hash(body.as_bytes()))
        .body(body.to_string())?;

    let signer = RequestSigner::new("cv", "cn-north-1")
        .with_time(parse_iso8601("20240315T081530Z")?);
    let authorization = sign(signer, req, &Credential::new("testAK", "testSK")).await?;

    assert_eq!(
        authorization,
        "HMAC-SHA256 Credential=testAK/20240315/cn-north-1/cv/request, SignedHeaders=host;x-content-sha256;x-date, Signature=6044f23410823ca1fb9f031293414beab6ebe5bdb6effe23250d4182d7011024"
    );
    Ok(())
}

#[test_case(
    "https://open.volcengineapi.com/?Filter=b%20c&Action=Describe&Filter=a";
    "repeated keys"
)]
#[test_case(
    "https://open.volcengineapi.com/?Action=Describe&Filter=a&Filter=b+c";
    "sorted with plus"
)]
#[tokio::test]
async fn test_repeated_query_keys(uri: &str) -> Result<()> {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("X-Custom", "  a   b  ")
        .body(String::new())?;

    let signer = RequestSigner::new("ecs", "cn-beijing")
        .with_time(parse_iso8601("20240101T000000Z")?);
    let authorization = sign(signer, req, &Credential::new("testAK", "testSK")).await?;

    assert_eq!(
        authorization,
        "HMAC-SHA256 Credential=testAK/20240101/cn-beijing/ecs/request, SignedHeaders=host;x-custom;x-date, Signature=13e27a33380ca0bb678dcdd3261599ede1770cb4b3a4585773bbf0c687a95322"
    );
    Ok(())
}

#[tokio::test]
async fn test_existing_x_date_is_kept() -> Result<()> {
    let req = Request::builder()
        .method(Method::GET)
        .uri("https://iam.volcengineapi.com/?Action=ListPolicies&Version=2018-01-01")
        .header("X-Date", "20240101T000000Z")
        .body(String::new())?;

    // The request carries its own X-Date, the signer clock is ignored.
    let signer = RequestSigner::new("iam", "cn-beijing")
        .with_time(parse_iso8601("20991231T235959Z")?);
    let authorization = sign(signer, req, &Credential::new("testAK", "testSK")).await?;

    assert!(authorization.ends_with(
        "Signature=81dfe9534f001201d879748750e73bcf7f4623e8ce0b9ce927a63ef846e312dc"
    ));
    Ok(())
}
