use std::collections::HashMap;

use anyhow::Result;
use chrono::TimeZone;
use pretty_assertions::assert_eq;
use volcsign_aliyun_oss::{
    object_key, Condition, Config, EnvCredentialProvider, PostPolicySigner,
};
use volcsign_core::{Context, ProvideCredential, StaticEnv};

fn context() -> Context {
    Context::new().with_env(StaticEnv {
        envs: HashMap::from_iter([
            ("ALIBABA_CLOUD_ACCESS_KEY_ID".to_string(), "testAK".to_string()),
            (
                "ALIBABA_CLOUD_ACCESS_KEY_SECRET".to_string(),
                "testSecret".to_string(),
            ),
            ("ALIBABA_CLOUD_OSS_BUCKET".to_string(), "gift-bucket".to_string()),
            (
                "ALIBABA_CLOUD_OSS_ENDPOINT".to_string(),
                "https://oss-cn-beijing.aliyuncs.com".to_string(),
            ),
        ]),
    })
}

#[tokio::test]
async fn test_browser_upload_form() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = context();
    let config = Config::default().from_env(&ctx);
    let cred = EnvCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");

    let time = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let signer = PostPolicySigner::new().with_time(time);
    let policy = signer
        .policy()?
        .with_condition(Condition::eq("bucket", config.bucket.as_deref().unwrap()))
        .with_condition(Condition::starts_with("key", "upload/"));
    let signed = signer.sign(&policy, &cred)?;

    let key = object_key("upload/", "cat.png", time);
    let fields: HashMap<_, _> = signed.form_fields(&key).into_iter().collect();

    assert_eq!(fields["key"], "upload/1704067200000_cat.png");
    assert_eq!(fields["OSSAccessKeyId"], "testAK");
    assert_eq!(
        fields["policy"],
        "eyJleHBpcmF0aW9uIjoiMjAyNC0wMS0wMVQwMDowNTowMC4wMDBaIiwiY29uZGl0aW9ucyI6W1siY29udGVudC1sZW5ndGgtcmFuZ2UiLDAsMTA0ODU3NjBdLFsiZXEiLCIkYnVja2V0IiwiZ2lmdC1idWNrZXQiXSxbInN0YXJ0cy13aXRoIiwiJGtleSIsInVwbG9hZC8iXV19"
    );
    assert_eq!(fields["Signature"], "JzhuNDRGYFwlEU4CMPMbdkyOngc=");
    assert_eq!(fields["success_action_status"], "200");
    assert!(!fields.contains_key("x-oss-security-token"));

    assert_eq!(
        config.object_url(&key)?,
        "https://gift-bucket.oss-cn-beijing.aliyuncs.com/upload/1704067200000_cat.png"
    );
    Ok(())
}
