//! Aliyun OSS browser upload signing for volcsign.
//!
//! Browsers upload straight to OSS with a multipart `POST` that carries a
//! base64 encoded policy document and its HMAC-SHA1 signature. This crate
//! builds and signs that policy so the secret never leaves the server.
//!
//! ## Example
//!
//! ```no_run
//! use volcsign_aliyun_oss::{object_key, Condition, Config, EnvCredentialProvider, PostPolicySigner};
//! use volcsign_core::time::now;
//! use volcsign_core::{Context, OsEnv, ProvideCredential};
//!
//! # async fn example() -> volcsign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let cred = EnvCredentialProvider::new()
//!     .provide_credential(&ctx)
//!     .await?
//!     .expect("credential must be set");
//!
//! let signer = PostPolicySigner::new();
//! let policy = signer
//!     .policy()?
//!     .with_condition(Condition::starts_with("key", "upload/"));
//! let signed = signer.sign(&policy, &cred)?;
//!
//! let key = object_key("upload/", "cat.png", now());
//! for (name, value) in signed.form_fields(&key) {
//!     println!("{name}: {value}");
//! }
//! println!("uploaded to {}", config.object_url(&key)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub use config::Config;

mod constants;

mod credential;
pub use credential::Credential;

mod post_policy;
pub use post_policy::object_key;
pub use post_policy::Condition;
pub use post_policy::PostPolicy;
pub use post_policy::PostPolicySigner;
pub use post_policy::SignedPostPolicy;

mod provide_credential;
pub use provide_credential::*;
