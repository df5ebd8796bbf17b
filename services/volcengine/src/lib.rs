//! Volcengine HMAC-SHA256 request signing.
//!
//! Volcengine OpenAPI services (IAM, visual/CV, ECS and others) authenticate
//! requests with an AWS-SigV4 style signature: a canonical request hashed
//! into a string to sign, signed with a key derived from the secret key,
//! date, region and service.
//!
//! This crate provides:
//!
//! - [`sign`], [`canonical_request`] and [`string_to_sign`]: the pure
//!   signature function over a [`SigningInput`].
//! - [`RequestSigner`]: signs `http::request::Parts` in place.
//! - [`Credential`], [`Config`] and the credential providers.
//!
//! ## Example
//!
//! ```no_run
//! use volcsign_core::{Context, OsEnv, Signer};
//! use volcsign_volcengine::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> volcsign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(),
//!     RequestSigner::new("iam", "cn-beijing"),
//! );
//!
//! let (mut parts, _) = http::Request::get(
//!     "https://iam.volcengineapi.com/?Action=ListUsers&Version=2018-01-01",
//! )
//! .body(())?
//! .into_parts();
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod canonical;
pub use canonical::canonical_request;
pub use canonical::generate_signing_key;
pub use canonical::payload_hash;
pub use canonical::sign;
pub use canonical::string_to_sign;
pub use canonical::QueryValue;
pub use canonical::SigningInput;

mod config;
pub use config::Config;

mod constants;
pub use constants::DEFAULT_REGION;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;
