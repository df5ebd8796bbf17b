//! Signing API requests without effort.
//!
//! `volcsign` re-exports [`volcsign_core`] and, behind features, every
//! service crate:
//!
//! - `volcengine` (default): Volcengine HMAC-SHA256 request signing.
//! - `aliyun` (default): Aliyun OSS browser upload policies.
//!
//! ```no_run
//! # async fn example() -> volcsign::Result<()> {
//! let signer = volcsign::volcengine::default_signer("iam");
//!
//! let mut req = http::Request::get(
//!     "https://iam.volcengineapi.com/?Action=ListUsers&Version=2018-01-01",
//! )
//! .body(())?
//! .into_parts()
//! .0;
//! signer.sign(&mut req, None).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use volcsign_core::*;

#[cfg(feature = "aliyun")]
pub mod aliyun;

#[cfg(feature = "volcengine")]
pub mod volcengine;

/// Context that reads configuration from the process environment.
pub fn default_context() -> Context {
    Context::new().with_env(OsEnv)
}
