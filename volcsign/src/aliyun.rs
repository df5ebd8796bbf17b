//! Aliyun OSS service support with convenience APIs

// Re-export all Aliyun OSS signing types
pub use volcsign_aliyun_oss::*;

use crate::default_context;

/// Load the OSS [`Config`] from the process environment.
pub fn default_config() -> Config {
    Config::default().from_env(&default_context())
}
