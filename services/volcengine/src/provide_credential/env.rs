// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{constants::*, Credential};
use async_trait::async_trait;
use volcsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads Volcengine credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `VOLCENGINE_ACCESS_KEY` or `VOLC_ACCESSKEY`: the access key
/// - `VOLCENGINE_SECRET_KEY` or `VOLC_SECRETKEY`: the secret key
/// - `VOLCENGINE_SESSION_TOKEN` or `VOLC_SESSIONTOKEN`: the session token (optional)
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let access_key_id = ctx.env_var_any(&[VOLCENGINE_ACCESS_KEY, VOLC_ACCESSKEY]);
        let secret_access_key = ctx.env_var_any(&[VOLCENGINE_SECRET_KEY, VOLC_SECRETKEY]);

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak,
                secret_access_key: sk,
                session_token: ctx.env_var_any(&[VOLCENGINE_SESSION_TOKEN, VOLC_SESSIONTOKEN]),
                expires_in: None,
            })),
            _ => Ok(None),
        }
    }
}
