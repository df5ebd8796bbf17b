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

// Env values used in aliyun services.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
pub const ALIBABA_CLOUD_SECURITY_TOKEN: &str = "ALIBABA_CLOUD_SECURITY_TOKEN";
pub const ALIBABA_CLOUD_OSS_BUCKET: &str = "ALIBABA_CLOUD_OSS_BUCKET";
pub const ALIBABA_CLOUD_OSS_ENDPOINT: &str = "ALIBABA_CLOUD_OSS_ENDPOINT";

// Form fields of an OSS browser upload.
pub const FORM_KEY: &str = "key";
pub const FORM_ACCESS_KEY_ID: &str = "OSSAccessKeyId";
pub const FORM_POLICY: &str = "policy";
pub const FORM_SIGNATURE: &str = "Signature";
pub const FORM_SUCCESS_ACTION_STATUS: &str = "success_action_status";
pub const FORM_SECURITY_TOKEN: &str = "x-oss-security-token";

/// Policies expire 5 minutes after signing unless told otherwise.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 5 * 60;
/// Uploads are capped at 10 MiB unless told otherwise.
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;
