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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Signature algorithm and the last component of every credential scope.
pub const ALGORITHM: &str = "HMAC-SHA256";
pub const SCOPE_TERMINATOR: &str = "request";

// Headers used in volcengine services.
pub const X_DATE: &str = "x-date";
pub const X_CONTENT_SHA256: &str = "x-content-sha256";
pub const X_SECURITY_TOKEN: &str = "x-security-token";
pub const HOST: &str = "host";

/// Headers that never take part in the signature, even if requested.
pub const HEADERS_TO_IGNORE: [&str; 6] = [
    "authorization",
    "content-type",
    "content-length",
    "user-agent",
    "presigned-expires",
    "expect",
];

/// Hex encoded SHA256 of the empty payload.
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

// Env values used in volcengine services.
pub const VOLCENGINE_ACCESS_KEY: &str = "VOLCENGINE_ACCESS_KEY";
pub const VOLCENGINE_SECRET_KEY: &str = "VOLCENGINE_SECRET_KEY";
pub const VOLCENGINE_SESSION_TOKEN: &str = "VOLCENGINE_SESSION_TOKEN";
pub const VOLCENGINE_REGION: &str = "VOLCENGINE_REGION";

// Legacy env values still honoured by the volcengine sdks.
pub const VOLC_ACCESSKEY: &str = "VOLC_ACCESSKEY";
pub const VOLC_SECRETKEY: &str = "VOLC_SECRETKEY";
pub const VOLC_SESSIONTOKEN: &str = "VOLC_SESSIONTOKEN";
pub const VOLC_REGION: &str = "VOLC_REGION";

/// Region used when neither config nor env names one.
pub const DEFAULT_REGION: &str = "cn-north-1";

/// AsciiSet for query encoding.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static VOLC_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
