// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use reqwest::Request;
use secrecy::SecretString;

use crate::auth::{AuthProviderError, AuthenticationProvider, set_bearer};

/// Bearer token provider with a preconfigured access token.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new<T: Into<SecretString>>(token: T) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthenticationProvider for StaticTokenProvider {
    async fn authenticate_request(&self, request: &mut Request) -> Result<(), AuthProviderError> {
        set_bearer(request, &self.token)
    }
}
