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

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use derive_builder::Builder;
use reqwest::{Client, Request};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{AuthProviderError, AuthenticationProvider, set_bearer};
use crate::config::DEFAULT_AUTHORITY_URL;
use crate::error::BuilderError;

/// Time before the token expiration when it is already renewed.
const EXPIRATION_LEEWAY_SECONDS: i64 = 30;

/// Bearer token provider using the OAuth2 client credentials grant.
///
/// The access token is cached until shortly before it expires.
#[derive(Builder, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct ClientCredentialsProvider {
    /// Authority url. [`DEFAULT_AUTHORITY_URL`] when unset.
    #[builder(default, setter(into, strip_option))]
    authority_url: Option<Url>,

    /// Application (client) id.
    client_id: String,

    /// Application secret.
    client_secret: SecretString,

    /// Http client.
    #[builder(default)]
    http_client: Arc<Client>,

    /// Timeout of the token request.
    #[builder(default = "Duration::from_secs(30)")]
    request_timeout: Duration,

    /// Requested scope.
    #[builder(default = "\"https://graph.microsoft.com/.default\".into()")]
    scope: String,

    /// Directory (tenant) id.
    tenant_id: String,

    /// Cached access token.
    #[builder(setter(skip))]
    token: RwLock<Option<CachedToken>>,
}

#[derive(Debug)]
struct CachedToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at > Utc::now() + TimeDelta::seconds(EXPIRATION_LEEWAY_SECONDS)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    #[serde(default)]
    expires_in: i64,
}

impl ClientCredentialsProvider {
    pub fn builder() -> ClientCredentialsProviderBuilder {
        ClientCredentialsProviderBuilder::default()
    }

    /// Token endpoint of the tenant.
    fn token_url(&self) -> Result<Url, AuthProviderError> {
        let authority = match &self.authority_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_AUTHORITY_URL)?,
        };
        Ok(authority.join(&format!("{}/oauth2/v2.0/token", self.tenant_id))?)
    }

    /// Get the valid access token, requesting a new one when necessary.
    #[tracing::instrument(level = "debug", skip(self), fields(client_id = %self.client_id))]
    async fn access_token(&self) -> Result<SecretString, AuthProviderError> {
        {
            let read_guard = self.token.read().await;
            if let Some(token) = read_guard.as_ref()
                && token.is_fresh()
            {
                trace!("Using cached access token");
                return Ok(token.value.clone());
            }
        }

        let mut write_guard = self.token.write().await;
        // Concurrent request may have renewed the token already.
        if let Some(token) = write_guard.as_ref()
            && token.is_fresh()
        {
            return Ok(token.value.clone());
        }

        debug!("Requesting new access token");
        let response = self
            .http_client
            .post(self.token_url()?)
            .timeout(self.request_timeout)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Token endpoint returned {}", status);
            return Err(AuthProviderError::TokenEndpoint { status, body });
        }

        let data: TokenResponse = response.json().await?;
        let token = CachedToken {
            value: data.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(data.expires_in),
        };
        let value = token.value.clone();
        *write_guard = Some(token);
        Ok(value)
    }
}

#[async_trait]
impl AuthenticationProvider for ClientCredentialsProvider {
    async fn authenticate_request(&self, request: &mut Request) -> Result<(), AuthProviderError> {
        let token = self.access_token().await?;
        set_bearer(request, &token)
    }
}
