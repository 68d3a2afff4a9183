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

//! # Bearer token provider
//!
//! Outgoing requests to Microsoft Graph are authenticated by an
//! [`AuthenticationProvider`] that augments the request with the
//! `Authorization` header. Two providers are available:
//!
//! - [`StaticTokenProvider`] with a preconfigured access token.
//! - [`ClientCredentialsProvider`] exchanging the application credentials for
//!   an access token using the OAuth2 client credentials grant.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

mod client_credentials;
pub mod error;
#[cfg(test)]
pub mod mock;
mod static_token;

use crate::config::Config;

pub use client_credentials::{ClientCredentialsProvider, ClientCredentialsProviderBuilder};
pub use error::AuthProviderError;
#[cfg(test)]
pub use mock::MockTokenProvider;
pub use static_token::StaticTokenProvider;

/// Bearer token provider interface.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Authenticate the outgoing request.
    async fn authenticate_request(&self, request: &mut Request) -> Result<(), AuthProviderError>;
}

/// Construct the bearer token provider from the configuration.
///
/// The static access token takes precedence over the client credentials. The
/// token requests of the client credentials grant are sent with the shared
/// `http_client` and honor the `[graph]` request timeout.
///
/// # Returns
/// * `AuthProviderError::NotConfigured` when neither the access token nor the
///   complete set of the client credentials is configured.
pub fn from_config(
    config: &Config,
    http_client: Arc<Client>,
) -> Result<Arc<dyn AuthenticationProvider>, AuthProviderError> {
    let auth = &config.auth;
    if let Some(token) = &auth.access_token {
        debug!("Using the static bearer token provider");
        return Ok(Arc::new(StaticTokenProvider::new(token.clone())));
    }
    match (&auth.tenant_id, &auth.client_id, &auth.client_secret) {
        (Some(tenant_id), Some(client_id), Some(client_secret)) => {
            debug!("Using the client credentials bearer token provider");
            let mut builder = ClientCredentialsProvider::builder();
            builder
                .tenant_id(tenant_id.clone())
                .client_id(client_id.clone())
                .client_secret(client_secret.clone())
                .scope(auth.scope.clone())
                .http_client(http_client)
                .request_timeout(Duration::from_secs(config.graph.request_timeout));
            if let Some(authority_url) = &auth.authority_url {
                builder.authority_url(authority_url.clone());
            }
            Ok(Arc::new(builder.build()?))
        }
        _ => Err(AuthProviderError::NotConfigured(
            "either `access_token` or `tenant_id`, `client_id` and `client_secret` must be set"
                .into(),
        )),
    }
}

/// Set the `Authorization: Bearer` header on the request.
pub(crate) fn set_bearer(request: &mut Request, token: &SecretString) -> Result<(), AuthProviderError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}
