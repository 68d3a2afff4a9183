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

//! # Microsoft Graph
//!
//! Group memberships of Azure AD users are resolved through the Graph
//! `users/{id}/memberOf` endpoint. Only the `displayName` of the directory
//! objects is requested.
use std::sync::Arc;
use std::time::Duration;

use derive_builder::Builder;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

pub mod error;
pub mod types;

use crate::auth::AuthenticationProvider;
use crate::config::{Config, DEFAULT_GRAPH_URL};
use crate::error::BuilderError;

pub use error::GraphError;
pub use types::{DirectoryObject, MemberOfResponse};

/// Microsoft Graph client.
#[derive(Builder, Clone)]
#[builder(build_fn(error = "BuilderError"))]
pub struct GraphClient {
    /// Graph API base url (i.e. `https://graph.microsoft.com/v1.0/`).
    base_url: Url,

    /// Shared http client.
    http_client: Arc<Client>,

    /// Timeout of a single request.
    #[builder(default = "Duration::from_secs(30)")]
    request_timeout: Duration,

    /// Bearer token provider authenticating the requests.
    token_provider: Arc<dyn AuthenticationProvider>,
}

impl GraphClient {
    pub fn builder() -> GraphClientBuilder {
        GraphClientBuilder::default()
    }

    /// Construct the client from the `[graph]` configuration section.
    pub fn from_config(
        config: &Config,
        http_client: Arc<Client>,
        token_provider: Arc<dyn AuthenticationProvider>,
    ) -> Result<Self, GraphError> {
        let base_url = match &config.graph.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_GRAPH_URL)?,
        };
        Ok(Self::builder()
            .base_url(base_url)
            .http_client(http_client)
            .request_timeout(Duration::from_secs(config.graph.request_timeout))
            .token_provider(token_provider)
            .build()?)
    }

    /// Url of the `memberOf` listing of the user.
    fn member_of_url(&self, object_id: &str) -> Result<Url, GraphError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GraphError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["users", object_id, "memberOf"]);
        url.set_query(Some("$select=displayName"));
        Ok(url)
    }

    /// List groups and directory roles the user is a direct member of.
    ///
    /// Only the first result page is fetched.
    ///
    /// # Arguments
    /// * `object_id` - Azure AD object id of the user.
    ///
    /// # Returns
    /// * Success with the directory objects of the response `value`.
    /// * `GraphError::Authentication` when the request cannot be
    ///   authenticated.
    /// * `GraphError::Request` on the transport failure or timeout.
    /// * `GraphError::UnexpectedStatus` when Graph does not respond with
    ///   success.
    /// * `GraphError::Parse` when the body is not the expected json.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_member_of(&self, object_id: &str) -> Result<Vec<DirectoryObject>, GraphError> {
        let mut request = self
            .http_client
            .get(self.member_of_url(object_id)?)
            .timeout(self.request_timeout)
            .build()?;
        self.token_provider
            .authenticate_request(&mut request)
            .await?;

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!("Graph returned {}", status);
            return Err(GraphError::UnexpectedStatus { status, body });
        }

        let data: MemberOfResponse = serde_json::from_str(&body)?;
        if data.next_link.is_some() {
            debug!("Graph membership listing is paged, only the first page is used");
        }
        trace!("Graph returned {} directory objects", data.value.len());
        Ok(data.value)
    }
}
