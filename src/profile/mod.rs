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

//! # Profile provider
//!
//! The profile provider is invoked by the identity provider runtime whenever
//! a token is issued. It decides which additional claims of the subject are
//! attached to the token:
//!
//! 1. The trusted client receives all claims of the subject unchanged.
//! 2. Users authenticated by one of the directory schemes get their profile
//!    (`name`, `family_name`, `given_name`, `phone_number`) from the directory
//!    service, plus their directory roles when `role` is requested.
//! 3. Users authenticated by the Graph scheme get their `oid` echoed and one
//!    `role` claim per group they are a member of, resolved through Microsoft
//!    Graph.
//!
//! Steps are independent and executed in that order. Nothing happens when no
//! claim types are requested.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use derive_builder::Builder;
use reqwest::Client;
use tracing::{debug, trace};

pub mod error;
pub mod types;

use crate::auth;
use crate::claims::{Claim, GRAPH_ISSUER, OBJECT_ID, ROLE, VALUE_TYPE_STRING};
use crate::config::{Config, ProfileSection};
use crate::directory::DirectoryApi;
use crate::error::BuilderError;
use crate::graph::GraphClient;

pub use error::{ErrorKind, ProfileProviderError};
pub use types::{IsActiveRequest, ProfileDataRequest};

/// Profile service interface consumed by the identity provider runtime.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Resolve the claims of the subject and append them to the request.
    async fn get_profile_data(
        &self,
        request: &mut ProfileDataRequest,
    ) -> Result<(), ProfileProviderError>;

    /// Determine whether the subject may receive tokens.
    async fn is_active(&self, request: &mut IsActiveRequest) -> Result<(), ProfileProviderError>;
}

/// Profile provider.
#[derive(Builder, Clone)]
#[builder(build_fn(error = "BuilderError"))]
pub struct ProfileProvider {
    /// Claims resolution configuration.
    #[builder(default)]
    config: ProfileSection,

    /// Directory service.
    directory: Arc<dyn DirectoryApi>,

    /// Microsoft Graph client.
    graph: GraphClient,
}

impl ProfileProvider {
    pub fn builder() -> ProfileProviderBuilder {
        ProfileProviderBuilder::default()
    }

    /// Construct the provider from the configuration.
    ///
    /// One http client is shared by the bearer token provider and the Graph
    /// client.
    pub fn new(
        config: &Config,
        directory: Arc<dyn DirectoryApi>,
    ) -> Result<Self, ProfileProviderError> {
        let http_client = Arc::new(
            Client::builder()
                .gzip(true)
                .pool_idle_timeout(Duration::from_secs(90))
                .build()?,
        );
        let token_provider = auth::from_config(config, http_client.clone())?;
        let graph = GraphClient::from_config(config, http_client, token_provider)?;
        Ok(Self::builder()
            .config(config.profile.clone())
            .directory(directory)
            .graph(graph)
            .build()?)
    }

    /// Append the resolved claims honoring the requested claim types filter.
    fn issue(&self, request: &mut ProfileDataRequest, claims: Vec<Claim>) {
        trace!("Issuing {} claims", claims.len());
        if self.config.filter_requested_claims {
            request.add_requested_claims(claims);
        } else {
            request.add_claims(claims);
        }
    }

    /// Profile claims of the directory user.
    ///
    /// All directory lookups must succeed before any claim is returned.
    ///
    /// # Arguments
    /// * `subject_id` - stable identifier of the subject.
    /// * `with_roles` - whether the directory roles are resolved as well.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_directory_claims(
        &self,
        subject_id: &str,
        with_roles: bool,
    ) -> Result<Vec<Claim>, ProfileProviderError> {
        let user = self
            .directory
            .get_user_by_object_id(subject_id)
            .await?
            .ok_or_else(|| ProfileProviderError::UserNotFound(subject_id.to_string()))?;
        let mut claims = user.to_claims();

        if with_roles {
            let roles = self.directory.get_user_roles(subject_id).await?;
            claims.extend(
                roles
                    .into_iter()
                    .filter(|role| !role.is_empty())
                    .map(|role| Claim::new(ROLE, role)),
            );
        }
        Ok(claims)
    }

    /// `oid` and group membership claims resolved through Microsoft Graph.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_graph_claims(&self, object_id: &str) -> Result<Vec<Claim>, ProfileProviderError> {
        let groups = self.graph.list_member_of(object_id).await?;
        let mut claims = vec![Claim::new(OBJECT_ID, object_id)];
        claims.extend(
            groups
                .into_iter()
                .filter_map(|group| group.display_name)
                .filter(|name| !name.is_empty())
                .map(|name| Claim {
                    claim_type: ROLE.into(),
                    value: name,
                    value_type: Some(VALUE_TYPE_STRING.into()),
                    issuer: Some(GRAPH_ISSUER.into()),
                }),
        );
        Ok(claims)
    }
}

#[async_trait]
impl ProfileApi for ProfileProvider {
    #[tracing::instrument(level = "debug", skip(self, request), fields(client_id = %request.client_id))]
    async fn get_profile_data(
        &self,
        request: &mut ProfileDataRequest,
    ) -> Result<(), ProfileProviderError> {
        if request.requested_claim_types.is_empty() {
            trace!("No claim types requested");
            return Ok(());
        }

        if self.config.trusted_client_id.as_deref() == Some(request.client_id.as_str()) {
            debug!("Issuing all subject claims to the trusted client");
            let claims = request.subject.claims.clone();
            self.issue(request, claims);
        }

        let idp = request.subject.identity_provider().map(String::from);

        if let Some(idp) = &idp
            && self.config.schemes.contains(idp)
        {
            debug!("Subject authenticated by the directory scheme {}", idp);
            let subject_id = request
                .subject
                .subject_id()
                .ok_or(ProfileProviderError::SubjectIdMissing)?
                .to_string();
            let claims = self
                .get_directory_claims(&subject_id, request.requested_claim_types.contains(ROLE))
                .await?;
            self.issue(request, claims);
        }

        if idp.is_some() && idp.as_deref() == self.config.graph_scheme.as_deref() {
            match request.subject.find_first(OBJECT_ID).map(String::from) {
                Some(object_id) => {
                    debug!("Subject authenticated by the Graph scheme");
                    let claims = self.get_graph_claims(&object_id).await?;
                    self.issue(request, claims);
                }
                None => {
                    debug!("Subject of the Graph scheme has no object id, skipping");
                }
            }
        }

        Ok(())
    }

    async fn is_active(&self, request: &mut IsActiveRequest) -> Result<(), ProfileProviderError> {
        request.is_active = true;
        Ok(())
    }
}
