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

//! # Claims enrichment for OpenID Connect token issuance
//!
//! The identity provider issuing the tokens for the applications delegates
//! the decision which claims end up in the token to a profile service. This
//! crate implements such a profile service for users stored in the Azure AD
//! B2C directory and users of the organization tenant whose group membership
//! is known to Microsoft Graph.
//!
//! The crate is organized in the following modules:
//!
//! - [`claims`]: the claim and subject types together with the JSON claim
//!   selection helper.
//! - [`directory`]: the directory service interface returning the profile
//!   and the roles of the user.
//! - [`auth`]: bearer token providers authenticating requests to Microsoft
//!   Graph.
//! - [`graph`]: the Microsoft Graph client resolving the group membership.
//! - [`profile`]: the profile provider combining everything above.
//! - [`config`]: parsing of the configuration file.
//!
//! A typical setup looks like:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use identity_claims::directory::DirectoryApi;
//! # async fn run(directory: Arc<dyn DirectoryApi>) -> eyre::Result<()> {
//! use identity_claims::claims::{Claim, Subject};
//! use identity_claims::config::Config;
//! use identity_claims::profile::{ProfileApi, ProfileDataRequest, ProfileProvider};
//!
//! let config = Config::new("/etc/identity/claims.conf".into())?;
//! let provider = ProfileProvider::new(&config, directory)?;
//!
//! let subject = Subject::new([Claim::new("sub", "uid"), Claim::new("idp", "b2c")]);
//! let mut request = ProfileDataRequest::new("spa", subject, ["name", "role"]);
//! provider.get_profile_data(&mut request).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod claims;
pub mod config;
pub mod directory;
pub mod error;
pub mod graph;
pub mod profile;
