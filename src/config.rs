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

//! # Configuration
//!
//! Parsing of the configuration file implementation.
use std::path::PathBuf;

use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default Microsoft Graph endpoint.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com/v1.0/";

/// Default Microsoft identity platform authority.
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com/";

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Bearer token provider used for the Graph requests.
    #[serde(default)]
    pub auth: AuthSection,

    /// Microsoft Graph communication.
    #[serde(default)]
    pub graph: GraphSection,

    /// Profile (claims) resolution.
    #[serde(default)]
    pub profile: ProfileSection,
}

/// Profile claims resolution configuration.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ProfileSection {
    /// Identity provider schemes whose users are looked up in the directory.
    #[serde(default, deserialize_with = "csv")]
    pub schemes: Vec<String>,

    /// Identity provider scheme whose users get their group memberships
    /// resolved through Microsoft Graph.
    pub graph_scheme: Option<String>,

    /// Client that receives all claims of the subject unconditionally.
    pub trusted_client_id: Option<String>,

    /// Only issue claims of the requested types.
    #[serde(default)]
    pub filter_requested_claims: bool,
}

/// Microsoft Graph configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct GraphSection {
    /// Graph API base url. [`DEFAULT_GRAPH_URL`] when unset.
    pub base_url: Option<Url>,

    /// Timeout in seconds for a single Graph request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout: default_request_timeout(),
        }
    }
}

/// Bearer token provider configuration.
///
/// Either a static `access_token`, or the `tenant_id`, `client_id` and
/// `client_secret` for the client credentials grant must be given.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSection {
    /// Static access token.
    pub access_token: Option<SecretString>,

    /// Authority url. [`DEFAULT_AUTHORITY_URL`] when unset.
    pub authority_url: Option<Url>,

    /// Application (client) id.
    pub client_id: Option<String>,

    /// Application secret.
    pub client_secret: Option<SecretString>,

    /// Scope requested for the access token.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Directory (tenant) id.
    pub tenant_id: Option<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            access_token: None,
            authority_url: None,
            client_id: None,
            client_secret: None,
            scope: default_scope(),
            tenant_id: None,
        }
    }
}

pub fn csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?
        .split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(Into::into)
        .collect())
}

fn default_request_timeout() -> u64 {
    30
}

fn default_scope() -> String {
    "https://graph.microsoft.com/.default".into()
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("graph.request_timeout", "30")?
            .set_default("auth.scope", default_scope())?
            .set_default("profile.filter_requested_claims", "false")?;

        builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[profile]
schemes = b2c, b2c-signup
graph_scheme = aad
trusted_client_id = first-party
filter_requested_claims = true

[graph]
base_url = http://localhost:8080/v1.0/
request_timeout = 5

[auth]
tenant_id = tid
client_id = cid
client_secret = secret
"#
        )
        .unwrap();

        let cfg = Config::new(file.path().to_path_buf()).unwrap();
        assert_eq!(vec!["b2c", "b2c-signup"], cfg.profile.schemes);
        assert_eq!(Some("aad"), cfg.profile.graph_scheme.as_deref());
        assert_eq!(Some("first-party"), cfg.profile.trusted_client_id.as_deref());
        assert!(cfg.profile.filter_requested_claims);
        assert_eq!(
            Some("http://localhost:8080/v1.0/"),
            cfg.graph.base_url.as_ref().map(Url::as_str)
        );
        assert_eq!(5, cfg.graph.request_timeout);
        assert_eq!(Some("tid"), cfg.auth.tenant_id.as_deref());
        assert_eq!(
            Some("secret"),
            cfg.auth.client_secret.as_ref().map(|x| x.expose_secret())
        );
        assert_eq!("https://graph.microsoft.com/.default", cfg.auth.scope);
        assert!(cfg.auth.access_token.is_none());
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::try_from(config::Config::builder()).unwrap();
        assert!(cfg.profile.schemes.is_empty());
        assert!(cfg.profile.graph_scheme.is_none());
        assert!(cfg.profile.trusted_client_id.is_none());
        assert!(!cfg.profile.filter_requested_claims);
        assert!(cfg.graph.base_url.is_none());
        assert_eq!(30, cfg.graph.request_timeout);
    }

    #[test]
    fn test_missing_file() {
        let cfg = Config::new(PathBuf::from("/nonexistent/identity-claims.conf")).unwrap();
        assert!(cfg.profile.schemes.is_empty());
    }

    #[test]
    fn test_csv_override() {
        let builder = config::Config::builder()
            .set_override("profile.schemes", "one,,two ")
            .unwrap();
        let cfg = Config::try_from(builder).unwrap();
        assert_eq!(vec!["one", "two"], cfg.profile.schemes);
    }
}
