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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::claims::{IDENTITY_PROVIDER, SUBJECT};
use crate::error::BuilderError;

/// Single claim.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct Claim {
    /// Claim type (i.e. `name`, `role`).
    #[serde(rename = "type")]
    pub claim_type: String,

    /// Claim value.
    pub value: String,

    /// Type of the claim value.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Issuer of the claim when it is not the identity provider itself.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl Claim {
    pub fn new<T: Into<String>, V: Into<String>>(claim_type: T, value: V) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            value_type: None,
            issuer: None,
        }
    }

    pub fn builder() -> ClaimBuilder {
        ClaimBuilder::default()
    }
}

/// Authenticated principal for whom the token is being issued.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Subject {
    /// Claims established during the authentication.
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl Subject {
    pub fn new<I: IntoIterator<Item = Claim>>(claims: I) -> Self {
        Self {
            claims: claims.into_iter().collect(),
        }
    }

    /// Value of the first claim with the given type.
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.as_str())
    }

    /// Stable subject identifier (`sub`).
    pub fn subject_id(&self) -> Option<&str> {
        self.find_first(SUBJECT)
    }

    /// Identity provider (scheme) that authenticated the subject (`idp`).
    pub fn identity_provider(&self) -> Option<&str> {
        self.find_first(IDENTITY_PROVIDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{GRAPH_ISSUER, ROLE, VALUE_TYPE_STRING};

    #[test]
    fn test_subject_lookup() {
        let subject = Subject::new([
            Claim::new("sub", "uid"),
            Claim::new("idp", "b2c"),
            Claim::new("amr", "pwd"),
            Claim::new("amr", "mfa"),
        ]);
        assert_eq!(Some("uid"), subject.subject_id());
        assert_eq!(Some("b2c"), subject.identity_provider());
        assert_eq!(Some("pwd"), subject.find_first("amr"));
        assert_eq!(None, subject.find_first("oid"));
    }

    #[test]
    fn test_claim_builder() {
        let claim = Claim::builder()
            .claim_type(ROLE)
            .value("Admins")
            .value_type(VALUE_TYPE_STRING)
            .issuer(GRAPH_ISSUER)
            .build()
            .unwrap();
        assert_eq!(claim.issuer.as_deref(), Some("Graph"));
        if let Err(BuilderError::UninitializedField(field)) =
            Claim::builder().claim_type(ROLE).build()
        {
            assert_eq!("value", field);
        } else {
            panic!("claim without value must not be built");
        }
    }

    #[test]
    fn test_claim_serde() {
        let claim: Claim = serde_json::from_str(r#"{"type": "name", "value": "Jane"}"#).unwrap();
        assert_eq!(claim, Claim::new("name", "Jane"));
        assert_eq!(
            r#"{"type":"name","value":"Jane"}"#,
            serde_json::to_string(&claim).unwrap()
        );
    }
}
