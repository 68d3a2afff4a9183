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

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::claims::{Claim, Subject};

/// Claims request of a single token issuance.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ProfileDataRequest {
    /// Client the token is issued to.
    pub client_id: String,

    /// Claims to be issued, appended by the profile provider.
    #[serde(default)]
    pub issued_claims: Vec<Claim>,

    /// Requested claim types.
    #[serde(default)]
    pub requested_claim_types: BTreeSet<String>,

    /// Authenticated subject.
    pub subject: Subject,
}

impl ProfileDataRequest {
    pub fn new<C, I, T>(client_id: C, subject: Subject, requested_claim_types: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            issued_claims: Vec::new(),
            requested_claim_types: requested_claim_types.into_iter().map(Into::into).collect(),
            subject,
        }
    }

    /// Append the claims unconditionally.
    pub fn add_claims<I: IntoIterator<Item = Claim>>(&mut self, claims: I) {
        self.issued_claims.extend(claims);
    }

    /// Append only the claims of the requested types.
    pub fn add_requested_claims<I: IntoIterator<Item = Claim>>(&mut self, claims: I) {
        let requested = &self.requested_claim_types;
        self.issued_claims.extend(
            claims
                .into_iter()
                .filter(|claim| requested.contains(&claim.claim_type)),
        );
    }
}

/// Determination whether the subject may receive tokens.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct IsActiveRequest {
    /// Client the token is issued to.
    pub client_id: String,

    /// Outcome of the determination.
    #[serde(default)]
    pub is_active: bool,

    /// Authenticated subject.
    pub subject: Subject,
}

impl IsActiveRequest {
    pub fn new<C: Into<String>>(client_id: C, subject: Subject) -> Self {
        Self {
            client_id: client_id.into(),
            is_active: false,
            subject,
        }
    }
}
