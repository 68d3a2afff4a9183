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

use serde::{Deserialize, Serialize};

use crate::claims::{Claim, FAMILY_NAME, GIVEN_NAME, NAME, PHONE_NUMBER};

/// User record of the directory service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Surname.
    #[serde(default)]
    pub surname: Option<String>,

    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,

    /// Phone number. B2C tenants keep it in the `facsimileTelephoneNumber`
    /// attribute.
    #[serde(default, alias = "facsimileTelephoneNumber")]
    pub phone_number: Option<String>,
}

impl DirectoryUser {
    /// Map the user record into the profile claims.
    ///
    /// Claims are returned in the `name`, `family_name`, `given_name`,
    /// `phone_number` order. Empty attributes never produce a claim and the
    /// phone number is additionally skipped when it is only whitespace.
    pub fn to_claims(&self) -> Vec<Claim> {
        let mut claims = Vec::with_capacity(4);
        if let Some(val) = non_empty(&self.display_name) {
            claims.push(Claim::new(NAME, val));
        }
        if let Some(val) = non_empty(&self.surname) {
            claims.push(Claim::new(FAMILY_NAME, val));
        }
        if let Some(val) = non_empty(&self.given_name) {
            claims.push(Claim::new(GIVEN_NAME, val));
        }
        if let Some(val) = &self.phone_number
            && !val.trim().is_empty()
        {
            claims.push(Claim::new(PHONE_NUMBER, val));
        }
        claims
    }
}

fn non_empty(val: &Option<String>) -> Option<&str> {
    val.as_deref().filter(|x| !x.is_empty())
}
