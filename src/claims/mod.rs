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

//! # Claims
//!
//! A claim is a typed key/value fact asserted about an authenticated subject
//! and embedded in an issued token. The [`Subject`] carries the claims that
//! were established during authentication, while the profile provider
//! produces additional [`Claim`]s to be issued.
use serde_json::Value;

pub mod types;

pub use types::{Claim, ClaimBuilder, Subject};

/// Subject identifier.
pub const SUBJECT: &str = "sub";
/// Identity provider that authenticated the subject.
pub const IDENTITY_PROVIDER: &str = "idp";
/// Full name.
pub const NAME: &str = "name";
/// Surname(s) or last name(s).
pub const FAMILY_NAME: &str = "family_name";
/// Given name(s) or first name(s).
pub const GIVEN_NAME: &str = "given_name";
/// Preferred telephone number.
pub const PHONE_NUMBER: &str = "phone_number";
/// Role.
pub const ROLE: &str = "role";
/// Azure AD object identifier.
pub const OBJECT_ID: &str = "oid";

/// XML schema string value type.
pub const VALUE_TYPE_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Issuer of the claims resolved through Microsoft Graph.
pub const GRAPH_ISSUER: &str = "Graph";

/// Select a single claim from an arbitrary JSON document.
///
/// `path` is either a JSON pointer (`/address/country`) or a dotted path
/// (`address.country`, `emails[0]`, optionally prefixed with `$.`).
///
/// # Returns
/// * `Some(Claim)` of the `claim_type` with the resolved value. Strings are
///   taken verbatim, any other value is rendered as JSON text.
/// * `None` when the path does not resolve, or resolves to `null` or to an
///   empty string.
pub fn select_claim(value: &Value, path: &str, claim_type: &str) -> Option<Claim> {
    let target = if path.starts_with('/') {
        value.pointer(path)
    } else {
        select_dotted(value, path)
    }?;
    let claim_value = match target {
        Value::Null => return None,
        Value::String(val) => val.clone(),
        other => other.to_string(),
    };
    if claim_value.is_empty() {
        return None;
    }
    Some(Claim::new(claim_type, claim_value))
}

/// Walk a dotted path with optional `[index]` array accessors.
fn select_dotted<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (key, indices) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };
        if !key.is_empty() {
            current = current.get(key)?;
        }
        for index in indices
            .split(['[', ']'])
            .filter(|s| !s.is_empty())
        {
            current = current.get(index.parse::<usize>().ok()?)?;
        }
    }
    Some(current)
}
