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

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use httpmock::MockServer;
use serde_json::json;
use tempfile::NamedTempFile;

use identity_claims::claims::{Claim, Subject};
use identity_claims::config::Config;
use identity_claims::directory::{DirectoryApi, DirectoryProviderError, DirectoryUser};
use identity_claims::profile::{
    ErrorKind, IsActiveRequest, ProfileApi, ProfileDataRequest, ProfileProvider,
};

/// In-memory directory.
#[derive(Default)]
struct StaticDirectory {
    users: HashMap<String, DirectoryUser>,
    roles: HashMap<String, Vec<String>>,
}

#[async_trait]
impl DirectoryApi for StaticDirectory {
    async fn get_user_by_object_id<'a>(
        &self,
        object_id: &'a str,
    ) -> Result<Option<DirectoryUser>, DirectoryProviderError> {
        Ok(self.users.get(object_id).cloned())
    }

    async fn get_user_roles<'a>(
        &self,
        object_id: &'a str,
    ) -> Result<Vec<String>, DirectoryProviderError> {
        Ok(self.roles.get(object_id).cloned().unwrap_or_default())
    }
}

fn directory() -> Arc<StaticDirectory> {
    let mut directory = StaticDirectory::default();
    directory.users.insert(
        "uid".into(),
        DirectoryUser {
            display_name: Some("Jane Doe".into()),
            surname: Some("Doe".into()),
            given_name: Some("Jane".into()),
            phone_number: None,
        },
    );
    directory
        .roles
        .insert("uid".into(), vec!["admin".into(), "auditor".into()]);
    Arc::new(directory)
}

/// Write the configuration pointing both the authority and Graph to the mock
/// server.
fn write_config(server: &MockServer) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[profile]
schemes = b2c
graph_scheme = aad
trusted_client_id = first-party

[graph]
base_url = {base}/v1.0/

[auth]
authority_url = {base}/
tenant_id = tid
client_id = cid
client_secret = secret
scope = {base}/.default
"#,
        base = server.base_url()
    )?;
    Ok(file)
}

async fn provider(server: &MockServer) -> Result<(ProfileProvider, NamedTempFile)> {
    let file = write_config(server)?;
    let config = Config::new(file.path().to_path_buf())?;
    let provider = ProfileProvider::new(&config, directory())?;
    Ok((provider, file))
}

#[tokio::test]
async fn test_directory_user() -> Result<()> {
    let server = MockServer::start_async().await;
    let (provider, _file) = provider(&server).await?;

    let subject = Subject::new([Claim::new("sub", "uid"), Claim::new("idp", "b2c")]);
    let mut request = ProfileDataRequest::new("spa", subject, ["name", "role"]);
    provider.get_profile_data(&mut request).await?;

    assert_eq!(
        vec![
            Claim::new("name", "Jane Doe"),
            Claim::new("family_name", "Doe"),
            Claim::new("given_name", "Jane"),
            Claim::new("role", "admin"),
            Claim::new("role", "auditor"),
        ],
        request.issued_claims
    );
    Ok(())
}

#[tokio::test]
async fn test_directory_user_unknown() -> Result<()> {
    let server = MockServer::start_async().await;
    let (provider, _file) = provider(&server).await?;

    let subject = Subject::new([Claim::new("sub", "ghost"), Claim::new("idp", "b2c")]);
    let mut request = ProfileDataRequest::new("spa", subject, ["name"]);
    let err = provider
        .get_profile_data(&mut request)
        .await
        .expect_err("unknown user must fail");
    assert_eq!(ErrorKind::NotFound, err.kind());
    assert!(request.issued_claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_graph_user_with_trusted_client() -> Result<()> {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/tid/oauth2/v2.0/token");
            then.status(200)
                .json_body(json!({"token_type": "Bearer", "expires_in": 3599, "access_token": "graph-token"}));
        })
        .await;
    let graph_mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/v1.0/users/oid-1/memberOf")
                .query_param("$select", "displayName")
                .header("authorization", "Bearer graph-token");
            then.status(200)
                .json_body(json!({"value": [{"displayName": "Admins"}, {"displayName": "Users"}]}));
        })
        .await;
    let (provider, _file) = provider(&server).await?;

    let subject = Subject::new([
        Claim::new("sub", "aad-sub"),
        Claim::new("idp", "aad"),
        Claim::new("oid", "oid-1"),
    ]);
    let mut request = ProfileDataRequest::new("first-party", subject.clone(), ["role"]);
    provider.get_profile_data(&mut request).await?;
    // The access token is cached for the second request.
    let mut request2 = ProfileDataRequest::new("spa", subject.clone(), ["role"]);
    provider.get_profile_data(&mut request2).await?;

    token_mock.assert_async().await;
    graph_mock.assert_hits_async(2).await;

    let mut expected = subject.claims.clone();
    expected.push(Claim::new("oid", "oid-1"));
    for group in ["Admins", "Users"] {
        expected.push(
            Claim::builder()
                .claim_type("role")
                .value(group)
                .value_type("http://www.w3.org/2001/XMLSchema#string")
                .issuer("Graph")
                .build()?,
        );
    }
    assert_eq!(expected, request.issued_claims);
    assert_eq!(&expected[3..], &request2.issued_claims[..]);
    Ok(())
}

#[tokio::test]
async fn test_is_active() -> Result<()> {
    let server = MockServer::start_async().await;
    let (provider, _file) = provider(&server).await?;

    let mut request = IsActiveRequest::new("spa", Subject::default());
    provider.is_active(&mut request).await?;
    assert!(request.is_active);
    Ok(())
}
