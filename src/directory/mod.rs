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

//! # Directory service
//!
//! The directory service is the external user store (Azure AD B2C) that is
//! queried by the stable subject identifier. Only the boundary is described
//! here: the profile provider talks to any implementation of
//! [`DirectoryApi`] injected at construction time.
use async_trait::async_trait;

pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::DirectoryProviderError;
#[cfg(test)]
pub use mock::MockDirectory;
pub use types::DirectoryUser;

/// Directory service interface.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Get the user record by its object id.
    ///
    /// # Returns
    /// * `Ok(Some(DirectoryUser))` when the user exists.
    /// * `Ok(None)` when the directory has no such user.
    async fn get_user_by_object_id<'a>(
        &self,
        object_id: &'a str,
    ) -> Result<Option<DirectoryUser>, DirectoryProviderError>;

    /// List role names assigned to the user.
    async fn get_user_roles<'a>(
        &self,
        object_id: &'a str,
    ) -> Result<Vec<String>, DirectoryProviderError>;
}
