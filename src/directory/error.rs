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

//! # Directory service error
use thiserror::Error;

/// Directory service error.
#[derive(Error, Debug)]
pub enum DirectoryProviderError {
    /// The directory has no such user.
    #[error("user {0} not found")]
    UserNotFound(String),

    /// Communication with the directory failed.
    #[error("directory request failed: {}", source)]
    Request {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Directory response cannot be parsed.
    #[error("directory response serialization error: {}", source)]
    Serde {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Any other directory implementation specific error.
    #[error("{0}")]
    Other(String),
}
