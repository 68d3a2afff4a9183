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

//! # Microsoft Graph error
use thiserror::Error;

use crate::auth::AuthProviderError;
use crate::error::BuilderError;

/// Microsoft Graph error.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Request cannot be authenticated.
    #[error(transparent)]
    Authentication {
        /// The source of the error.
        #[from]
        source: AuthProviderError,
    },

    /// Client construction error.
    #[error(transparent)]
    Builder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },

    /// Base url cannot carry path segments.
    #[error("invalid Graph base url {0}")]
    InvalidBaseUrl(String),

    /// Response is not the expected json.
    #[error("Graph response parsing error: {}", source)]
    Parse {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Transport error.
    #[error("Graph request failed: {}", source)]
    Request {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Graph responded with a non success status.
    #[error("Graph returned {status}: {body}")]
    UnexpectedStatus {
        /// Response status.
        status: reqwest::StatusCode,
        /// Response body.
        body: String,
    },

    /// Url parsing error.
    #[error(transparent)]
    UrlParse {
        /// The source of the error.
        #[from]
        source: url::ParseError,
    },
}
