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

//! # Bearer token provider error
use thiserror::Error;

/// Bearer token provider error.
#[derive(Error, Debug)]
pub enum AuthProviderError {
    /// Provider construction error.
    #[error(transparent)]
    Builder {
        /// The source of the error.
        #[from]
        source: crate::error::BuilderError,
    },

    /// Token cannot be used as a header value.
    #[error("access token is not a valid header value")]
    InvalidHeader {
        /// The source of the error.
        #[from]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// Provider is not configured.
    #[error("bearer token provider is not configured: {0}")]
    NotConfigured(String),

    /// Token endpoint communication error.
    #[error("token request failed: {}", source)]
    Request {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Token endpoint rejected the request.
    #[error("token endpoint returned {status}: {body}")]
    TokenEndpoint {
        /// Response status.
        status: reqwest::StatusCode,
        /// Response body.
        body: String,
    },

    /// Url error.
    #[error(transparent)]
    UrlParse {
        /// The source of the error.
        #[from]
        source: url::ParseError,
    },
}
