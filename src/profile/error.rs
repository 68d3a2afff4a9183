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

//! # Profile provider error
use thiserror::Error;

use crate::auth::AuthProviderError;
use crate::directory::DirectoryProviderError;
use crate::error::BuilderError;
use crate::graph::GraphError;

/// Profile provider error.
#[derive(Error, Debug)]
pub enum ProfileProviderError {
    /// Outgoing request cannot be authenticated.
    #[error(transparent)]
    Authentication {
        /// The source of the error.
        #[from]
        source: AuthProviderError,
    },

    /// Provider construction error.
    #[error(transparent)]
    Builder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },

    /// Directory service error.
    #[error(transparent)]
    Directory {
        /// The source of the error.
        source: DirectoryProviderError,
    },

    /// Graph base url cannot be used.
    #[error("invalid Graph base url {0}")]
    InvalidBaseUrl(String),

    /// Response parsing error.
    #[error("response parsing error: {}", source)]
    Parse {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// Transport error.
    #[error("request failed: {}", source)]
    Request {
        /// The source of the error.
        #[from]
        source: reqwest::Error,
    },

    /// Subject carries no `sub` claim.
    #[error("subject identifier claim is missing")]
    SubjectIdMissing,

    /// Remote service responded with a non success status.
    #[error("remote service returned {status}: {body}")]
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

    /// Directory user not found.
    #[error("user {0} not found")]
    UserNotFound(String),
}

/// Classification of the [`ProfileProviderError`] for the hosting runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Request could not be authenticated against the remote service.
    Auth,
    /// Provider is misconfigured.
    Configuration,
    /// Token issuance request is not usable.
    InvalidRequest,
    /// Directory has no such user.
    NotFound,
    /// Remote response is malformed.
    Parse,
    /// Network failure or unexpected remote status.
    Transport,
}

impl ProfileProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Auth,
            Self::Builder { .. } | Self::InvalidBaseUrl(..) | Self::UrlParse { .. } => {
                ErrorKind::Configuration
            }
            Self::Directory { source } => match source {
                DirectoryProviderError::UserNotFound(..) => ErrorKind::NotFound,
                DirectoryProviderError::Serde { .. } => ErrorKind::Parse,
                DirectoryProviderError::Request { .. } | DirectoryProviderError::Other(..) => {
                    ErrorKind::Transport
                }
            },
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Request { .. } | Self::UnexpectedStatus { .. } => ErrorKind::Transport,
            Self::SubjectIdMissing => ErrorKind::InvalidRequest,
            Self::UserNotFound(..) => ErrorKind::NotFound,
        }
    }
}

impl From<DirectoryProviderError> for ProfileProviderError {
    fn from(source: DirectoryProviderError) -> Self {
        match source {
            DirectoryProviderError::UserNotFound(x) => Self::UserNotFound(x),
            _ => Self::Directory { source },
        }
    }
}

impl From<GraphError> for ProfileProviderError {
    fn from(source: GraphError) -> Self {
        match source {
            GraphError::Authentication { source } => Self::Authentication { source },
            GraphError::Builder { source } => Self::Builder { source },
            GraphError::InvalidBaseUrl(x) => Self::InvalidBaseUrl(x),
            GraphError::Parse { source } => Self::Parse { source },
            GraphError::Request { source } => Self::Request { source },
            GraphError::UnexpectedStatus { status, body } => {
                Self::UnexpectedStatus { status, body }
            }
            GraphError::UrlParse { source } => Self::UrlParse { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_mapping() {
        let err: ProfileProviderError = DirectoryProviderError::UserNotFound("uid".into()).into();
        assert!(matches!(err, ProfileProviderError::UserNotFound(ref x) if x == "uid"));
        assert_eq!(ErrorKind::NotFound, err.kind());

        let err: ProfileProviderError = DirectoryProviderError::Other("down".into()).into();
        assert_eq!(ErrorKind::Transport, err.kind());

        let err: ProfileProviderError = DirectoryProviderError::Serde {
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        }
        .into();
        assert_eq!(ErrorKind::Parse, err.kind());
    }

    #[test]
    fn test_graph_error_mapping() {
        let err: ProfileProviderError = GraphError::Authentication {
            source: AuthProviderError::NotConfigured("x".into()),
        }
        .into();
        assert_eq!(ErrorKind::Auth, err.kind());

        let err: ProfileProviderError = GraphError::UnexpectedStatus {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        }
        .into();
        assert_eq!(ErrorKind::Transport, err.kind());

        let err: ProfileProviderError = GraphError::Parse {
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        }
        .into();
        assert_eq!(ErrorKind::Parse, err.kind());

        let err: ProfileProviderError = GraphError::InvalidBaseUrl("data:x".into()).into();
        assert_eq!(ErrorKind::Configuration, err.kind());
    }
}
