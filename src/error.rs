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

//! # Error
//!
//! Errors shared across the providers.
use thiserror::Error;

/// Builder error.
///
/// Used as the `build_fn` error of every `derive_builder` builder in the
/// crate so that missing collaborators surface at construction time.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A required field was not set on the builder.
    #[error("{0}")]
    UninitializedField(&'static str),

    /// Custom validation failed.
    #[error("{0}")]
    Validation(String),
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(ufe: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(ufe.field_name())
    }
}

impl From<String> for BuilderError {
    fn from(s: String) -> Self {
        Self::Validation(s)
    }
}
