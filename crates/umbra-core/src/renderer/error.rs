// Copyright 2025 eraflo
//
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

//! Errors reported by render backends.

use crate::renderer::texture::RenderTextureId;
use std::fmt;

/// A temporary texture could not be provided or released.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// Allocation of a `size`×`size` texture failed.
    TextureAllocationFailed {
        #[allow(missing_docs)]
        size: u32,
        #[allow(missing_docs)]
        reason: String,
    },
    /// The handle was never handed out or was already released.
    UnknownTexture(RenderTextureId),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextureAllocationFailed { size, reason } => {
                write!(f, "cannot allocate {size}x{size} texture ({reason})")
            }
            Self::UnknownTexture(RenderTextureId(id)) => write!(f, "no temporary texture #{id}"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Failure of a [`RenderBackend`](crate::renderer::RenderBackend) call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A command buffer was rejected.
    CommandExecutionFailed {
        /// Name of the buffer.
        buffer: String,
        #[allow(missing_docs)]
        reason: String,
    },
    /// A draw call was rejected.
    DrawFailed(String),
    /// The camera's work could not be submitted.
    SubmitFailed(String),
    /// Temporary texture management failed.
    Resource(ResourceError),
    /// The device is gone and every further call will fail.
    DeviceLost,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandExecutionFailed { buffer, reason } => {
                write!(f, "command buffer '{buffer}' failed: {reason}")
            }
            Self::DrawFailed(reason) => write!(f, "draw failed: {reason}"),
            Self::SubmitFailed(reason) => write!(f, "submit failed: {reason}"),
            Self::Resource(_) => f.write_str("temporary texture error"),
            Self::DeviceLost => f.write_str("render device lost"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        Self::Resource(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn command_buffer_failure_names_the_buffer() {
        let err = RenderError::CommandExecutionFailed {
            buffer: "Render Shadows".to_string(),
            reason: "queue full".to_string(),
        };
        assert_eq!(err.to_string(), "command buffer 'Render Shadows' failed: queue full");
        assert!(err.source().is_none());
    }

    #[test]
    fn resource_failures_are_chained() {
        let err: RenderError = ResourceError::TextureAllocationFailed {
            size: 2048,
            reason: "out of memory".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "temporary texture error");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("cannot allocate 2048x2048 texture (out of memory)".to_string())
        );

        let unknown = ResourceError::UnknownTexture(RenderTextureId(7));
        assert_eq!(unknown.to_string(), "no temporary texture #7");
    }
}
