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

//! Domain errors raised by the lanes.
//!
//! Every variant wraps the backend's [`RenderError`]; lanes convert them into
//! [`LaneError::ExecutionFailed`] at the [`Lane::execute`](umbra_core::lane::Lane::execute)
//! boundary.

use thiserror::Error;
use umbra_core::lane::LaneError;
use umbra_core::renderer::RenderError;

/// Failures while preparing or uploading light data.
#[derive(Error, Debug)]
pub enum LightingError {
    /// Executing the camera buffer with the light arrays failed.
    #[error("failed to upload visible light arrays")]
    Upload(#[source] RenderError),
    /// Executing the per-object keyword toggle failed.
    #[error("failed to apply per-object lighting keyword")]
    Keyword(#[source] RenderError),
}

/// Failures while rendering or releasing the directional shadow atlas.
#[derive(Error, Debug)]
pub enum ShadowError {
    /// The atlas texture could not be allocated.
    #[error("failed to allocate {size}x{size} shadow atlas")]
    AtlasAllocation {
        /// Requested edge length.
        size: u32,
        /// Backend error.
        #[source]
        source: RenderError,
    },
    /// Executing the shadow buffer failed.
    #[error("failed to execute shadow commands ({stage})")]
    Execute {
        /// Which step was executing.
        stage: &'static str,
        /// Backend error.
        #[source]
        source: RenderError,
    },
    /// Drawing the casters of one tile failed.
    #[error("failed to draw shadow casters of light {light_index}, cascade {cascade}")]
    DrawCasters {
        /// Visible light index.
        light_index: usize,
        /// Cascade index.
        cascade: usize,
        /// Backend error.
        #[source]
        source: RenderError,
    },
    /// The atlas texture could not be released.
    #[error("failed to release shadow atlas")]
    Release(#[source] RenderError),
}

/// Failures while issuing camera draws.
#[derive(Error, Debug)]
pub enum DrawError {
    /// A backend draw step failed.
    #[error("{pass} failed")]
    Pass {
        /// Name of the failing step.
        pass: &'static str,
        /// Backend error.
        #[source]
        source: RenderError,
    },
}

impl From<LightingError> for LaneError {
    fn from(err: LightingError) -> Self {
        LaneError::ExecutionFailed(Box::new(err))
    }
}

impl From<ShadowError> for LaneError {
    fn from(err: ShadowError) -> Self {
        LaneError::ExecutionFailed(Box::new(err))
    }
}

impl From<DrawError> for LaneError {
    fn from(err: DrawError) -> Self {
        LaneError::ExecutionFailed(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn shadow_error_keeps_backend_source() {
        let err = ShadowError::AtlasAllocation {
            size: 1024,
            source: RenderError::DeviceLost,
        };
        assert_eq!(err.to_string(), "failed to allocate 1024x1024 shadow atlas");
        assert!(err.source().is_some());

        let lane_err: LaneError = err.into();
        assert!(matches!(lane_err, LaneError::ExecutionFailed(_)));
        assert!(lane_err.to_string().contains("shadow atlas"));
    }
}
