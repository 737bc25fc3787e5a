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

//! Acts as the **[A]gent** for frame rendering.
//!
//! The agent owns the backend, the culling provider and the per-frame scratch
//! state. It decides the order in which lanes run for each camera and makes
//! sure the shadow atlas is released once a camera was culled, whatever
//! happens afterwards. The lanes do the actual work.

mod agent;

pub use agent::*;
