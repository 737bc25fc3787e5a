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

//! Mutually exclusive shader keyword selection.

use umbra_core::renderer::CommandBuffer;

/// Records keyword toggles so that at most one keyword of the set is enabled.
///
/// `selected == 0` disables every keyword; `selected == k` enables
/// `keywords[k - 1]` and disables the rest. A selection past the end of the
/// list disables everything.
pub fn select_variant(buffer: &mut CommandBuffer, keywords: &[&str], selected: usize) {
    for (i, keyword) in keywords.iter().enumerate() {
        buffer.set_keyword(keyword, selected == i + 1);
    }
}
