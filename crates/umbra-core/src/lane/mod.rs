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

//! # Lanes
//!
//! One camera is prepared by a fixed sequence of lanes: shadows, then light
//! packing, then the forward draws, then an optional debug pass. The agent
//! owns the sequence. Lanes own no frame state; everything they touch comes
//! out of a [`LaneContext`] that lives for exactly one camera.
//!
//! ```rust,ignore
//! use umbra_core::lane::{Lane, LaneContext, LaneError, LaneKind};
//!
//! struct CountLights;
//!
//! impl Lane for CountLights {
//!     fn strategy_name(&self) -> &'static str { "CountLights" }
//!     fn lane_kind(&self) -> LaneKind { LaneKind::Debug }
//!
//!     fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError> {
//!         let count = ctx.get::<PackedLightCount>().ok_or(LaneError::missing("PackedLightCount"))?;
//!         log::info!("{} lights", count.0);
//!         Ok(())
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

pub mod context_keys;
pub use context_keys::*;

/// Failure of a single lane.
#[derive(Debug)]
pub enum LaneError {
    /// A context entry the lane reads was not inserted by the agent.
    InvalidContext {
        /// Type name of the missing entry.
        expected: &'static str,
        /// What was found instead.
        received: String,
    },
    /// The lane's own work failed.
    ExecutionFailed(Box<dyn std::error::Error + Send + Sync>),
}

impl LaneError {
    /// The context has no entry of type `type_name`.
    pub fn missing(type_name: &'static str) -> Self {
        LaneError::InvalidContext {
            expected: type_name,
            received: "no such entry".into(),
        }
    }
}

impl fmt::Display for LaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneError::InvalidContext { expected, received } => {
                write!(f, "lane context lacks {expected} ({received})")
            }
            LaneError::ExecutionFailed(e) => write!(f, "lane execution failed: {e}"),
        }
    }
}

impl std::error::Error for LaneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaneError::ExecutionFailed(e) => Some(e.as_ref()),
            LaneError::InvalidContext { .. } => None,
        }
    }
}

/// What a lane contributes to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Renders the shadow atlas.
    Shadow,
    /// Packs and uploads light arrays.
    Lighting,
    /// Draws scene geometry.
    Render,
    /// Diagnostic overlay.
    Debug,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaneKind::Shadow => "Shadow",
            LaneKind::Lighting => "Lighting",
            LaneKind::Render => "Render",
            LaneKind::Debug => "Debug",
        };
        f.write_str(name)
    }
}

/// Per-camera entries handed to every lane, keyed by type.
///
/// Borrowed state (the frame scratch, the backend, the culling results) is
/// inserted through [`Slot`] and [`Ref`]. The agent builds the context after
/// culling and drops it before it touches the borrowed state again.
pub struct LaneContext {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

// SAFETY: the context never leaves the thread that renders the camera, and
// the pointers held by Slot/Ref entries outlive it.
unsafe impl Send for LaneContext {}
unsafe impl Sync for LaneContext {}

impl LaneContext {
    /// An empty context.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `value`, replacing any previous entry of type `T`.
    pub fn insert<T: 'static + Send + Sync>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// The entry of type `T`, if present.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.entries.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// The entry of type `T`, mutably.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.entries.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Whether an entry of type `T` is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }
}

impl Default for LaneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LaneContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaneContext")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// A mutable borrow stored in a [`LaneContext`] with its lifetime erased.
///
/// Must not outlive the borrow it was made from.
pub struct Slot<T: ?Sized>(*mut T);

// SAFETY: see LaneContext.
unsafe impl<T: ?Sized> Send for Slot<T> {}
unsafe impl<T: ?Sized> Sync for Slot<T> {}

impl<T: ?Sized> Slot<T> {
    /// Erases the lifetime of `value`.
    pub fn new(value: &mut T) -> Self {
        Self(value as *mut T)
    }

    /// The borrowed value.
    ///
    /// Lanes run one at a time and each fetches a slot at most once per
    /// borrow, so the returned reference is unique while it is used.
    #[allow(clippy::mut_from_ref)]
    pub fn get(&self) -> &mut T {
        // SAFETY: the pointee outlives the context and lanes do not alias it.
        unsafe { &mut *self.0 }
    }

    /// The borrowed value, shared.
    pub fn get_ref(&self) -> &T {
        // SAFETY: as in `get`.
        unsafe { &*self.0 }
    }
}

/// A shared borrow stored in a [`LaneContext`] with its lifetime erased.
pub struct Ref<T: ?Sized>(*const T);

// SAFETY: see LaneContext.
unsafe impl<T: ?Sized> Send for Ref<T> {}
unsafe impl<T: ?Sized> Sync for Ref<T> {}

impl<T: ?Sized> Ref<T> {
    /// Erases the lifetime of `value`.
    pub fn new(value: &T) -> Self {
        Self(value as *const T)
    }

    /// The borrowed value.
    pub fn get(&self) -> &T {
        // SAFETY: the pointee outlives the context.
        unsafe { &*self.0 }
    }
}

/// One step of per-camera frame preparation.
///
/// The agent calls [`execute`](Lane::execute) once per camera, in its fixed
/// lane order.
pub trait Lane: Send + Sync {
    /// Name used in logs and error context.
    fn strategy_name(&self) -> &'static str;

    /// What the lane contributes.
    fn lane_kind(&self) -> LaneKind;

    /// Relative cost of running the lane for the camera in `ctx`.
    fn estimate_cost(&self, _ctx: &LaneContext) -> f32 {
        1.0
    }

    /// Does the lane's work for the camera in `ctx`.
    fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_keyed_by_type() {
        let mut ctx = LaneContext::new();
        ctx.insert(PackedLightCount(3));
        ctx.insert(7u32);
        assert!(ctx.contains::<PackedLightCount>());
        assert!(!ctx.contains::<u64>());

        ctx.get_mut::<PackedLightCount>().unwrap().0 += 1;
        assert_eq!(ctx.get::<PackedLightCount>().unwrap().0, 4);
        assert_eq!(ctx.get::<u32>(), Some(&7));
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut ctx = LaneContext::new();
        ctx.insert(PackedLightCount(1));
        ctx.insert(PackedLightCount(2));
        assert_eq!(ctx.get::<PackedLightCount>().unwrap().0, 2);
        assert_eq!(format!("{ctx:?}"), "LaneContext { entries: 1 }");
    }

    #[test]
    fn test_slot_writes_reach_the_owner() {
        let mut lights = vec![1u32, 2];
        {
            let mut ctx = LaneContext::new();
            ctx.insert(Slot::<Vec<u32>>::new(&mut lights));
            ctx.get::<Slot<Vec<u32>>>().unwrap().get().push(3);
            assert_eq!(ctx.get::<Slot<Vec<u32>>>().unwrap().get_ref().len(), 3);
        }
        assert_eq!(lights, vec![1, 2, 3]);
    }

    #[test]
    fn test_trait_object_slots_and_refs() {
        let mut text = String::from("umbra");
        let label = 5usize;
        let mut ctx = LaneContext::new();
        ctx.insert(Slot::<dyn fmt::Write>::new(&mut text));
        ctx.insert(Ref::new(&label));

        ctx.get::<Slot<dyn fmt::Write>>()
            .unwrap()
            .get()
            .write_str("-lanes")
            .unwrap();
        assert_eq!(*ctx.get::<Ref<usize>>().unwrap().get(), 5);
        drop(ctx);
        assert_eq!(text, "umbra-lanes");
    }

    #[test]
    fn test_missing_entry_message() {
        let err = LaneError::missing("Slot<FrameContext>");
        assert_eq!(
            err.to_string(),
            "lane context lacks Slot<FrameContext> (no such entry)"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_lane_kind_display() {
        assert_eq!(LaneKind::Lighting.to_string(), "Lighting");
        assert_eq!(LaneKind::Shadow.to_string(), "Shadow");
    }
}
