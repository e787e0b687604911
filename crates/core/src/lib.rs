//! Error locations for Vulkan validation.
//!
//! A [`Location`] records where inside an API call a check failed: the
//! function, the reference page the check belongs to, and the path of
//! fields and array indices walked to reach the offending value. It renders
//! as the familiar `vkCmdPipelineBarrier(): pImageMemoryBarriers[42].srcAccessMask`
//! prefix and feeds [`find_vuid`] to pick the VUID for that exact path.

#![warn(missing_docs)]

/// Location values, path steps, and message rendering.
pub mod location;
/// VUID keys and table lookup.
pub mod vuid;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use location::{
    Ancestry, EmptyLocation, Location, MessageStyle, NO_INDEX, PathStep, index_from_raw,
};
pub use vuid::{Key, VUID_UNDEFINED, find_vuid};

// Identifiers (re-exported from the registry crate)
pub use vkloc_registry::{FieldId, FunctionId, RefPageId, UnknownName};
