//! Each table lists the most specific keys first; [`find_vuid`] returns the
//! first match.

use crate::adapter::VuidResolver;
use crate::codes;
use vkloc_core::{FieldId, FunctionId, Key, Location, RefPageId, find_vuid};

/// A `(Key, VUID)` row.
pub type Entry = (Key, &'static str);

/// Access masks of `vkCmdPipelineBarrier` and `vkCmdWaitEvents` barriers.
pub const ACCESS_MASKS: &[Entry] = &[
    (
        Key::function_field(FunctionId::vkCmdPipelineBarrier, FieldId::srcAccessMask),
        codes::PIPELINE_BARRIER_SRC_ACCESS_MASK,
    ),
    (
        Key::function_field(FunctionId::vkCmdPipelineBarrier, FieldId::dstAccessMask),
        codes::PIPELINE_BARRIER_DST_ACCESS_MASK,
    ),
    (
        Key::function_field(FunctionId::vkCmdWaitEvents, FieldId::srcAccessMask),
        codes::WAIT_EVENTS_SRC_ACCESS_MASK,
    ),
    (
        Key::function_field(FunctionId::vkCmdWaitEvents, FieldId::dstAccessMask),
        codes::WAIT_EVENTS_DST_ACCESS_MASK,
    ),
];

/// `VkImageMemoryBarrier` layouts and subresource range.
pub const IMAGE_BARRIERS: &[Entry] = &[
    (
        Key::page_field(RefPageId::VkImageMemoryBarrier, FieldId::oldLayout),
        codes::IMAGE_BARRIER_OLD_LAYOUT,
    ),
    (
        Key::page_field(RefPageId::VkImageMemoryBarrier, FieldId::newLayout),
        codes::IMAGE_BARRIER_NEW_LAYOUT,
    ),
    (
        Key::page_field(RefPageId::VkImageMemoryBarrier, FieldId::subresourceRange).recursive(),
        codes::IMAGE_BARRIER_SUBRESOURCE_RANGE,
    ),
];

/// `VkBufferMemoryBarrier` range.
pub const BUFFER_BARRIERS: &[Entry] = &[
    (
        Key::page_field(RefPageId::VkBufferMemoryBarrier, FieldId::offset),
        codes::BUFFER_BARRIER_OFFSET,
    ),
    (
        Key::page_field(RefPageId::VkBufferMemoryBarrier, FieldId::size),
        codes::BUFFER_BARRIER_SIZE,
    ),
];

/// Queue submission.
pub const SUBMIT: &[Entry] = &[(
    Key::new(
        FunctionId::vkQueueSubmit,
        RefPageId::VkSubmitInfo,
        FieldId::pCommandBuffers,
    ),
    codes::SUBMIT_SECONDARY_COMMAND_BUFFER,
)];

/// Resource creation.
pub const CREATE_INFO: &[Entry] = &[
    (
        Key::page_field(RefPageId::VkImageCreateInfo, FieldId::extent).recursive(),
        codes::IMAGE_CREATE_EXTENT_WIDTH,
    ),
    (
        Key::page_field(RefPageId::VkBufferCreateInfo, FieldId::size),
        codes::BUFFER_CREATE_SIZE,
    ),
];

/// Every built-in table, in lookup order.
pub const BUILTIN: &[&[Entry]] = &[
    ACCESS_MASKS,
    IMAGE_BARRIERS,
    BUFFER_BARRIERS,
    SUBMIT,
    CREATE_INFO,
];

/// An owned, ordered VUID table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VuidTable {
    entries: Vec<Entry>,
}

impl VuidTable {
    /// Empty table; resolves everything to [`vkloc_core::VUID_UNDEFINED`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding a copy of `entries`.
    pub fn from_static(entries: &[Entry]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Every [`BUILTIN`] table concatenated.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for entries in BUILTIN {
            table.extend(entries);
        }
        table
    }

    /// Append one entry (builder pattern).
    #[must_use]
    pub fn with(mut self, key: Key, vuid: &'static str) -> Self {
        self.entries.push((key, vuid));
        self
    }

    /// Append `entries` after the existing ones.
    pub fn extend(&mut self, entries: &[Entry]) {
        self.entries.extend_from_slice(entries);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lookup order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First matching VUID for `loc`.
    pub fn resolve(&self, loc: &Location) -> &'static str {
        find_vuid(loc, &self.entries)
    }
}

impl VuidResolver for VuidTable {
    fn resolve(&self, loc: &Location) -> &str {
        VuidTable::resolve(self, loc)
    }
}
