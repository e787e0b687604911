use crate::location::Location;
use vkloc_registry::{FieldId, FunctionId, RefPageId};

/// Returned by [`find_vuid`] when no key matches.
pub const VUID_UNDEFINED: &str = "VUID-Undefined";

/// Selector for one row of a VUID table.
///
/// `Empty` members act as wildcards. A key with both `function` and
/// `reference_page` left `Empty` matches every location, so the constructors
/// always pin at least one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// Required function, or `Empty` for any.
    pub function: FunctionId,
    /// Required reference page, or `Empty` for any.
    pub reference_page: RefPageId,
    /// Required field, or `Empty` for any.
    pub field: FieldId,
    /// Also accept `field` anywhere in the ancestry.
    pub recurse_field: bool,
}

impl Key {
    /// Any location on reference page `page`.
    pub const fn page(page: RefPageId) -> Self {
        Self::new(FunctionId::Empty, page, FieldId::Empty)
    }

    /// `field` on reference page `page`.
    pub const fn page_field(page: RefPageId, field: FieldId) -> Self {
        Self::new(FunctionId::Empty, page, field)
    }

    /// Any location inside `function`.
    pub const fn function(function: FunctionId) -> Self {
        Self::new(function, RefPageId::Empty, FieldId::Empty)
    }

    /// `field` inside `function`, whatever the reference page.
    pub const fn function_field(function: FunctionId, field: FieldId) -> Self {
        Self::new(function, RefPageId::Empty, field)
    }

    /// Fully specified key.
    pub const fn new(function: FunctionId, reference_page: RefPageId, field: FieldId) -> Self {
        Self {
            function,
            reference_page,
            field,
            recurse_field: false,
        }
    }

    /// Match `field` against the ancestry as well as the current field.
    #[must_use]
    pub const fn recursive(mut self) -> Self {
        self.recurse_field = true;
        self
    }

    /// Whether `loc` is selected by this key.
    pub fn matches(&self, loc: &Location) -> bool {
        if !self.function.is_empty() && self.function != loc.function() {
            return false;
        }
        if !self.reference_page.is_empty() && self.reference_page != loc.reference_page() {
            return false;
        }
        if self.field.is_empty() || loc.is_field(self.field) {
            return true;
        }
        self.recurse_field && loc.has_field(self.field)
    }
}

/// First VUID in `table` whose key matches `loc`.
///
/// Tables are scanned in order, so more specific keys go first. Returns
/// [`VUID_UNDEFINED`] when nothing matches.
pub fn find_vuid<'v>(loc: &Location, table: &[(Key, &'v str)]) -> &'v str {
    match table.iter().find(|(key, _)| key.matches(loc)) {
        Some((_, vuid)) => *vuid,
        None => {
            tracing::debug!(location = %loc, entries = table.len(), "no VUID key matched");
            VUID_UNDEFINED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_TABLE: &[(Key, &str)] = &[
        (
            Key::function_field(FunctionId::vkCmdWaitEvents, FieldId::srcAccessMask),
            "VUID-vkCmdWaitEvents-srcAccessMask-02809",
        ),
        (
            Key::function_field(FunctionId::vkCmdPipelineBarrier, FieldId::srcAccessMask),
            "VUID-vkCmdPipelineBarrier-srcAccessMask-02815",
        ),
        (
            Key::page_field(RefPageId::VkImageMemoryBarrier, FieldId::oldLayout),
            "VUID-VkImageMemoryBarrier-oldLayout-01197",
        ),
    ];

    fn image_barrier(function: FunctionId, index: u32) -> Location {
        Location::new(function, RefPageId::VkImageMemoryBarrier)
            .dot_index(FieldId::pImageMemoryBarriers, index)
    }

    #[test]
    fn matches_function_and_field() {
        let loc = image_barrier(FunctionId::vkCmdPipelineBarrier, 3).dot(FieldId::srcAccessMask);
        assert_eq!(
            find_vuid(&loc, ACCESS_TABLE),
            "VUID-vkCmdPipelineBarrier-srcAccessMask-02815"
        );
        let loc = image_barrier(FunctionId::vkCmdWaitEvents, 0).dot(FieldId::srcAccessMask);
        assert_eq!(
            find_vuid(&loc, ACCESS_TABLE),
            "VUID-vkCmdWaitEvents-srcAccessMask-02809"
        );
    }

    #[test]
    fn page_key_matches_any_function() {
        for function in [FunctionId::vkCmdPipelineBarrier, FunctionId::vkCmdWaitEvents] {
            let loc = image_barrier(function, 1).dot(FieldId::oldLayout);
            assert_eq!(
                find_vuid(&loc, ACCESS_TABLE),
                "VUID-VkImageMemoryBarrier-oldLayout-01197"
            );
        }
    }

    #[test]
    fn page_mismatch_rejects() {
        let loc = Location::new(FunctionId::vkCmdPipelineBarrier, RefPageId::VkBufferMemoryBarrier)
            .dot(FieldId::oldLayout);
        assert_eq!(find_vuid(&loc, ACCESS_TABLE), VUID_UNDEFINED);
    }

    #[test]
    fn miss_returns_undefined() {
        let loc = image_barrier(FunctionId::vkCmdPipelineBarrier, 0).dot(FieldId::dstAccessMask);
        assert_eq!(find_vuid(&loc, ACCESS_TABLE), VUID_UNDEFINED);
        assert_eq!(find_vuid(&loc, &[]), VUID_UNDEFINED);
    }

    #[test]
    fn empty_field_key_matches_any_field() {
        let key = Key::function(FunctionId::vkQueueSubmit);
        let loc = Location::new(FunctionId::vkQueueSubmit, RefPageId::VkSubmitInfo)
            .dot_index(FieldId::pSubmits, 0)
            .dot(FieldId::pWaitSemaphores);
        assert!(key.matches(&loc));
        assert!(key.matches(&Location::new(FunctionId::vkQueueSubmit, RefPageId::Empty)));
        assert!(!key.matches(&Location::new(FunctionId::vkQueueSubmit2KHR, RefPageId::Empty)));
    }

    #[test]
    fn recursive_key_matches_ancestor_field() {
        let loc = image_barrier(FunctionId::vkCmdPipelineBarrier, 7)
            .dot(FieldId::subresourceRange)
            .dot(FieldId::levelCount);
        let plain = Key::page_field(RefPageId::VkImageMemoryBarrier, FieldId::subresourceRange);
        assert!(!plain.matches(&loc));
        assert!(plain.recursive().matches(&loc));
    }

    #[test]
    fn recursive_key_still_checks_page() {
        let loc = image_barrier(FunctionId::vkCmdPipelineBarrier, 7).dot(FieldId::image);
        let key = Key::page_field(RefPageId::VkBufferMemoryBarrier, FieldId::pImageMemoryBarriers)
            .recursive();
        assert!(!key.matches(&loc));
    }

    #[test]
    fn first_match_wins() {
        let table = [
            (Key::function(FunctionId::vkCreateImage), "first"),
            (
                Key::page_field(RefPageId::VkImageCreateInfo, FieldId::extent),
                "second",
            ),
        ];
        let loc = Location::new(FunctionId::vkCreateImage, RefPageId::VkImageCreateInfo)
            .dot(FieldId::pCreateInfo)
            .dot(FieldId::extent);
        assert_eq!(find_vuid(&loc, &table), "first");
    }
}
