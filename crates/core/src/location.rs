use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ffi::CStr;
use std::fmt;
use vkloc_registry::{FieldId, FunctionId, RefPageId};

/// Raw "no index" sentinel used by C callers and serialized paths.
///
/// [`index_from_raw`] maps it to `None`; a [`Location`] never stores it.
pub const NO_INDEX: u32 = u32::MAX;

/// Convert a raw index (with [`NO_INDEX`] meaning "not an array element").
pub const fn index_from_raw(raw: u32) -> Option<u32> {
    if raw == NO_INDEX { None } else { Some(raw) }
}

/// Ancestor steps of a location, oldest first.
///
/// Paths are rarely deeper than three steps, so those stay inline; deeper
/// paths spill to the heap.
pub type Ancestry = SmallVec<[PathStep; 3]>;

// ─── PathStep ────────────────────────────────────────────────────────────────

/// One `(field, index)` link of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// Field or parameter walked through.
    pub field: FieldId,
    /// Array element within `field`, if any.
    pub index: Option<u32>,
}

impl PathStep {
    /// Create a step, normalizing [`NO_INDEX`] to `None`.
    pub const fn new(field: FieldId, index: Option<u32>) -> Self {
        let index = match index {
            Some(raw) => index_from_raw(raw),
            None => None,
        };
        Self { field, index }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field.as_str())?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

// ─── MessageStyle ────────────────────────────────────────────────────────────

/// How a location with no field at all is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyLocation {
    /// `vkQueueSubmit(): ` (the separator is kept).
    #[default]
    KeepSeparator,
    /// `vkQueueSubmit()`.
    OmitSeparator,
}

/// Rendering options for [`Location::render`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStyle {
    /// Rendering of a location whose path is empty.
    #[serde(default)]
    pub empty_location: EmptyLocation,
}

impl MessageStyle {
    /// Default style: `"<function>(): <path>"`, even for an empty path.
    pub const fn new() -> Self {
        Self {
            empty_location: EmptyLocation::KeepSeparator,
        }
    }

    /// Set the rendering used for empty paths (builder pattern).
    pub const fn with_empty_location(mut self, empty_location: EmptyLocation) -> Self {
        self.empty_location = empty_location;
        self
    }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// Where inside an API call a validation check is looking.
///
/// A location is a plain value. [`Location::descend`] returns a child one
/// level deeper and leaves the parent untouched, so a validation routine can
/// keep the parent around and descend into sibling fields from it.
///
/// Invariants:
/// - `function` and `reference_page` never change across descents.
/// - the ancestry never holds an `Empty` field.
/// - an index is either a real element index or `None`.
///
/// # Example
/// ```
/// use vkloc_core::{FieldId, FunctionId, Location, RefPageId};
///
/// let loc = Location::new(FunctionId::vkCmdPipelineBarrier, RefPageId::VkImageMemoryBarrier)
///     .dot_index(FieldId::pImageMemoryBarriers, 42)
///     .dot(FieldId::srcAccessMask);
/// assert_eq!(
///     loc.message(),
///     "vkCmdPipelineBarrier(): pImageMemoryBarriers[42].srcAccessMask"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    function: FunctionId,
    reference_page: RefPageId,
    field: FieldId,
    index: Option<u32>,
    ancestry: Ancestry,
}

impl Location {
    /// Root location for `function` with no field selected yet.
    pub fn new(function: FunctionId, reference_page: RefPageId) -> Self {
        Self::at(function, reference_page, FieldId::Empty, None)
    }

    /// Root location already pointing at `field` (and optionally one of its
    /// elements).
    pub fn at(
        function: FunctionId,
        reference_page: RefPageId,
        field: FieldId,
        index: Option<u32>,
    ) -> Self {
        let step = PathStep::new(field, index);
        Self {
            function,
            reference_page,
            field: step.field,
            index: step.index,
            ancestry: Ancestry::new(),
        }
    }

    /// Child location one level deeper.
    ///
    /// The current field (unless `Empty`) becomes the last ancestor and
    /// `field`/`index` become the new current step. `self` is not modified;
    /// the child owns its own copy of the ancestry.
    #[must_use]
    pub fn descend(&self, field: FieldId, index: Option<u32>) -> Self {
        let mut ancestry = self.ancestry.clone();
        if !self.field.is_empty() {
            ancestry.push(PathStep {
                field: self.field,
                index: self.index,
            });
        }
        let step = PathStep::new(field, index);
        Self {
            function: self.function,
            reference_page: self.reference_page,
            field: step.field,
            index: step.index,
            ancestry,
        }
    }

    /// Descend into a non-array field.
    #[must_use]
    pub fn dot(&self, field: FieldId) -> Self {
        self.descend(field, None)
    }

    /// Descend into element `index` of an array field.
    #[must_use]
    pub fn dot_index(&self, field: FieldId, index: u32) -> Self {
        self.descend(field, Some(index))
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// API call this location belongs to.
    pub const fn function(&self) -> FunctionId {
        self.function
    }

    /// Reference page the location was created for.
    pub const fn reference_page(&self) -> RefPageId {
        self.reference_page
    }

    /// Field currently being examined.
    pub const fn field(&self) -> FieldId {
        self.field
    }

    /// Element index into [`Location::field`], if any.
    pub const fn index(&self) -> Option<u32> {
        self.index
    }

    /// Ancestor steps, oldest first.
    pub fn ancestry(&self) -> &[PathStep] {
        &self.ancestry
    }

    /// Number of ancestor steps.
    pub fn depth(&self) -> usize {
        self.ancestry.len()
    }

    /// `true` when the current field is `field`.
    pub fn is_field(&self, field: FieldId) -> bool {
        self.field == field
    }

    /// `true` when `field` is the current field or any ancestor.
    pub fn has_field(&self, field: FieldId) -> bool {
        self.is_field(field) || self.ancestry.iter().any(|step| step.field == field)
    }

    /// The full path: ancestry followed by the current step when its field
    /// is set.
    pub fn path(&self) -> impl Iterator<Item = PathStep> + '_ {
        let current = (!self.field.is_empty()).then_some(PathStep {
            field: self.field,
            index: self.index,
        });
        self.ancestry.iter().copied().chain(current)
    }

    /// Name of the function.
    pub const fn string_func(&self) -> &'static str {
        self.function.as_str()
    }

    /// Name of the reference page.
    pub const fn string_ref_page(&self) -> &'static str {
        self.reference_page.as_str()
    }

    /// Name of the current field.
    pub const fn string_field(&self) -> &'static str {
        self.field.as_str()
    }

    /// Name of the function as a NUL-terminated string.
    pub const fn c_str_func(&self) -> &'static CStr {
        self.function.as_c_str()
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Write the dotted path (`pSubmits[1].pCommandBuffers[0]`) to `out`.
    ///
    /// An index on an `Empty` current field is written straight after the
    /// last ancestor: `pCommandBuffers[5]`.
    pub fn write_fields<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (i, step) in self.path().enumerate() {
            if i > 0 {
                out.write_char('.')?;
            }
            write!(out, "{step}")?;
        }
        if self.field.is_empty()
            && let Some(index) = self.index
        {
            write!(out, "[{index}]")?;
        }
        Ok(())
    }

    /// `true` when nothing follows the `"<function>(): "` prefix.
    fn is_root(&self) -> bool {
        self.ancestry.is_empty() && self.field.is_empty() && self.index.is_none()
    }

    /// The dotted path without the function prefix.
    pub fn fields(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_fields(&mut out);
        out
    }

    /// Write the full message prefix using `style`.
    pub fn write_message<W: fmt::Write>(&self, out: &mut W, style: &MessageStyle) -> fmt::Result {
        out.write_str(self.function.as_str())?;
        if self.is_root() && style.empty_location == EmptyLocation::OmitSeparator {
            return out.write_str("()");
        }
        out.write_str("(): ")?;
        self.write_fields(out)
    }

    /// Render with an explicit style.
    pub fn render(&self, style: &MessageStyle) -> String {
        let mut out = String::with_capacity(64);
        let _ = self.write_message(&mut out, style);
        out
    }

    /// `"<function>(): <path>"`, e.g.
    /// `vkQueueSubmit(): pSubmits[0].pCommandBuffers[2]`.
    pub fn message(&self) -> String {
        self.render(&MessageStyle::default())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_message(f, &MessageStyle::default())
    }
}
