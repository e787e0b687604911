//! Diagnostics for Vulkan validation.
//!
//! Provides [`Diagnostic`] and [`Severity`] for reporting failed checks at a
//! [`Location`], the [`LocationVuidAdapter`] that pairs a location with a VUID
//! resolver, static VUID [`tables`], and a filtering [`Reporter`] configured
//! by [`ReportSettings`]. Diagnostic IDs are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants generated from `spec/vuids.jsonc`.
pub mod codes;

mod adapter;
mod report;
mod settings;
/// Built-in `(Key, VUID)` tables and the [`VuidTable`] resolver.
pub mod tables;

pub use adapter::{LocationVuidAdapter, VuidResolver};
pub use report::Reporter;
pub use settings::{ReportSettings, SettingsError, load_settings_from_str};
pub use tables::VuidTable;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use vkloc_core::{Location, MessageStyle};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error: the API usage is invalid.
    Error,
    /// Warning: valid, but likely a mistake or a performance problem.
    Warn,
    /// Informational note.
    Info,
}

impl Severity {
    /// Ordering key, higher is more severe.
    pub const fn rank(self) -> u8 {
        match self {
            Severity::Error => 2,
            Severity::Warn => 1,
            Severity::Info => 0,
        }
    }

    /// `true` when `self` is at least as severe as `threshold`.
    pub const fn at_least(self, threshold: Severity) -> bool {
        self.rank() >= threshold.rank()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic produced by a validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic ID, usually a VUID (e.g. `"VUID-VkSubmitInfo-pCommandBuffers-00075"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Rendered location prefix, e.g. `vkQueueSubmit(): pSubmits[0].pCommandBuffers[1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    /// Absent when no context is applicable. Serialized only when present.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    ///
    /// The location, when given, is rendered with the default [`MessageStyle`].
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        location: Option<&Location>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            location: location.map(Location::message),
            message: message.into(),
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        location: Option<&Location>,
    ) -> Self {
        Self::new(id, Severity::Error, message, location)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        location: Option<&Location>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, location)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        location: Option<&Location>,
    ) -> Self {
        Self::new(id, Severity::Info, message, location)
    }

    /// Diagnostic for the adapter's location, using the VUID it resolves to.
    ///
    /// The location is rendered once, with `style`.
    pub fn from_adapter<R: VuidResolver>(
        adapter: &LocationVuidAdapter<'_, R>,
        severity: Severity,
        message: impl Into<String>,
        style: &MessageStyle,
    ) -> Self {
        Self {
            id: adapter.vuid().to_string().into(),
            severity,
            location: Some(adapter.location().render(style)),
            message: message.into(),
            context: None,
        }
    }

    /// Re-render the location prefix with `style` (builder pattern).
    pub fn with_location(mut self, location: &Location, style: &MessageStyle) -> Self {
        self.location = Some(location.render(style));
        self
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Context is a set of key-value string pairs providing structured details
    /// about the diagnostic for tooling, filtering, and programmatic consumption.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Add the `function`, `refPage` and `field` names of `location` to the
    /// context (builder pattern).
    pub fn with_location_context(mut self, location: &Location) -> Self {
        let ctx = self.context.get_or_insert_with(BTreeMap::new);
        ctx.insert("function".into(), location.string_func().into());
        ctx.insert("refPage".into(), location.string_ref_page().into());
        ctx.insert("field".into(), location.string_field().into());
        self
    }

    /// Returns the human-readable explanation for this diagnostic's ID, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(
                f,
                "{}[{}]: {} {}",
                self.severity, self.id, location, self.message
            ),
            None => write!(f, "{}[{}]: {}", self.severity, self.id, self.message),
        }
    }
}

/// Returns the human-readable explanation for a diagnostic ID, if known.
///
/// Auto-generated from `spec/vuids.jsonc` at build time.
pub fn explain(id: &str) -> Option<&'static str> {
    include!(concat!(env!("OUT_DIR"), "/generated_explain.rs"))
}

/// Returns the default severity registered for a diagnostic ID, if known.
pub fn severity_for(id: &str) -> Option<Severity> {
    include!(concat!(env!("OUT_DIR"), "/generated_severity.rs"))
}
