use crate::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use vkloc_core::MessageStyle;
use vkloc_jsonc_strip::strip_jsonc;

/// Errors that can occur when loading report settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// JSON deserialization failed.
    #[error("invalid settings JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Filtering and formatting options for a [`Reporter`](crate::Reporter).
///
/// Every field has a default, so `{}` is a valid settings document.
///
/// # Example
/// ```
/// use vkloc_diagnostics::{ReportSettings, Severity};
///
/// let settings = ReportSettings::default()
///     .with_min_severity(Severity::Warn)
///     .with_duplicate_message_limit(10)
///     .mute("VUID-VkSubmitInfo-pCommandBuffers-00075");
/// assert!(settings.is_muted("VUID-VkSubmitInfo-pCommandBuffers-00075"));
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    /// Diagnostics less severe than this are dropped.
    pub min_severity: Severity,
    /// Maximum number of reports per VUID; `None` is unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_message_limit: Option<u32>,
    /// VUIDs that are never reported.
    pub muted_vuids: BTreeSet<String>,
    /// Location rendering.
    pub style: MessageStyle,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            min_severity: Severity::Info,
            duplicate_message_limit: None,
            muted_vuids: BTreeSet::new(),
            style: MessageStyle::new(),
        }
    }
}

impl ReportSettings {
    /// Set the minimum reported severity (builder pattern).
    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Limit reports per VUID (builder pattern).
    #[must_use]
    pub fn with_duplicate_message_limit(mut self, limit: u32) -> Self {
        self.duplicate_message_limit = Some(limit);
        self
    }

    /// Never report `vuid` (builder pattern).
    #[must_use]
    pub fn mute(mut self, vuid: impl Into<String>) -> Self {
        self.muted_vuids.insert(vuid.into());
        self
    }

    /// Set the location rendering style (builder pattern).
    #[must_use]
    pub fn with_style(mut self, style: MessageStyle) -> Self {
        self.style = style;
        self
    }

    /// `true` if `vuid` is muted.
    pub fn is_muted(&self, vuid: &str) -> bool {
        self.muted_vuids.contains(vuid)
    }
}

/// Parse and validate report settings from a JSONC string.
///
/// Comments and trailing commas are accepted. A `duplicateMessageLimit` of 0
/// and blank entries in `mutedVuids` are rejected.
pub fn load_settings_from_str(s: &str) -> Result<ReportSettings, SettingsError> {
    let settings: ReportSettings = serde_json::from_str(&strip_jsonc(s))?;

    if settings.duplicate_message_limit == Some(0) {
        return Err(SettingsError::InvalidField {
            field: "duplicateMessageLimit".into(),
            reason: "must be > 0 (omit it for no limit)".into(),
        });
    }
    if settings.muted_vuids.iter().any(|v| v.trim().is_empty()) {
        return Err(SettingsError::InvalidField {
            field: "mutedVuids".into(),
            reason: "entries must not be empty".into(),
        });
    }

    Ok(settings)
}
