use crate::adapter::{LocationVuidAdapter, VuidResolver};
use crate::settings::ReportSettings;
use crate::{Diagnostic, Severity};
use std::collections::HashMap;

/// Collects diagnostics, applying the filters in [`ReportSettings`].
///
/// Every accepted diagnostic is logged through `tracing` at the matching
/// level, with the VUID as the `vuid` field.
#[derive(Debug, Default)]
pub struct Reporter {
    settings: ReportSettings,
    counts: HashMap<String, u32>,
    emitted: Vec<Diagnostic>,
    suppressed: usize,
}

impl Reporter {
    /// Reporter using `settings`.
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Record `diagnostic`. Returns `false` if it was filtered out.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        if let Some(reason) = self.filter(&diagnostic) {
            tracing::debug!(vuid = %diagnostic.id, reason, "diagnostic suppressed");
            self.suppressed += 1;
            return false;
        }
        *self.counts.entry(diagnostic.id.to_string()).or_insert(0) += 1;

        match diagnostic.severity {
            Severity::Error => tracing::error!(vuid = %diagnostic.id, "{diagnostic}"),
            Severity::Warn => tracing::warn!(vuid = %diagnostic.id, "{diagnostic}"),
            Severity::Info => tracing::info!(vuid = %diagnostic.id, "{diagnostic}"),
        }
        self.emitted.push(diagnostic);
        true
    }

    /// Report `message` at the adapter's location under the VUID it resolves to.
    ///
    /// The location is rendered with the configured style.
    pub fn report_at<R: VuidResolver>(
        &mut self,
        adapter: &LocationVuidAdapter<'_, R>,
        severity: Severity,
        message: impl Into<String>,
    ) -> bool {
        let diagnostic =
            Diagnostic::from_adapter(adapter, severity, message, &self.settings.style);
        self.report(diagnostic)
    }

    /// Diagnostics accepted so far, in report order.
    pub fn emitted(&self) -> &[Diagnostic] {
        &self.emitted
    }

    /// Number of diagnostics filtered out.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    /// Times `vuid` has been accepted.
    pub fn count(&self, vuid: &str) -> u32 {
        self.counts.get(vuid).copied().unwrap_or(0)
    }

    /// Drain accepted diagnostics. Duplicate counts are kept.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.emitted)
    }

    fn filter(&self, diagnostic: &Diagnostic) -> Option<&'static str> {
        if self.settings.is_muted(&diagnostic.id) {
            return Some("muted");
        }
        if !diagnostic.severity.at_least(self.settings.min_severity) {
            return Some("below minimum severity");
        }
        if let Some(limit) = self.settings.duplicate_message_limit
            && self.count(&diagnostic.id) >= limit
        {
            return Some("duplicate limit reached");
        }
        None
    }
}
