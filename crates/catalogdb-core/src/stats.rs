//! Run report threaded through an import run.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single record-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportErrorEntry {
    /// Human-readable item identifier, e.g. `"category/coatings"`.
    pub item: String,
    pub error: String,
}

/// Aggregate counters and error log for one import invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStats {
    pub total_processed: u32,
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    pub errors: u32,
    pub error_log: Vec<ImportErrorEntry>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for ImportStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportStats {
    /// Starts a new report stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_processed: 0,
            created: 0,
            updated: 0,
            skipped: 0,
            errors: 0,
            error_log: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn record_created(&mut self) {
        self.total_processed = self.total_processed.saturating_add(1);
        self.created = self.created.saturating_add(1);
    }

    pub fn record_updated(&mut self) {
        self.total_processed = self.total_processed.saturating_add(1);
        self.updated = self.updated.saturating_add(1);
    }

    pub fn record_skipped(&mut self) {
        self.total_processed = self.total_processed.saturating_add(1);
        self.skipped = self.skipped.saturating_add(1);
    }

    /// Counts a failed record attempt and appends it to the error log.
    pub fn record_error(&mut self, item: impl Into<String>, error: impl Into<String>) {
        self.total_processed = self.total_processed.saturating_add(1);
        self.errors = self.errors.saturating_add(1);
        self.error_log.push(ImportErrorEntry {
            item: item.into(),
            error: error.into(),
        });
    }

    pub fn finish(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run; measured to now while still running.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Renders the operator-facing run summary.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = self.duration();
        writeln!(f, "import summary")?;
        writeln!(f, "  processed: {}", self.total_processed)?;
        writeln!(f, "  created:   {}", self.created)?;
        writeln!(f, "  updated:   {}", self.updated)?;
        writeln!(f, "  skipped:   {}", self.skipped)?;
        writeln!(f, "  errors:    {}", self.errors)?;
        writeln!(
            f,
            "  duration:  {}.{:03}s",
            duration.num_seconds(),
            duration.num_milliseconds().rem_euclid(1000)
        )?;
        if !self.error_log.is_empty() {
            writeln!(f, "errors:")?;
            for entry in &self.error_log {
                writeln!(f, "  - {}: {}", entry.item, entry.error)?;
            }
        }
        Ok(())
    }
}
