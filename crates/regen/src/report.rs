use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Updated,
    /// Dry run only: the file would be rewritten with identical content
    Unchanged,
    Skipped,
    Failed { reason: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created => f.write_str("created"),
            Outcome::Updated => f.write_str("updated"),
            Outcome::Unchanged => f.write_str("unchanged"),
            Outcome::Skipped => f.write_str("skipped"),
            Outcome::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub file: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Per-file outcomes of one regeneration run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, file: impl Into<String>, outcome: Outcome) {
        let file = file.into();
        match &outcome {
            Outcome::Failed { .. } => log::error!("{file}: {outcome}"),
            _ => log::info!("{file}: {outcome}"),
        }
        self.entries.push(ReportEntry { file, outcome });
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry.outcome, Outcome::Failed { .. }))
    }

    #[must_use]
    pub fn outcome(&self, file: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|entry| entry.file == file)
            .map(|entry| &entry.outcome)
    }

    /// One `outcome: file` line per entry
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("{}: {}\n", entry.outcome, entry.file));
        }
        if self.dry_run {
            out.push_str("(dry run, nothing written)\n");
        }
        out
    }
}
