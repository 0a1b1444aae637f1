use serde::Serialize;

/// Result of one collection write within a save or delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Updated,
    Deleted,
    /// Nothing to delete: the sibling did not exist.
    Absent,
    Failed { reason: String },
}

impl WriteOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed { .. })
    }

    fn reason(&self) -> Option<&str> {
        match self {
            WriteOutcome::Failed { reason } => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    pub mode: SaveMode,
    pub course_id: String,
    pub course_key: Option<String>,
    pub course: WriteOutcome,
    pub details: WriteOutcome,
    pub pricing: WriteOutcome,
}

impl SaveReport {
    /// `(collection, reason)` for every write that failed.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        outcome_failures(&self.course, &self.details, &self.pricing)
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn failure_summary(&self) -> String {
        summarize(&self.failures())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub course_id: String,
    pub course_key: String,
    pub course: WriteOutcome,
    pub details: WriteOutcome,
    pub pricing: WriteOutcome,
}

impl DeleteReport {
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        outcome_failures(&self.course, &self.details, &self.pricing)
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn failure_summary(&self) -> String {
        summarize(&self.failures())
    }
}

fn outcome_failures<'a>(
    course: &'a WriteOutcome,
    details: &'a WriteOutcome,
    pricing: &'a WriteOutcome,
) -> Vec<(&'static str, &'a str)> {
    [
        ("course", course),
        ("course details", details),
        ("course pricing", pricing),
    ]
    .into_iter()
    .filter_map(|(collection, outcome)| outcome.reason().map(|r| (collection, r)))
    .collect()
}

fn summarize(failures: &[(&'static str, &str)]) -> String {
    failures
        .iter()
        .map(|(collection, reason)| format!("{collection}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}
