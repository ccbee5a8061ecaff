//! Composite key shapes for the configuration and data-event tables.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ValidationError,
    IngestFailure,
    IngestSuccess,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "license.validation-error",
            Self::IngestFailure => "license.ingest-failure",
            Self::IngestSuccess => "license.ingest",
        }
    }
}

/// A sort-key condition, evaluated the way the store evaluates key conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKeyCondition {
    BeginsWith(String),
    /// Inclusive on both ends.
    Between(String, String),
}

impl SortKeyCondition {
    pub fn matches(&self, sort_key: &str) -> bool {
        match self {
            Self::BeginsWith(prefix) => sort_key.starts_with(prefix.as_str()),
            Self::Between(lower, upper) => {
                sort_key >= lower.as_str() && sort_key <= upper.as_str()
            }
        }
    }
}

pub fn compact_configuration_pk(compact: &str) -> String {
    format!("{}#CONFIGURATION", compact.to_lowercase())
}

pub fn compact_configuration_sk(compact: &str) -> String {
    compact_configuration_pk(compact)
}

pub fn jurisdiction_configuration_sk(compact: &str, jurisdiction: &str) -> String {
    format!(
        "{}#JURISDICTION#{}",
        compact.to_lowercase(),
        jurisdiction.to_lowercase()
    )
}

pub fn jurisdiction_configuration_prefix(compact: &str) -> SortKeyCondition {
    SortKeyCondition::BeginsWith(format!("{}#JURISDICTION#", compact.to_lowercase()))
}

pub fn event_pk(compact: &str, jurisdiction: &str) -> String {
    format!(
        "COMPACT#{}#JURISDICTION#{}",
        compact.to_lowercase(),
        jurisdiction.to_lowercase()
    )
}

pub fn event_sk_prefix(kind: EventKind, timestamp: i64) -> String {
    format!("TYPE#{}#TIME#{timestamp}#", kind.as_str())
}

/// Selects events with `start <= time < end`. Event sort keys continue past the
/// trailing `#`, so the upper bound itself excludes events stamped at `end`.
pub fn event_window_condition(kind: EventKind, start: i64, end: i64) -> SortKeyCondition {
    SortKeyCondition::Between(event_sk_prefix(kind, start), event_sk_prefix(kind, end))
}
