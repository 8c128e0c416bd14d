use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Which soft step produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    WeaknessLookup,
    EvolutionChain,
    EvolutionSprite,
    ListEntry,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::WeaknessLookup => write!(f, "weakness_lookup"),
            DiagnosticKind::EvolutionChain => write!(f, "evolution_chain"),
            DiagnosticKind::EvolutionSprite => write!(f, "evolution_sprite"),
            DiagnosticKind::ListEntry => write!(f, "list_entry"),
        }
    }
}

/// A failure that was swallowed so the rest of a view could still render.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub context: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, context: impl Into<String>, error: impl ToString) -> Self {
        Self {
            kind,
            context: context.into(),
            error: error.to_string(),
            timestamp: Utc::now(),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` as structured warnings.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = %diagnostic.kind,
            context = %diagnostic.context,
            timestamp = %diagnostic.timestamp.to_rfc3339(),
            "soft failure: {}",
            diagnostic.error
        );
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<Diagnostic> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(e) => {
                tracing::error!("Failed to acquire diagnostics lock: {}", e);
                Vec::new()
            }
        }
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.records().into_iter().map(|d| d.kind).collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: Diagnostic) {
        match self.records.lock() {
            Ok(mut records) => records.push(diagnostic),
            Err(e) => tracing::error!("Failed to acquire diagnostics lock: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let sink = MemorySink::default();
        sink.record(Diagnostic::new(DiagnosticKind::WeaknessLookup, "type/fire", "boom"));
        sink.record(Diagnostic::new(DiagnosticKind::ListEntry, "pokemon/25", "gone"));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].context, "type/fire");
        assert_eq!(records[1].error, "gone");
        assert!(records[0].timestamp <= records[1].timestamp);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink.record(Diagnostic::new(DiagnosticKind::EvolutionChain, "chain/2", "timeout"));
    }
}
