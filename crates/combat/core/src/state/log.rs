//! Append-only combat log.

use super::combatant::CombatantRef;

/// Origin of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogKind {
    /// Lifecycle messages: combat start, victory, defeat.
    System,
    /// Exactly one per resolved action.
    Action,
}

/// One line of the combat log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub round: u32,
    pub kind: LogKind,
    pub actor: Option<CombatantRef>,
    pub message: String,
    /// Set for lethal or combat-ending events.
    pub important: bool,
}

/// Ordered log entries. Entries are never removed or rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: CombatLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.last()
    }

    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> &[CombatLogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Number of entries produced by resolved actions.
    pub fn action_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == LogKind::Action)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(round: u32) -> CombatLogEntry {
        CombatLogEntry {
            round,
            kind: LogKind::Action,
            actor: None,
            message: format!("round {round}"),
            important: false,
        }
    }

    #[test]
    fn tail_returns_latest_entries_in_order() {
        let mut log = CombatLog::new();
        for round in 1..=5 {
            log.push(entry(round));
        }
        let tail: Vec<u32> = log.tail(2).iter().map(|e| e.round).collect();
        assert_eq!(tail, vec![4, 5]);
        assert_eq!(log.tail(50).len(), 5);
        assert_eq!(log.action_count(), 5);
    }
}
