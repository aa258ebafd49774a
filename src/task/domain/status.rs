//! Task status machine.
//!
//! Statuses are chosen freely from a selector, so every ordered pair of
//! statuses, including a status with itself, is a permitted transition. The
//! pairs are still listed explicitly so that restricting the machine later
//! means deleting rows from [`TRANSITIONS`], not rewriting call sites.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a personal or project task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    #[serde(rename = "A faire")]
    Todo,
    /// Work is under way.
    #[serde(rename = "En cours")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Terminé")]
    Done,
}

/// Permitted `(from, to)` status transitions.
pub const TRANSITIONS: [(TaskStatus, TaskStatus); 9] = [
    (TaskStatus::Todo, TaskStatus::Todo),
    (TaskStatus::Todo, TaskStatus::InProgress),
    (TaskStatus::Todo, TaskStatus::Done),
    (TaskStatus::InProgress, TaskStatus::Todo),
    (TaskStatus::InProgress, TaskStatus::InProgress),
    (TaskStatus::InProgress, TaskStatus::Done),
    (TaskStatus::Done, TaskStatus::Todo),
    (TaskStatus::Done, TaskStatus::InProgress),
    (TaskStatus::Done, TaskStatus::Done),
];

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "A faire",
            Self::InProgress => "En cours",
            Self::Done => "Terminé",
        }
    }

    /// Returns `true` when [`TRANSITIONS`] lists `self -> target`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        TRANSITIONS
            .iter()
            .any(|&(from, to)| from == self && to == target)
    }

    /// Returns the statuses reachable from `self`.
    #[must_use]
    pub fn reachable(self) -> Vec<Self> {
        TRANSITIONS
            .iter()
            .filter(|&&(from, _)| from == self)
            .map(|&(_, to)| to)
            .collect()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "a faire" | "à faire" | "todo" => Ok(Self::Todo),
            "en cours" | "in_progress" => Ok(Self::InProgress),
            "terminé" | "termine" | "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
