//! Identity of whoever performs a moderation action

use serde::{Deserialize, Serialize};
use std::fmt;

/// Performer of a moderation action
///
/// Audit entries store `None` for the system performer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Performer {
    System,
    Moderator(String),
}

impl Performer {
    /// Create a moderator performer; a blank name falls back to the system
    pub fn moderator(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            Self::System
        } else {
            Self::Moderator(name.trim().to_string())
        }
    }

    /// Identity as stored on report and audit rows
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::System => None,
            Self::Moderator(name) => Some(name),
        }
    }

    pub fn from_identity(identity: Option<&str>) -> Self {
        identity.map_or(Self::System, Self::moderator)
    }
}

impl fmt::Display for Performer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identity().unwrap_or("system"))
    }
}
