use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workload status of the unit after a reconciliation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum UnitStatus {
    Active,
    /// Not ready yet; expected to resolve on its own.
    Waiting(String),
    /// Needs operator intervention.
    Blocked(String),
}

/// Well-known status messages.
pub mod status_messages {
    pub const WAITING_FOR_LEADERSHIP: &str = "waiting for leadership";
    pub const MISSING_IMAGE: &str = "missing image resource";
    pub const TOO_MANY_MYSQL_RELATIONS: &str = "Too many mysql relations";
    pub const WAITING_FOR_MYSQL: &str = "Waiting for mysql relation data";
}

impl UnitStatus {
    pub fn waiting(message: &str) -> Self {
        Self::Waiting(message.to_string())
    }

    pub fn blocked(message: &str) -> Self {
        Self::Blocked(message.to_string())
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Active => "",
            Self::Waiting(m) | Self::Blocked(m) => m.as_str(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Waiting(_) => "waiting",
            Self::Blocked(_) => "blocked",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Waiting(m) | Self::Blocked(m) => write!(f, "{}: {m}", self.name()),
        }
    }
}
