use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository belonging to the organization being reported on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl PrState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrState::Open => "open",
            PrState::Closed => "closed",
        }
    }

    /// Badge color used in the HTML report.
    pub fn badge_color(&self) -> &'static str {
        match self {
            PrState::Open => "#28a745",
            PrState::Closed => "#6f42c1",
        }
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub state: PrState,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub author: String,
    pub body: String,
}
