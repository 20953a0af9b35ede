use serde::{Deserialize, Serialize};

/// A public repository as listed by `/users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(rename(deserialize = "html_url"))]
    pub url: String,
}

/// Commits pushed on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCommitCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

impl DailyCommitCount {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}
