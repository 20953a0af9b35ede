use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{DailyCommitCount, Repository};

/// Where the current analyze cycle is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    ReposLoaded,
    ActivityFetching,
    Done,
}

/// View state of the analyzer. Only changed through the `set_*` transitions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisState {
    username: String,
    repos: Vec<Repository>,
    commits: Vec<DailyCommitCount>,
    loading: bool,
    phase: Phase,
}

pub type SharedState = Arc<Mutex<AnalysisState>>;

pub fn shared(state: AnalysisState) -> SharedState {
    Arc::new(Mutex::new(state))
}

impl AnalysisState {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    pub fn commits(&self) -> &[DailyCommitCount] {
        &self.commits
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        tracing::debug!(username = %self.username, "set-username");
    }

    /// Replaces the repository list wholesale.
    pub fn set_repos(&mut self, repos: Vec<Repository>) {
        tracing::debug!(count = repos.len(), "set-repos");
        self.repos = repos;
    }

    /// Replaces the commit series wholesale.
    pub fn set_commits(&mut self, commits: Vec<DailyCommitCount>) {
        tracing::debug!(days = commits.len(), "set-commits");
        self.commits = commits;
    }

    pub fn set_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "set-loading");
        self.loading = loading;
    }

    pub fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "set-phase");
        self.phase = phase;
    }
}
